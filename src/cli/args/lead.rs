//! Lead field and filter arguments

use clap::Args;

use crate::client::models::{LeadDraft, LeadFilter, LeadSource, LeadStatus};

/// Lead list filters
#[derive(Debug, Clone, Args, Default)]
pub struct LeadFilterArgs {
    /// Only leads in this stage
    #[arg(long, value_enum)]
    pub status: Option<LeadStatus>,

    /// Only leads from this source
    #[arg(long, value_enum)]
    pub source: Option<LeadSource>,

    /// Search name, email and company
    #[arg(long)]
    pub search: Option<String>,

    /// Sort field, prefix with '-' for descending (e.g. -created_at)
    #[arg(long, allow_hyphen_values = true)]
    pub ordering: Option<String>,
}

impl From<&LeadFilterArgs> for LeadFilter {
    fn from(args: &LeadFilterArgs) -> Self {
        Self {
            status: args.status,
            source: args.source,
            search: args.search.clone(),
            ordering: args.ordering.clone(),
        }
    }
}

/// Editable lead fields
#[derive(Debug, Clone, Args, Default)]
pub struct LeadFieldArgs {
    /// Contact name
    #[arg(long)]
    pub name: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Company name
    #[arg(long)]
    pub company: Option<String>,

    /// Pipeline stage
    #[arg(long, value_enum)]
    pub status: Option<LeadStatus>,

    /// Where the lead came from
    #[arg(long, value_enum)]
    pub source: Option<LeadSource>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl LeadFieldArgs {
    /// Draft for a new lead; unset stage and source fall back to `new` and `website`
    pub fn to_draft(&self) -> LeadDraft {
        self.apply_to(LeadDraft {
            source: LeadSource::Website,
            ..Default::default()
        })
    }

    /// Overlay the fields that were given onto an existing draft
    pub fn apply_to(&self, mut draft: LeadDraft) -> LeadDraft {
        if let Some(ref name) = self.name {
            draft.name = name.clone();
        }
        if self.email.is_some() {
            draft.email = self.email.clone();
        }
        if self.phone.is_some() {
            draft.phone = self.phone.clone();
        }
        if self.company.is_some() {
            draft.company = self.company.clone();
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(source) = self.source {
            draft.source = source;
        }
        if self.notes.is_some() {
            draft.notes = self.notes.clone();
        }
        draft
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.status.is_none()
            && self.source.is_none()
            && self.notes.is_none()
    }
}

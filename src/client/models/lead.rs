//! Lead models

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pipeline stage of a lead
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    #[value(name = "in_progress")]
    InProgress,
    Won,
    Lost,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::InProgress => "in_progress",
            LeadStatus::Won => "won",
            LeadStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel a lead came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Linkedin,
    Email,
    Referral,
    Website,
    #[default]
    Other,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Linkedin => "linkedin",
            LeadSource::Email => "email",
            LeadSource::Referral => "referral",
            LeadSource::Website => "website",
            LeadSource::Other => "other",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lead as returned by the API.
///
/// List responses carry a subset of the detail fields, so everything beyond
/// `id` and `name` is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub status: LeadStatus,

    #[serde(default)]
    pub source: LeadSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_display: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<u64>,
}

/// `GET /leads/` returns a bare array, or a page envelope when the server
/// has pagination enabled.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LeadList {
    Paged { results: Vec<Lead> },
    Plain(Vec<Lead>),
}

impl From<LeadList> for Vec<Lead> {
    fn from(list: LeadList) -> Self {
        match list {
            LeadList::Paged { results } => results,
            LeadList::Plain(leads) => leads,
        }
    }
}

/// Write payload for creating or replacing a lead
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeadDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub notes: Option<String>,
}

impl LeadDraft {
    /// Check the draft the way the lead form does, normalizing the email.
    ///
    /// All problems are collected into a single [`Error::Validation`].
    pub fn validate(mut self) -> Result<Self> {
        let mut problems = Vec::new();

        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            problems.push("name is required".to_string());
        }

        match self.email.as_deref().map(str::trim) {
            None | Some("") => problems.push("email is required".to_string()),
            Some(email) if !is_email_shaped(email) => {
                problems.push(format!("invalid email format: {}", email))
            }
            Some(email) => self.email = Some(email.to_lowercase()),
        }

        if self.company.as_deref().is_none_or(|c| c.trim().is_empty()) {
            problems.push("company is required".to_string());
        }

        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            let digits = phone
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .count();
            if digits < 10 {
                problems.push("phone number must contain at least 10 digits".to_string());
            }
        }

        if problems.is_empty() {
            Ok(self)
        } else {
            Err(Error::Validation(problems))
        }
    }
}

impl From<&Lead> for LeadDraft {
    fn from(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
            status: lead.status,
            source: lead.source,
            notes: lead.notes.clone(),
        }
    }
}

fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Query filters for `GET /leads/`
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl LeadFilter {
    /// Convert to query parameters, omitting unset filters
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(source) = self.source {
            params.push(("source", source.as_str().to_string()));
        }
        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        if let Some(ref ordering) = self.ordering {
            params.push(("ordering", ordering.clone()));
        }
        params
    }
}

/// Aggregate counts from `GET /leads/stats/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadStats {
    pub total: u64,

    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,

    #[serde(default)]
    pub by_source: BTreeMap<String, u64>,
}

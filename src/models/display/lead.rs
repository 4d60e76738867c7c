//! Lead display models

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::client::models::{Lead, LeadStats};
use crate::output::formatters::{format_datetime_local, or_dash};

const NAME_WIDTH: usize = 30;
const COMPANY_WIDTH: usize = 24;

/// One lead per row, for list output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LeadRow {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "COMPANY")]
    pub company: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "SOURCE")]
    pub source: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<Lead> for LeadRow {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            name: truncate_string(&lead.name, NAME_WIDTH),
            company: truncate_string(&or_dash(lead.company.as_deref()), COMPANY_WIDTH),
            email: or_dash(lead.email.as_deref()),
            status: lead.status.to_string(),
            source: lead.source.to_string(),
            created: format_datetime_local(lead.created_at),
        }
    }
}

/// Single-lead detail view
#[derive(Debug, Clone)]
pub struct LeadDisplay {
    lead: Lead,
}

impl From<Lead> for LeadDisplay {
    fn from(lead: Lead) -> Self {
        Self { lead }
    }
}

impl LeadDisplay {
    /// Labelled key/value block
    pub fn render(&self) -> String {
        let lead = &self.lead;
        let status = lead
            .status_display
            .clone()
            .unwrap_or_else(|| lead.status.to_string());
        let source = lead
            .source_display
            .clone()
            .unwrap_or_else(|| lead.source.to_string());

        let fields = [
            ("ID", lead.id.to_string()),
            ("Name", lead.name.clone()),
            ("Company", or_dash(lead.company.as_deref())),
            ("Email", or_dash(lead.email.as_deref())),
            ("Phone", or_dash(lead.phone.as_deref())),
            ("Status", status),
            ("Source", source),
            ("Created", format_datetime_local(lead.created_at)),
            ("Updated", format_datetime_local(lead.updated_at)),
        ];

        let mut out = String::new();
        for (label, value) in fields {
            let label = format!("{:<9}", format!("{}:", label));
            out.push_str(&format!("  {} {}\n", label.bold(), value));
        }

        if let Some(notes) = lead.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            out.push_str(&format!("\n  {}\n", "Notes:".bold()));
            for line in notes.lines() {
                out.push_str(&format!("    {}\n", line));
            }
        }

        out.trim_end().to_string()
    }
}

/// One line of the stats breakdown
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StatsRow {
    #[tabled(rename = "GROUP")]
    pub group: String,

    #[tabled(rename = "VALUE")]
    pub value: String,

    #[tabled(rename = "COUNT")]
    pub count: u64,
}

impl StatsRow {
    /// Flatten stats into `total`, `status`, then `source` rows
    pub fn from_stats(stats: &LeadStats) -> Vec<Self> {
        let mut rows = vec![Self {
            group: "total".to_string(),
            value: "-".to_string(),
            count: stats.total,
        }];

        rows.extend(stats.by_status.iter().map(|(value, count)| Self {
            group: "status".to_string(),
            value: value.clone(),
            count: *count,
        }));
        rows.extend(stats.by_source.iter().map(|(value, count)| Self {
            group: "source".to_string(),
            value: value.clone(),
            count: *count,
        }));

        rows
    }
}

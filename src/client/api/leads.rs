//! Lead API trait

use async_trait::async_trait;

use crate::client::models::{Lead, LeadDraft, LeadFilter, LeadStats};
use crate::error::Result;

/// Lead operations for the LeadFlow API
#[async_trait]
pub trait LeadApi: Send + Sync {
    /// List the user's leads, optionally filtered
    async fn list_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>>;

    async fn get_lead(&self, id: u64) -> Result<Lead>;

    async fn create_lead(&self, draft: &LeadDraft) -> Result<Lead>;

    /// Replace a lead with the given draft
    async fn update_lead(&self, id: u64, draft: &LeadDraft) -> Result<Lead>;

    async fn delete_lead(&self, id: u64) -> Result<()>;

    /// Totals by status and source
    async fn lead_stats(&self) -> Result<LeadStats>;

    /// The ten most recently created leads
    async fn recent_leads(&self) -> Result<Vec<Lead>>;
}

//! Mock LeadFlow API client for testing
//!
//! Provides an in-memory implementation of the API traits for unit testing
//! command logic without making real API calls.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{AuthApi, LeadApi};
use super::models::{Lead, LeadDraft, LeadFilter, LeadStats, TokenPair, User};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockLeadflowClient::new().with_leads(vec![lead(1, "Ada")]);
/// let leads = mock.list_leads(&LeadFilter::default()).await?;
/// assert_eq!(leads.len(), 1);
/// ```
#[derive(Default)]
pub struct MockLeadflowClient {
    /// Leads held by the fake server, newest first
    leads: Arc<Mutex<Vec<Lead>>>,
    /// Profile returned from current_user
    user: Arc<Mutex<Option<User>>>,
    /// Lead IDs whose update/delete fail with a server error
    failing_ids: Arc<Mutex<Vec<u64>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Drafts received by update_lead
    captured_updates: Arc<Mutex<Vec<(u64, LeadDraft)>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub list_leads: usize,
    pub get_lead: usize,
    pub create_lead: usize,
    pub update_lead: usize,
    pub delete_lead: usize,
}

impl MockLeadflowClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the fake server with leads
    pub fn with_leads(self, leads: Vec<Lead>) -> Self {
        Self {
            leads: Arc::new(Mutex::new(leads)),
            ..self
        }
    }

    /// Make update/delete of these IDs fail
    pub fn with_failing_ids(self, ids: Vec<u64>) -> Self {
        Self {
            failing_ids: Arc::new(Mutex::new(ids)),
            ..self
        }
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_updates(&self) -> Vec<(u64, LeadDraft)> {
        self.captured_updates.lock().await.clone()
    }

    pub async fn lead_ids(&self) -> Vec<u64> {
        self.leads.lock().await.iter().map(|l| l.id).collect()
    }

    async fn check_failing(&self, id: u64) -> Result<()> {
        if self.failing_ids.lock().await.contains(&id) {
            return Err(ApiError::ServerError(format!("lead {} is locked", id)).into());
        }
        Ok(())
    }
}

/// Build a minimal lead for tests
pub fn lead(id: u64, name: &str) -> Lead {
    Lead {
        id,
        name: name.to_string(),
        email: None,
        phone: None,
        company: None,
        status: Default::default(),
        source: Default::default(),
        status_display: None,
        source_display: None,
        notes: None,
        created_at: None,
        updated_at: None,
        owner: None,
    }
}

fn apply_draft(lead: &mut Lead, draft: &LeadDraft) {
    lead.name = draft.name.clone();
    lead.email = draft.email.clone();
    lead.phone = draft.phone.clone();
    lead.company = draft.company.clone();
    lead.status = draft.status;
    lead.source = draft.source;
    lead.notes = draft.notes.clone();
}

fn not_found(id: u64) -> crate::error::Error {
    ApiError::NotFound(format!("lead {}", id)).into()
}

#[async_trait]
impl AuthApi for MockLeadflowClient {
    async fn signup(&self, username: &str, email: &str, password: &str) -> Result<TokenPair> {
        *self.user.lock().await = Some(User {
            id: 1,
            username: username.to_string(),
            email: email.to_string(),
        });
        self.login(username, password).await
    }

    async fn login(&self, username: &str, _password: &str) -> Result<TokenPair> {
        self.call_count.lock().await.login += 1;
        let mut user = self.user.lock().await;
        if user.is_none() {
            *user = Some(User {
                id: 1,
                username: username.to_string(),
                email: String::new(),
            });
        }
        Ok(TokenPair {
            access: "mock-access".to_string(),
            refresh: "mock-refresh".to_string(),
            user: None,
        })
    }

    async fn logout(&self) -> Result<()> {
        *self.user.lock().await = None;
        Ok(())
    }

    async fn is_authenticated(&self) -> bool {
        self.user.lock().await.is_some()
    }

    async fn current_user(&self) -> Result<User> {
        self.user
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::Unauthorized.into())
    }
}

#[async_trait]
impl LeadApi for MockLeadflowClient {
    async fn list_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>> {
        self.call_count.lock().await.list_leads += 1;
        let search = filter.search.as_deref().map(str::to_lowercase);

        Ok(self
            .leads
            .lock()
            .await
            .iter()
            .filter(|l| filter.status.is_none_or(|s| l.status == s))
            .filter(|l| filter.source.is_none_or(|s| l.source == s))
            .filter(|l| match search {
                Some(ref q) => [Some(&l.name), l.email.as_ref(), l.company.as_ref()]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(q)),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get_lead(&self, id: u64) -> Result<Lead> {
        self.call_count.lock().await.get_lead += 1;
        self.leads
            .lock()
            .await
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create_lead(&self, draft: &LeadDraft) -> Result<Lead> {
        self.call_count.lock().await.create_lead += 1;
        let mut leads = self.leads.lock().await;
        let id = leads.iter().map(|l| l.id).max().unwrap_or(0) + 1;

        let mut created = lead(id, &draft.name);
        apply_draft(&mut created, draft);
        leads.insert(0, created.clone());
        Ok(created)
    }

    async fn update_lead(&self, id: u64, draft: &LeadDraft) -> Result<Lead> {
        self.call_count.lock().await.update_lead += 1;
        self.check_failing(id).await?;
        self.captured_updates.lock().await.push((id, draft.clone()));

        let mut leads = self.leads.lock().await;
        let existing = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| not_found(id))?;
        apply_draft(existing, draft);
        Ok(existing.clone())
    }

    async fn delete_lead(&self, id: u64) -> Result<()> {
        self.call_count.lock().await.delete_lead += 1;
        self.check_failing(id).await?;

        let mut leads = self.leads.lock().await;
        let before = leads.len();
        leads.retain(|l| l.id != id);
        if leads.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn lead_stats(&self) -> Result<LeadStats> {
        let leads = self.leads.lock().await;
        let mut by_status = BTreeMap::new();
        let mut by_source = BTreeMap::new();
        for l in leads.iter() {
            *by_status.entry(l.status.to_string()).or_insert(0) += 1;
            *by_source.entry(l.source.to_string()).or_insert(0) += 1;
        }

        Ok(LeadStats {
            total: leads.len() as u64,
            by_status,
            by_source,
        })
    }

    async fn recent_leads(&self) -> Result<Vec<Lead>> {
        Ok(self.leads.lock().await.iter().take(10).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::LeadStatus;

    #[tokio::test]
    async fn test_mock_filters_and_counts() {
        let mut won = lead(2, "Grace");
        won.status = LeadStatus::Won;
        won.company = Some("Navy".to_string());
        let mock = MockLeadflowClient::new().with_leads(vec![lead(1, "Ada"), won]);

        let filter = LeadFilter {
            search: Some("navy".to_string()),
            ..Default::default()
        };
        let found = mock.list_leads(&filter).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
        assert_eq!(mock.call_counts().await.list_leads, 1);

        let stats = mock.lead_stats().await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_status["won"], 1);
    }

    #[tokio::test]
    async fn test_mock_auth_flow() {
        let mock = MockLeadflowClient::new();
        assert!(!mock.is_authenticated().await);

        mock.login("alice", "pw").await.unwrap();
        assert_eq!(mock.current_user().await.unwrap().username, "alice");

        mock.logout().await.unwrap();
        assert!(mock.current_user().await.is_err());
    }

    #[tokio::test]
    async fn test_mock_signup_signs_in() {
        let mock = MockLeadflowClient::new();

        let pair = mock.signup("bob", "bob@example.com", "pw").await.unwrap();

        assert_eq!(pair.access, "mock-access");
        assert_eq!(mock.current_user().await.unwrap().email, "bob@example.com");
        assert_eq!(mock.call_counts().await.login, 1);
    }
}

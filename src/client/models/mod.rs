//! LeadFlow API data models
//!
//! Models are organized by resource type.

mod auth;
mod lead;
mod user;

pub use auth::{
    AccessToken, LoginRequest, RefreshRequest, SignupRequest, TokenPair, token_expiry,
};
pub use lead::{Lead, LeadDraft, LeadFilter, LeadList, LeadSource, LeadStats, LeadStatus};
pub use user::User;

//! LeadFlow API client
//!
//! The client is organized into modular components:
//! - [`api`] - Trait definitions split by responsibility (auth, leads)
//! - [`models`] - Request and response types
//! - [`leadflow`] - HTTP implementation with the token refresh protocol

pub mod api;
pub mod leadflow;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{AuthApi, LeadApi};
pub use leadflow::LeadflowClient;
#[cfg(test)]
pub use mock::MockLeadflowClient;

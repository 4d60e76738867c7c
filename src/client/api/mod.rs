//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Session operations (signup, login, logout, profile)
//! - [`LeadApi`] - Lead CRUD and reporting

mod auth;
mod leads;

pub use auth::AuthApi;
pub use leads::LeadApi;

//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod lead;
mod user;

pub use lead::{LeadDisplay, LeadRow, StatsRow};
pub use user::UserDisplay;

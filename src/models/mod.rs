//! Display models for CLI output
//!
//! Converts API response types into CLI-friendly display formats.

pub mod display;

pub use display::{LeadDisplay, LeadRow, StatsRow, UserDisplay};

//! User models

use serde::{Deserialize, Serialize};

/// Authenticated user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,

    pub username: String,

    #[serde(default)]
    pub email: String,
}

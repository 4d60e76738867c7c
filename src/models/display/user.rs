//! User display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::User;
use crate::output::formatters::or_dash;

/// User display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,
}

impl From<User> for UserDisplay {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: or_dash(Some(&user.email)),
        }
    }
}

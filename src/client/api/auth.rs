//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{TokenPair, User};
use crate::error::Result;

/// Authentication operations for the LeadFlow API.
///
/// Successful signup and login store the issued token pair in the client's
/// session before returning it.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Register a new account and sign in
    async fn signup(&self, username: &str, email: &str, password: &str) -> Result<TokenPair>;

    /// Exchange credentials for a token pair
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair>;

    /// Forget the stored tokens; no request is sent
    async fn logout(&self) -> Result<()>;

    /// Whether an access token is currently held
    async fn is_authenticated(&self) -> bool;

    /// Profile of the signed-in user
    async fn current_user(&self) -> Result<User>;
}

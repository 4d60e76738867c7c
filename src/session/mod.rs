//! Session state shared between the API client and its callers
//!
//! A [`Session`] owns the access/refresh token pair in memory and writes every
//! change through to a [`TokenStore`]. It is created once and handed to the
//! client, so nothing reads tokens from ambient global state.
//!
//! Lifecycle changes are broadcast as [`SessionEvent`]s. The host decides what
//! to do with them; the CLI, for instance, tells the user to log in again when
//! it sees [`SessionEvent::Expired`].

mod store;

use log::debug;
use tokio::sync::{RwLock, broadcast};

use crate::error::Result;

#[cfg(test)]
pub use store::MemoryTokenStore;
pub use store::{FileTokenStore, TokenStore, Tokens};

/// Notifications emitted when the session changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new token pair was issued by login or signup
    SignedIn,
    /// The access token was replaced by a refresh exchange
    Refreshed,
    /// The user logged out
    SignedOut,
    /// Refresh failed; tokens were cleared and the user must sign in again
    Expired,
}

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Authentication session backed by a token store
pub struct Session {
    tokens: RwLock<Tokens>,
    store: Box<dyn TokenStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Create a session, loading any tokens already present in `store`
    pub fn new(store: impl TokenStore + 'static) -> Result<Self> {
        let tokens = store.load()?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            tokens: RwLock::new(tokens),
            store: Box::new(store),
            events,
        })
    }

    /// Session that lives only in memory
    #[cfg(test)]
    pub fn in_memory(tokens: Tokens) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            tokens: RwLock::new(tokens.clone()),
            store: Box::new(MemoryTokenStore::with_tokens(tokens)),
            events,
        }
    }

    /// Subscribe to session lifecycle notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.tokens.read().await.access_token.clone()
    }

    #[cfg(test)]
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.read().await.refresh_token.clone()
    }

    pub async fn snapshot(&self) -> Tokens {
        self.tokens.read().await.clone()
    }

    /// True when an access token is held
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.access_token.is_some()
    }

    /// Store a freshly issued token pair
    pub async fn establish(&self, access: String, refresh: String) -> Result<()> {
        let mut tokens = self.tokens.write().await;
        *tokens = Tokens::new(access, refresh);
        self.store.save(&tokens)?;
        drop(tokens);

        self.emit(SessionEvent::SignedIn);
        Ok(())
    }

    /// Replace the access token in place, keeping the refresh token
    pub async fn replace_access(&self, access: String) -> Result<()> {
        let mut tokens = self.tokens.write().await;
        tokens.access_token = Some(access);
        self.store.save(&tokens)?;
        drop(tokens);

        self.emit(SessionEvent::Refreshed);
        Ok(())
    }

    /// Drop both tokens and announce why.
    ///
    /// The event is sent even when the store cannot be cleared; the storage
    /// error is returned afterwards.
    pub async fn end(&self, reason: SessionEvent) -> Result<()> {
        let mut tokens = self.tokens.write().await;
        *tokens = Tokens::default();
        let cleared = self.store.clear();
        drop(tokens);

        self.emit(reason);
        cleared
    }

    fn emit(&self, event: SessionEvent) {
        debug!("Session event: {:?}", event);
        // No subscribers is not an error
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

//! Token persistence backends

use std::path::PathBuf;
#[cfg(test)]
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config::write_private;
use crate::error::{ConfigError, Result};

/// Access/refresh token pair as persisted between runs.
///
/// Either token may be absent; an empty pair means "signed out".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Tokens {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access_token: Some(access.into()),
            refresh_token: Some(refresh.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Durable key-value storage for the session tokens
pub trait TokenStore: Send + Sync {
    /// Load the stored tokens; a missing store yields an empty pair
    fn load(&self) -> Result<Tokens>;

    /// Persist the tokens, replacing whatever was stored
    fn save(&self, tokens: &Tokens) -> Result<()>;

    /// Remove both tokens
    fn clear(&self) -> Result<()>;
}

/// YAML file store, written with owner-only permissions
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Tokens> {
        if !self.path.exists() {
            return Ok(Tokens::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Tokens::default());
        }

        Ok(serde_yaml::from_str(&contents).map_err(ConfigError::from)?)
    }

    fn save(&self, tokens: &Tokens) -> Result<()> {
        let contents =
            serde_yaml::to_string(tokens).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        write_private(&self.path, &contents)
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Tokens>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_tokens(tokens: Tokens) -> Self {
        Self {
            tokens: Mutex::new(tokens),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Tokens> {
        Ok(self
            .tokens
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, tokens: &Tokens) -> Result<()> {
        *self
            .tokens
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = tokens.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.save(&Tokens::default())
    }
}

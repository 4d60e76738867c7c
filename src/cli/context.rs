//! Command execution context
//!
//! Provides a unified context for command execution: config loading, session
//! restoration and client initialization.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::LeadflowClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{FileTokenStore, Session, SessionEvent};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Resolved config file path
    pub config_path: PathBuf,
    /// API client bound to the persisted session
    pub client: Arc<LeadflowClient>,
    /// Output format preference
    pub format: OutputFormat,
    _notices: SessionNotices,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads the config (missing file means defaults), restores the session
    /// from the token file beside it, and builds the client against the
    /// effective API URL.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let mut config = Config::load_from(&config_path)?;

        if let Some(url) = opts.api_url_ref() {
            config.api_url = Some(url.to_string());
        }

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_name)
            })
            .unwrap_or_default();

        let store = FileTokenStore::new(Config::session_path(&config_path));
        let session = Arc::new(Session::new(store)?);
        let notices = SessionNotices {
            events: session.subscribe(),
        };
        let client = Arc::new(LeadflowClient::new(config.api_url(), session)?);

        Ok(Self {
            config,
            config_path,
            client,
            format,
            _notices: notices,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        self.client.session()
    }

    /// Persist the config back to where it was loaded from
    pub fn save_config(&self) -> Result<()> {
        self.config.save_to(&self.config_path)
    }
}

/// Turns session events into user-facing notices.
///
/// Drained when the context is dropped, so an expired session is reported
/// whether the command succeeded or failed.
struct SessionNotices {
    events: broadcast::Receiver<SessionEvent>,
}

impl Drop for SessionNotices {
    fn drop(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(SessionEvent::Expired) => eprintln!(
                    "{} Your session has expired. Run {} to sign in again.",
                    "⚠".yellow(),
                    "leadflow login".cyan()
                ),
                Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }
}

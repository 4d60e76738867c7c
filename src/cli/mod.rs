//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod completions;
pub mod context;
pub mod lead;
pub mod status;

pub use args::{GlobalOptions, LeadFieldArgs, LeadFilterArgs, OutputFormat};
pub use context::CommandContext;

/// LeadFlow CLI - sign in and manage your LeadFlow CRM leads
#[derive(Parser, Debug)]
#[command(name = "leadflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "LEADFLOW_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "LEADFLOW_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API base URL (e.g. http://localhost:8000/api)
    #[arg(long, global = true, env = "LEADFLOW_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "LEADFLOW_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and sign in
    Signup {
        /// Account username
        #[arg(long)]
        username: Option<String>,

        /// Account email
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "LEADFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign in with username and password
    Login {
        /// Account username (defaults to the last one used)
        #[arg(long)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "LEADFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget stored tokens
    Logout,

    /// Show configuration and session status
    Status,

    /// Show the signed-in user
    Whoami,

    /// Display version information
    Version,

    /// Manage leads
    #[command(subcommand)]
    Lead(LeadCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   leadflow completion bash > /etc/bash_completion.d/leadflow
  zsh:    leadflow completion zsh > \"${fpath[1]}/_leadflow\"
  fish:   leadflow completion fish > ~/.config/fish/completions/leadflow.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Lead management subcommands
#[derive(Subcommand, Debug)]
pub enum LeadCommands {
    /// List leads
    List {
        #[command(flatten)]
        filters: LeadFilterArgs,

        /// Show at most this many leads
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Show one lead in detail
    Get {
        /// Lead ID
        id: u64,
    },

    /// Show the ten most recent leads
    Recent,

    /// Show lead counts by status and source
    Stats,

    /// Create a lead (name, email and company are required)
    Create {
        #[command(flatten)]
        fields: LeadFieldArgs,
    },

    /// Update a lead; only the given fields change
    Update {
        /// Lead ID
        id: u64,

        #[command(flatten)]
        fields: LeadFieldArgs,
    },

    /// Delete one or more leads
    Delete {
        /// Lead IDs
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

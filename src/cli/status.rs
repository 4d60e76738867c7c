//! Status command implementation

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::AuthApi;
use crate::client::models::token_expiry;
use crate::error::Result;
use crate::output::formatters::format_remaining;
use crate::output::json;

/// Snapshot of local configuration and session state
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub config_path: String,
    pub api_url: String,
    pub username: Option<String>,
    pub signed_in: bool,
    pub access_expires_at: Option<DateTime<Utc>>,
    pub has_refresh_token: bool,
}

/// Run the status command. Makes no network calls.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let tokens = ctx.session().snapshot().await;

    let report = StatusReport {
        config_path: ctx.config_path.display().to_string(),
        api_url: ctx.client.base_url().to_string(),
        username: ctx.config.username.clone(),
        signed_in: ctx.client.is_authenticated().await,
        access_expires_at: tokens.access_token.as_deref().and_then(token_expiry),
        has_refresh_token: tokens.refresh_token.is_some(),
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&report)?),
        _ => print_report(&report),
    }

    Ok(())
}

fn print_report(report: &StatusReport) {
    println!("{}\n", "LeadFlow Status".bold());
    println!("Config file: {}", report.config_path.cyan());
    println!("API URL:     {}", report.api_url.cyan());
    println!();

    if !report.signed_in && !report.has_refresh_token {
        println!("{} Not signed in", "✗".red());
        println!("  → Run 'leadflow login' to sign in");
        println!();
        return;
    }

    match report.username {
        Some(ref username) => println!("{} Signed in as {}", "✓".green(), username.bold()),
        None => println!("{} Signed in", "✓".green()),
    }

    match (report.signed_in, report.access_expires_at) {
        (false, _) => println!(
            "{} No access token (will refresh on next command)",
            "⚠".yellow()
        ),
        (true, Some(expires)) if expires <= Utc::now() => println!(
            "{} Access token expired (will refresh on next command)",
            "⚠".yellow()
        ),
        (true, Some(expires)) => println!(
            "{} Access token valid (expires in {})",
            "✓".green(),
            format_remaining(expires.signed_duration_since(Utc::now()))
        ),
        (true, None) => println!("{} Access token stored", "✓".green()),
    }

    if report.has_refresh_token {
        println!("{} Refresh token stored", "✓".green());
    } else {
        println!(
            "{} No refresh token (sign in again when the access token expires)",
            "○".dimmed()
        );
    }

    println!();
}

//! Signup, login, logout and whoami commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::AuthApi;
use crate::error::Result;
use crate::models::UserDisplay;
use crate::output::{Formattable, json};

/// Run the signup command
pub async fn signup(
    opts: &GlobalOptions,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let username = match username {
        Some(u) => u,
        None => prompt_username(None)?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .allow_empty(true)
            .interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let pair = ctx.client.signup(&username, &email, &password).await?;

    ctx.config.username = Some(username.clone());
    ctx.save_config()?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&pair.user)?),
        _ => println!(
            "{} Account created. Signed in as {}",
            "✓".green(),
            username.bold()
        ),
    }

    Ok(())
}

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let username = match username {
        Some(u) => u,
        None => prompt_username(ctx.config.username.as_deref())?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    ctx.client.login(&username, &password).await?;

    ctx.config.username = Some(username.clone());
    ctx.save_config()?;

    println!("{} Signed in as {}", "✓".green(), username.bold());
    Ok(())
}

/// Run the logout command
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if ctx.session().snapshot().await.is_empty() {
        println!("{} Not signed in", "○".dimmed());
        return Ok(());
    }

    ctx.client.logout().await?;
    println!("{} Signed out", "✓".green());
    Ok(())
}

/// Run the whoami command
pub async fn whoami(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let user = ctx.client.current_user().await?;

    vec![UserDisplay::from(user)].print(ctx.format)
}

fn prompt_username(default: Option<&str>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt("Username");
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    Ok(input.interact_text()?)
}

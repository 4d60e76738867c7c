//! Lead command implementations

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use futures::future::join_all;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, LeadFieldArgs, LeadFilterArgs, OutputFormat};
use crate::client::LeadApi;
use crate::client::models::{Lead, LeadDraft, LeadFilter};
use crate::error::{Error, Result};
use crate::models::{LeadDisplay, LeadRow, StatsRow};
use crate::output::{Formattable, json};

/// Run the lead list command
pub async fn list(opts: &GlobalOptions, filters: &LeadFilterArgs, limit: Option<usize>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let filter = LeadFilter::from(filters);

    debug!("Fetching leads with {:?}", filter);
    let leads = ctx.client.list_leads(&filter).await?;
    debug!("Fetched {} leads", leads.len());

    let limited: Vec<Lead> = match limit {
        Some(n) => leads.into_iter().take(n).collect(),
        None => leads,
    };

    print_rows(limited, ctx.format)
}

/// Run the lead recent command
pub async fn recent(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let leads = ctx.client.recent_leads().await?;

    print_rows(leads, ctx.format)
}

/// Run the lead get command
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let lead = ctx.client.get_lead(id).await?;

    print_detail(lead, ctx.format)
}

/// Run the lead stats command
pub async fn stats(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let stats = ctx.client.lead_stats().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&stats)?),
        format => StatsRow::from_stats(&stats).print(format)?,
    }

    Ok(())
}

/// Run the lead create command
pub async fn create(opts: &GlobalOptions, fields: &LeadFieldArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let lead = create_from_fields(ctx.client.as_ref(), fields).await?;

    if ctx.format != OutputFormat::Json {
        println!("{} Created lead {}\n", "✓".green(), lead.id.to_string().bold());
    }
    print_detail(lead, ctx.format)
}

/// Run the lead update command
pub async fn update(opts: &GlobalOptions, id: u64, fields: &LeadFieldArgs) -> Result<()> {
    if fields.is_empty() {
        return Err(Error::Other(
            "Nothing to update. Pass at least one field, e.g. --status won".to_string(),
        ));
    }

    let ctx = CommandContext::new(opts)?;
    let lead = apply_update(ctx.client.as_ref(), id, fields).await?;

    if ctx.format != OutputFormat::Json {
        println!("{} Updated lead {}\n", "✓".green(), lead.id.to_string().bold());
    }
    print_detail(lead, ctx.format)
}

/// Run the lead delete command
pub async fn delete(opts: &GlobalOptions, ids: &[u64], yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete {} lead(s)?", ids.len()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let results = delete_all(ctx.client.as_ref(), ids).await;
    let mut failed = 0;
    for (id, result) in &results {
        match result {
            Ok(()) => println!("{} Deleted lead {}", "✓".green(), id),
            Err(e) => {
                failed += 1;
                eprintln!("{} Lead {}: {}", "✗".red(), id, e);
            }
        }
    }

    if failed > 0 {
        return Err(Error::Other(format!(
            "{} of {} deletions failed",
            failed,
            results.len()
        )));
    }
    Ok(())
}

/// Validate the given fields and create the lead
pub async fn create_from_fields<C: LeadApi + ?Sized>(
    client: &C,
    fields: &LeadFieldArgs,
) -> Result<Lead> {
    let draft = fields.to_draft().validate()?;
    client.create_lead(&draft).await
}

/// Fetch a lead, overlay the given fields, validate, and replace it
pub async fn apply_update<C: LeadApi + ?Sized>(
    client: &C,
    id: u64,
    fields: &LeadFieldArgs,
) -> Result<Lead> {
    let current = client.get_lead(id).await?;
    let draft = fields.apply_to(LeadDraft::from(&current)).validate()?;

    debug!("Replacing lead {} with {:?}", id, draft);
    client.update_lead(id, &draft).await
}

/// Delete leads concurrently, reporting each outcome in input order
pub async fn delete_all<C: LeadApi + ?Sized>(client: &C, ids: &[u64]) -> Vec<(u64, Result<()>)> {
    let outcomes = join_all(ids.iter().map(|&id| client.delete_lead(id))).await;
    ids.iter().copied().zip(outcomes).collect()
}

fn print_rows(leads: Vec<Lead>, format: OutputFormat) -> Result<()> {
    let rows: Vec<LeadRow> = leads.into_iter().map(LeadRow::from).collect();
    rows.print(format)
}

fn print_detail(lead: Lead, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(&lead)?),
        _ => println!("{}", LeadDisplay::from(lead).render()),
    }
    Ok(())
}

//! Read-side commands: list, mine, stats.

use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::{open_repo, require_user};
use crate::error::Result;
use crate::repo::TagSummary;

/// Output for the listing commands.
#[derive(Serialize)]
struct ListOutput {
    tags: Vec<TagSummary>,
    count: usize,
}

fn print_json(rows: Vec<TagSummary>) -> Result<()> {
    let output = ListOutput { count: rows.len(), tags: rows };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

/// All tags with subscriber counts; reclaimable tags are pruned first.
pub fn execute_list(data: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut repo = open_repo(data)?;
    let rows = repo.list()?;

    if json {
        return print_json(rows);
    }

    if rows.is_empty() {
        println!("No tags yet. Create one with `tagping create <name>`.");
        return Ok(());
    }

    println!("Tags ({}):", rows.len());
    for row in &rows {
        let name = format!("#{}", row.name).cyan().bold();
        if row.description.is_empty() {
            println!("  {name} ({})", row.subscriber_count);
        } else {
            println!("  {name} ({}): {}", row.subscriber_count, row.description);
        }
    }

    Ok(())
}

/// Tags the acting user subscribes to.
pub fn execute_mine(data: Option<&PathBuf>, user: Option<i64>, json: bool) -> Result<()> {
    let user = require_user(user)?;
    let repo = open_repo(data)?;
    let rows = repo.my_tags(user);

    if json {
        return print_json(rows);
    }

    if rows.is_empty() {
        println!("You are not subscribed to any tag.");
        return Ok(());
    }

    println!("Your tags:");
    for row in &rows {
        let name = format!("#{}", row.name).cyan().bold();
        if row.description.is_empty() {
            println!("  {name}");
        } else {
            println!("  {name} - {}", row.description);
        }
    }

    Ok(())
}

/// Subscriber counts per tag; reclaimable tags are pruned first.
pub fn execute_stats(data: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut repo = open_repo(data)?;
    let rows = repo.stats()?;

    if json {
        return print_json(rows);
    }

    if rows.is_empty() {
        println!("No tags yet.");
        return Ok(());
    }

    println!("Subscribers per tag:");
    for row in &rows {
        let plural = if row.subscriber_count == 1 { "subscriber" } else { "subscribers" };
        println!(
            "  {} - {} {plural}",
            format!("#{}", row.name).cyan().bold(),
            row.subscriber_count
        );
    }

    Ok(())
}

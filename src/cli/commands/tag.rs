//! Tag mutation commands: create, subscribe, delete.

use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::{open_repo, require_user};
use crate::error::Result;

/// Output for tag creation.
#[derive(Serialize)]
struct CreateOutput {
    name: String,
    creator_id: i64,
    creator_name: String,
    description: String,
    created_at: String,
}

/// Create a tag owned by the acting user.
pub fn execute_create(
    name: &str,
    description_words: &[String],
    data: Option<&PathBuf>,
    user: Option<i64>,
    display_name: Option<&str>,
    json: bool,
) -> Result<()> {
    let user = require_user(user)?;
    let description = description_words.join(" ");
    let mut repo = open_repo(data)?;

    let tag = repo.create(name, user, display_name.unwrap_or(""), &description)?;

    if json {
        let output = CreateOutput {
            name: tag.name.clone(),
            creator_id: tag.creator_id,
            creator_name: tag.creator_name.clone(),
            description: tag.description.clone(),
            created_at: tag.created_at.to_rfc3339(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Created {}", format!("#{}", tag.name).cyan().bold());
        if !tag.description.is_empty() {
            println!("  {}", tag.description);
        }
        println!("  Subscribe with: tagping subscribe {}", tag.name);
    }

    Ok(())
}

/// Subscribe the acting user to a tag.
pub fn execute_subscribe(
    name: &str,
    data: Option<&PathBuf>,
    user: Option<i64>,
    display_name: Option<&str>,
    json: bool,
) -> Result<()> {
    let user = require_user(user)?;
    let mut repo = open_repo(data)?;

    repo.subscribe(name, user, display_name.unwrap_or(""))?;
    // The stored casing may differ from what the user typed.
    let stored = repo.find(name).map_or_else(|| name.to_string(), |t| t.name.clone());

    if json {
        let output = serde_json::json!({
            "name": stored,
            "subscriber_id": user,
            "subscribed": true,
        });
        println!("{output}");
    } else {
        println!("Subscribed to {}", format!("#{stored}").cyan().bold());
        if display_name.is_none() {
            println!("  No display name set; you will not be @-mentioned until one is known.");
        }
    }

    Ok(())
}

/// Delete a tag as the acting user, optionally with moderator privilege.
pub fn execute_delete(
    name: &str,
    admin: bool,
    data: Option<&PathBuf>,
    user: Option<i64>,
    json: bool,
) -> Result<()> {
    let user = require_user(user)?;
    let mut repo = open_repo(data)?;

    repo.delete(name, user, admin)?;

    if json {
        let output = serde_json::json!({
            "name": name,
            "deleted": true,
        });
        println!("{output}");
    } else {
        println!("Deleted {}", format!("#{name}").cyan().bold());
    }

    Ok(())
}

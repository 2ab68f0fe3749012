//! Mention command: scan free text for #tags and ping their subscribers.

use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::open_repo;
use crate::error::Result;
use crate::repo::MentionGroup;
use crate::scan::extract_candidates;

/// Output for the mention command.
#[derive(Serialize)]
struct MentionOutput {
    groups: Vec<MentionGroup>,
    count: usize,
}

/// Scan the text, resolve candidates, and print one block per matched
/// tag that has mentionable subscribers.
///
/// Each `#tag` occurrence is resolved independently; mentioning a tag
/// twice pings it twice, as the original transport did.
pub fn execute(text_words: &[String], data: Option<&PathBuf>, json: bool) -> Result<()> {
    let text = text_words.join(" ");
    let candidates = extract_candidates(&text);
    let repo = open_repo(data)?;
    let groups = repo.resolve_mentions(&candidates);

    if json {
        let output = MentionOutput { count: groups.len(), groups };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("Nobody to ping.");
        return Ok(());
    }

    for group in &groups {
        let handles: Vec<String> = group.handles.iter().map(|h| format!("@{h}")).collect();
        println!(
            "{} {}",
            format!("#{}", group.tag_name).cyan().bold(),
            handles.join(" ")
        );
    }

    Ok(())
}

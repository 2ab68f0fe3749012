//! CLI definitions using clap.
//!
//! The CLI is the dispatcher: it supplies the repository with the
//! inbound contract (command, argument tokens, numeric sender identity,
//! display name, and the externally resolved `--admin` flag for
//! deletion) and renders the structured results. The repository itself
//! never formats user-facing text.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Shells supported by the completions command.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// tagping - subscribable #tags with a durable JSON store
#[derive(Parser, Debug)]
#[command(name = "tagping", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data file path (default: ~/.tagping/tags.json)
    #[arg(long, global = true, env = "TAGPING_DATA")]
    pub data: Option<PathBuf>,

    /// Numeric identity of the acting user
    #[arg(long, global = true, env = "TAGPING_USER")]
    pub user: Option<i64>,

    /// Display name of the acting user (used for mentions)
    #[arg(long, global = true, env = "TAGPING_NAME")]
    pub display_name: Option<String>,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a tag
    Create {
        /// Tag name (case-insensitively unique, max 50 chars)
        name: String,

        /// Description (max 100 chars; remaining words are joined)
        #[arg(trailing_var_arg = true)]
        description: Vec<String>,
    },

    /// Subscribe to a tag
    Subscribe {
        /// Tag name
        name: String,
    },

    /// Delete a tag (creator only, unless --admin)
    Delete {
        /// Tag name
        name: String,

        /// Act with externally granted moderator privilege
        #[arg(long)]
        admin: bool,
    },

    /// List all tags (prunes empty ones first)
    List,

    /// List tags you subscribe to
    Mine,

    /// Subscriber counts per tag (prunes empty ones first)
    Stats,

    /// Scan text for #tags and print mention blocks
    Mention {
        /// Free text containing #tag tokens
        #[arg(trailing_var_arg = true, required = true)]
        text: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

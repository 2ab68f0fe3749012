//! tagping CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use tagping::cli::commands;
use tagping::cli::{Cli, Commands};
use tagping::error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // JSON output when asked for, or when piped into another program
    let json = cli.json || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    match &cli.command {
        Commands::Create { name, description } => commands::tag::execute_create(
            name,
            description,
            cli.data.as_ref(),
            cli.user,
            cli.display_name.as_deref(),
            json,
        ),

        Commands::Subscribe { name } => commands::tag::execute_subscribe(
            name,
            cli.data.as_ref(),
            cli.user,
            cli.display_name.as_deref(),
            json,
        ),

        Commands::Delete { name, admin } => {
            commands::tag::execute_delete(name, *admin, cli.data.as_ref(), cli.user, json)
        }

        Commands::List => commands::list::execute_list(cli.data.as_ref(), json),

        Commands::Mine => commands::list::execute_mine(cli.data.as_ref(), cli.user, json),

        Commands::Stats => commands::list::execute_stats(cli.data.as_ref(), json),

        Commands::Mention { text } => commands::mention::execute(text, cli.data.as_ref(), json),

        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}

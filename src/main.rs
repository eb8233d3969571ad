use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use kdocs::cache::CacheStore;
use kdocs::cli::args::{Cli, Commands, CompletionsArgs};
use kdocs::cli::commands;
use kdocs::config::{Config, Paths};
use kdocs::context::Context;
use kdocs::error::KdocsError;

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

/// Send logs to stderr; stdout carries the launcher feedback
fn init_tracing(verbose: bool) {
    let default = if verbose { "kdocs=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), KdocsError> {
    let cli = Cli::parse();
    let format = cli.output;
    init_tracing(cli.verbose);

    // Handle completions command early (no config or client needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let paths = Paths::new()?;

    // Handle commands that don't need the API client
    let output = match &cli.command {
        Commands::Completions(_) => unreachable!(), // Handled above
        Commands::Config(args) => {
            let mut config = Config::load_from(&paths)?;
            commands::config(&mut config, &paths, args, format)?
        }
        Commands::Cache(args) => {
            let config = Config::load_from(&paths)?;
            let cache = CacheStore::new(&paths.cache_dir);
            commands::cache::handle(&cache, &config, args, format)?
        }

        // Everything else works through the full context
        _ => {
            let ctx = Context::load(paths)?;

            match &cli.command {
                Commands::Query(args) => commands::query(&ctx, args, format)?,
                Commands::Login(args) => commands::login(&ctx, args, format)?,
                Commands::Logout => commands::logout(&ctx, format)?,
                Commands::Config(_) | Commands::Cache(_) | Commands::Completions(_) => {
                    unreachable!()
                }
            }
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

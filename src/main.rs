// src/main.rs

use clap::Parser;
use runlog::cli::{Cli, Commands};
use runlog::commands;
use runlog::config::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "runlog=debug" } else { "runlog=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> runlog::Result<()> {
    let config = Config::resolve(cli.db, cli.load_timeout_ms)?;
    match cli.command {
        Commands::Init => commands::handle_init(&config).await,
        Commands::Add { date, distance, time } => {
            commands::handle_add(&config, &date, &distance, &time).await
        }
        Commands::List { sort, num } => commands::handle_list(&config, sort, num).await,
        Commands::Session => commands::handle_session(&config).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

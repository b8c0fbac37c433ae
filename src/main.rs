// src/main.rs — session-scorer entry point

use clap::Parser;

use session_scorer::cli::{Cli, Commands};
use session_scorer::infra::config::Config;
use session_scorer::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects SESSION_SCORER_LOG / RUST_LOG)
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match cli.command {
        Some(Commands::Predict { input, explain }) => {
            session_scorer::cli::predict::run_predict(&config, input.as_deref(), explain)
        }
        Some(Commands::Schema) => session_scorer::cli::schema::run_schema(&config),
        Some(Commands::Unpack) => session_scorer::cli::unpack::run_unpack(&config),
        Some(Commands::Serve { port, host }) => {
            session_scorer::cli::serve::run_serve(config, port, host).await
        }
        None => session_scorer::cli::serve::run_serve(config, None, None).await,
    }
}

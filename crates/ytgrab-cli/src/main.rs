mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "ytgrab=info,ytgrab_core=info",
        1 => "ytgrab=debug,ytgrab_core=debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Video { url, options } => commands::download::video(&url, &options, config_path).await,
        Commands::Playlist { url, options } => {
            commands::download::playlist(&url, &options, config_path).await
        }
        Commands::Audio { url, options } => commands::download::audio(&url, &options, config_path).await,
        Commands::Description { url, output } => {
            commands::download::description(&url, output.as_deref(), config_path).await
        }
        Commands::Fetch { url, options } => commands::download::fetch(&url, &options, config_path).await,
        Commands::Doctor => commands::doctor::run().await,
        Commands::Config => commands::config::run(config_path).await,
    }
}

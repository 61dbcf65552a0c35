use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "scrollto")]
#[command(author, version, about = "Preview smooth scroll animations against a page layout")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read defaults from this file instead of ~/.config/scrollto/config.toml
    #[arg(long = "config", global = true)]
    config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scroll animation against a layout file and print every frame
    Simulate(commands::simulate::SimulateArgs),
    /// List the easing presets
    Easings,
    /// Show the effective defaults
    Config {
        /// Write the defaults to the config file if it does not exist yet
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = commands::config::load(cli.config_path.as_deref())?;

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(&config, args).await,
        Commands::Easings => commands::easings::run(),
        Commands::Config { init } => {
            commands::config::run(&config, cli.config_path.as_deref(), init)
        }
    }
}

//! xtask - Development task runner for randbst
//!
//! Usage:
//!   cargo run -p xtask -- stress [options]
//!   cargo run -p xtask -- inspect <snapshot>

mod stress;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development task runner for randbst")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a tree, then drain it, verifying along the way
    Stress(stress::StressArgs),
    /// Load a snapshot file and report its shape
    Inspect(stress::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,randbst=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stress(args) => stress::run(&args),
        Commands::Inspect(args) => stress::inspect(&args),
    }
}

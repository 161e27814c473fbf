//! Plateverb CLI - inspect the plate reverb's controls, presets and derived coefficients.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plateverb")]
#[command(author, version, about = "Plateverb stereo plate reverb CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every control with its range and default
    Params(commands::params::ParamsArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),

    /// Build an engine and print the values derived for one block
    Inspect(commands::inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Params(args) => commands::params::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    }
}

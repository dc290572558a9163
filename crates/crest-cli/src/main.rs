use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "crest",
    about = "Crest — node-scoring policy for the VM scheduler plugin",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a scheduler policy file.
    ///
    /// Exits non-zero on the first violation, naming the offending JSON
    /// path. Suitable as a CI gate or an init-container check before the
    /// scheduler pod picks the document up.
    Validate {
        /// Policy file to check
        #[arg(short, long, default_value = crest_config::DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Sample the scoring curve a policy file describes.
    ///
    /// Prints the deterministic score at evenly spaced usage fractions,
    /// one column per node scale, so a parameter change can be inspected
    /// before rollout. Randomization is ignored here.
    Curve {
        /// Policy file to sample
        #[arg(short, long, default_value = crest_config::DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Node scale(s) to plot, repeatable (1 = the largest node)
        #[arg(short, long, default_value = "1.0")]
        scale: Vec<f64>,
        /// Number of sample points across [0, 1]
        #[arg(short = 'n', long, default_value = "11")]
        samples: usize,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crest=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => commands::validate::run(&config),
        Commands::Curve {
            config,
            scale,
            samples,
            json,
        } => commands::curve::run(&config, &scale, samples, json),
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use hcatool::config::Config;
use hcatool::output::{terminal, LoadSummary};

/// hcatool: turn HCA topic-model output into count tables and posterior estimates.
///
/// Reads `<datastem>.tokens` / `<datastem>.documents` and
/// `<fitstem>.ndt` / `.nwt` / `.par`, validates them against each other,
/// and reports what was loaded.
#[derive(Parser)]
#[command(name = "hcatool", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a fit, then print a summary
    Check {
        /// Corpus path prefix (default: HCATOOL_DATA_STEM)
        datastem: Option<String>,

        /// Fit path prefix (default: HCATOOL_FIT_STEM)
        fitstem: Option<String>,

        /// Only load the count files; skip the .par file and estimates
        #[arg(long)]
        counts_only: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hcatool=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            datastem,
            fitstem,
            counts_only,
            json,
        } => {
            let config = Config::load()?;
            let stems = config.require_stems(datastem, fitstem)?;
            info!(data_stem = %stems.data, fit_stem = %stems.fit, "Checking fit");

            let summary = if counts_only {
                let counts = hcatool::load_counts_with_report(&stems.data, &stems.fit)?;
                LoadSummary::from_counts(&stems.data, &stems.fit, &counts)
            } else {
                let posterior = hcatool::load_posterior(&stems.data, &stems.fit)?;
                LoadSummary::from_posterior(
                    &stems.data,
                    &stems.fit,
                    &posterior,
                    config.row_sum_tolerance,
                )
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                terminal::display_summary(&summary);
            }

            if summary.posterior.as_ref().is_some_and(|p| !p.within_tolerance) {
                anyhow::bail!(
                    "posterior rows do not sum to 1 within {}",
                    config.row_sum_tolerance
                );
            }
            if !json {
                println!("{}", "Fit loaded and validated.".bold());
            }
        }
    }

    Ok(())
}

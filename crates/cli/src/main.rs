//! Nexus CLI - offline tools over the dashboard's mock data store.
//!
//! # Usage
//!
//! ```bash
//! # Export the overview stats to stdout
//! nexus-cli export overview
//!
//! # Export completed transactions matching "bond" to a file
//! nexus-cli export sales --search bond --completed-only -o sales.csv
//!
//! # Log the size of every dataset
//! nexus-cli summary
//! ```
//!
//! # Commands
//!
//! - `export` - Write a dataset as CSV, using the dashboard's export format
//! - `summary` - Log dataset sizes

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "nexus-cli")]
#[command(author, version, about = "Nexus dashboard CLI tools")]
struct Cli {
    /// Make every data accessor fail
    #[arg(long, global = true, env = "NEXUS_API_OFFLINE")]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a dataset as CSV
    Export {
        /// Dataset to export
        dataset: Dataset,

        /// Search filter (customers: name or email, sales: invoice or customer)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only completed transactions (sales only)
        #[arg(long)]
        completed_only: bool,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Log the size of every dataset
    Summary,
}

/// Exportable datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dataset {
    Overview,
    Notifications,
    Customers,
    Sales,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    // Load .env before clap reads NEXUS_API_OFFLINE
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let api = commands::connect(cli.offline)?;

    match cli.command {
        Commands::Export {
            dataset,
            search,
            completed_only,
            output,
        } => {
            let filter = commands::export::ExportFilter {
                search,
                completed_only,
            };
            let csv = commands::export::build(&api, dataset, &filter).await?;
            commands::export::write(&csv, output.as_deref())?;
        }
        Commands::Summary => commands::summary::run(&api).await?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["nexus-cli", "export", "sales", "--offline"]).unwrap();
        assert!(cli.offline);
        assert!(matches!(
            cli.command,
            Commands::Export {
                dataset: Dataset::Sales,
                ..
            }
        ));
    }

    #[test]
    fn test_offline_flag_rejects_value() {
        assert!(Cli::try_parse_from(["nexus-cli", "--offline=maybe", "summary"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

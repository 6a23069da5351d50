//! billing-reports - administration backend for the billing-reports dashboard

#![allow(missing_docs)]

use billing_reports::server;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "billing-reports", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(
        short,
        long,
        env = "BILLING_REPORTS_CONFIG",
        default_value = "config/billing-reports.yaml"
    )]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match server::builder::run_server(&cli.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display rather than Debug to keep newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

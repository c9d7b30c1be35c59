//! macprobe CLI
//!
//! Scans the local host: identifies the macOS edition and inventories
//! installed application bundles.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use macprobe_exec::LocalExecutor;
use macprobe_scan::{HostScanner, detect_macos, run_scan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "macprobe")]
#[command(about = "macOS host identification and application inventory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the OS edition and scan installed application bundles
    Scan {
        /// Emit the full result as JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Detect the OS edition only
    Os,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let executor = Arc::new(LocalExecutor::new());

    let scanner = detect_macos(executor)
        .await?
        .ok_or_else(|| eyre!("this host does not answer to sw_vers; not a macOS host"))?;

    match cli.command {
        Commands::Os => {
            let os = scanner.os();
            println!("{} {}", os.family, os.version);
        }
        Commands::Scan { json } => {
            let result = run_scan(Box::new(scanner)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} {}", result.os.family, result.os.version);
                for pkg in result.packages.sorted_by_name() {
                    if pkg.version.is_empty() {
                        println!("{}", pkg.name);
                    } else {
                        println!("{} {}", pkg.name, pkg.version);
                    }
                }
                for warning in &result.warnings {
                    eprintln!("warning: {warning}");
                }
            }
        }
    }

    Ok(())
}

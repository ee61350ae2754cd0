//! # Daybook CLI (`dbk`)
//!
//! A small host around the aggregation engine: it serves the configured
//! vault directory through the filesystem store, renders matched notes with
//! the built-in line renderer, and prints the resulting view.
//!
//! ## Usage
//!
//! ```bash
//! dbk --config ./daybook.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dbk view` | Open the aggregation view and print every region in order |
//! | `dbk list` | Print matching basenames with their date keys |

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use daybook::config::load_config;
use daybook::engine::{aggregate, View};
use daybook::navigate::LoggingNavigator;
use daybook::render::LineRenderer;
use daybook::store::fs::FsStore;
use daybook::store::DocumentStore;

/// Daybook — aggregate dated notes into a single chronological view.
#[derive(Parser)]
#[command(
    name = "dbk",
    about = "Daybook — aggregate dated notes into a single chronological view",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./daybook.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the view over the configured vault and print it.
    View,
    /// List documents matching the date pattern, in sort order.
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let store = Arc::new(FsStore::new(&config.store)?);

    match cli.command {
        Commands::View => {
            let view = View::new(store, Arc::new(LineRenderer), Arc::new(LoggingNavigator));
            view.open(&config.view).await?;

            for region in view.regions() {
                println!("## {}", region.heading);
                if region.degraded {
                    println!("  (content unavailable)");
                } else {
                    for block in region.body.blocks() {
                        println!("  {}", block);
                    }
                    for interaction in region.interactions() {
                        println!("  [{:?}: {}]", interaction.kind, interaction.target);
                    }
                }
                println!();
            }

            view.close();
        }
        Commands::List => {
            let documents = store.list_documents().await?;
            let dated = aggregate(documents, &config.view.pattern(), config.view.sort);
            for entry in &dated {
                println!("{}  {}", entry.key, entry.document.path);
            }
            println!("{} matching documents", dated.len());
        }
    }

    Ok(())
}

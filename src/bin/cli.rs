//! Sitemapper CLI
//!
//! Batch/build-time entry point: reads a JSON seed file of entries, writes
//! sharded sitemap files plus the index into an output directory, and keeps
//! a JSON change log alongside them.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use sitemapper::{
    changelog::{ChangeLog, JsonChangeLog},
    config::Config,
    error::Result,
    pipeline::{IncrementalCoordinator, SitemapGenerator},
    providers::{FileProvider, UrlProvider},
    storage::LocalStorage,
};

/// Sitemapper - Sitemap Index Generator
#[derive(Parser, Debug)]
#[command(
    name = "sitemapper",
    version,
    about = "Generates and incrementally maintains sharded sitemap indexes"
)]
struct Cli {
    /// Output directory containing config.toml, generated files, and the
    /// change log
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Path to a JSON seed file of entries
    #[arg(short, long, default_value = "entries.json")]
    entries: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a full generation pass
    Generate,

    /// Regenerate if the change log has records since the given time
    Incremental {
        /// RFC 3339 timestamp, e.g. 2026-08-23T00:00:00Z
        #[arg(long)]
        since: DateTime<Utc>,
    },

    /// List change records
    Changes {
        /// RFC 3339 timestamp; omit to list the full log
        #[arg(long)]
        since: Option<DateTime<Utc>>,
    },

    /// Validate configuration
    Validate,

    /// Show current output info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn build_coordinator(cli: &Cli, config: &Config) -> IncrementalCoordinator {
    let provider: Arc<dyn UrlProvider> = Arc::new(FileProvider::new(&cli.entries));
    let storage = Arc::new(LocalStorage::new(&cli.storage_dir, &config.base_url));
    let generator = SitemapGenerator::new(vec![provider], storage, config.clone());
    let change_log = Arc::new(JsonChangeLog::new(cli.storage_dir.join("changes.json")));

    IncrementalCoordinator::new(generator, change_log).with_auto_track(config.auto_track)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);

    match cli.command {
        Command::Generate => {
            config.validate()?;
            let coordinator = build_coordinator(&cli, &config);

            let summary = coordinator.generate_full().await?;
            log::info!(
                "Wrote {} entries across {} shards",
                summary.entry_count,
                summary.shard_count
            );
            log::info!("Index: {}", summary.index_url);
        }

        Command::Incremental { since } => {
            config.validate()?;
            let coordinator = build_coordinator(&cli, &config);

            let outcome = coordinator.generate_incremental(since).await?;
            match outcome {
                sitemapper::pipeline::IncrementalOutcome::NoChanges => {
                    log::info!("No changes since {since}, nothing to do");
                }
                sitemapper::pipeline::IncrementalOutcome::Regenerated { diff, summary } => {
                    log::info!(
                        "Regenerated {} shards ({} added, {} updated, {} removed)",
                        summary.shard_count,
                        diff.added.len(),
                        diff.updated.len(),
                        diff.removed.len()
                    );
                }
            }
        }

        Command::Changes { since } => {
            let coordinator = build_coordinator(&cli, &config);
            let changes = coordinator.changes_since(since).await?;

            log::info!("{} change records", changes.len());
            for change in changes {
                log::info!("{:?} {} at {}", change.kind, change.url, change.timestamp);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());

            let index_path = cli.storage_dir.join(&config.filename);
            log::info!(
                "Index: {}",
                if index_path.exists() {
                    "exists"
                } else {
                    "not found"
                }
            );

            let changes_path = cli.storage_dir.join("changes.json");
            if changes_path.exists() {
                let log_backend = JsonChangeLog::new(&changes_path);
                let count = log_backend.changes_since(None).await?.len();
                log::info!("Change log: {} records", count);
            } else {
                log::info!("Change log: empty");
            }
        }
    }

    Ok(())
}

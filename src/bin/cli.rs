//! pci-watch CLI
//!
//! Local execution entry point: run one extraction-filter-dedup-notify pass
//! over the regional listing, validate configuration, or inspect the seen
//! store.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pci_watch::{
    config::Config,
    error::Result,
    pipeline,
    services::{CallMeBotNotifier, DryRunNotifier, HttpFetcher, Notifier},
    storage::SeenStore,
};

/// pci-watch - Concurso Listing Watcher
#[derive(Parser, Debug)]
#[command(
    name = "pci-watch",
    version,
    about = "Watches PCI Concursos regional listings and notifies on new announcements"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one pipeline pass over the listing page
    Run {
        /// Log messages instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Show seen-store statistics
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Run { dry_run } => {
            config.validate()?;

            let fetcher = HttpFetcher::new(&config.crawler)?;
            let notifier: Box<dyn Notifier> = if dry_run {
                Box::new(DryRunNotifier)
            } else {
                let transport = config.notifier.resolved();
                if !transport.is_configured() {
                    log::warn!(
                        "CallMeBot credentials not configured; records will be admitted without notification"
                    );
                }
                Box::new(CallMeBotNotifier::new(&transport)?)
            };

            let mut store = SeenStore::load(&config.storage.seen_file);
            let outcome =
                pipeline::run_pipeline(&config, &fetcher, notifier.as_ref(), &mut store).await?;

            log::info!(
                "Done in {}s: {} new announcement(s)",
                (outcome.finished_at - outcome.started_at).num_seconds(),
                outcome.admitted
            );
        }

        Command::Validate => {
            config.validate()?;
            log::info!("Config OK: {} region(s), {} schooling level(s)",
                config.filter.estados.len(),
                config.filter.escolaridades.len()
            );
        }

        Command::Info => {
            let store = SeenStore::load(&config.storage.seen_file);
            log::info!("Seen store: {}", store.path().display());
            log::info!("Announcements recorded: {}", store.len());
        }
    }

    Ok(())
}

//! Command-line host for the listing map.
//!
//! ```text
//! listing-map [--config FILE] [--out FILE] [QUERY]
//! ```
//!
//! `QUERY` is the page query string, e.g. `"user_id=42&lat=41.3&lon=69.2"`.
//! Listings are fetched through the background worker and the rendered page
//! is written to `--out` or stdout.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use listing_map::app::{handle_event, Action, Event, HostCapabilities, MapSession};
use listing_map::infrastructure::api::HttpListingSource;
use listing_map::infrastructure::paths;
use listing_map::observability::init_tracing;
use listing_map::storage::JsonClientStorage;
use listing_map::worker::{ListingsWorker, WorkerHandle};
use listing_map::{initialize, ui, Config, ListingMapError, PageQuery, Result};

/// Renders the listing map page for one page query.
#[derive(Parser, Debug)]
#[command(name = "listing-map")]
#[command(about = "Render the rental listing map page")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the page here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Page query string, e.g. "user_id=42&lat=41.3&lon=69.2"
    query: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("listing-map: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let data_dir = paths::get_data_dir();
    init_tracing(&config, &data_dir);

    let storage_path = config
        .storage_path
        .clone()
        .unwrap_or_else(|| paths::storage_path(&data_dir));
    let mut storage = JsonClientStorage::open(storage_path)?;
    tracing::debug!(path = %storage.path().display(), "client storage opened");

    let query = PageQuery::parse(args.query.as_deref().unwrap_or_default());
    let mut session = initialize(&config, &query, &mut storage, HostCapabilities::default())?;
    let theme = config.load_theme();

    let source = HttpListingSource::new(
        config.api_base.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    tracing::debug!(api_base = source.api_base(), "listings source ready");
    let mut worker = ListingsWorker::new(source).spawn();

    let pending = dispatch(&mut session, &worker, &Event::ListingsRequested)?;
    for _ in 0..pending {
        let Some(response) = worker.recv().await else {
            return Err(ListingMapError::Worker("worker stopped before responding".to_string()));
        };
        dispatch(&mut session, &worker, &Event::WorkerResponse(response))?;
    }

    let html = ui::render(&session, &theme);
    match &args.out {
        Some(path) => std::fs::write(path, html)?,
        None => println!("{html}"),
    }

    tracing::info!(listings = session.stats_count(), "page rendered");
    Ok(())
}

/// Runs one event and carries out its actions; returns how many worker
/// requests were posted.
fn dispatch(session: &mut MapSession, worker: &WorkerHandle, event: &Event) -> Result<usize> {
    let (_, actions) = handle_event(session, event)?;
    let mut posted = 0;
    for action in actions {
        match action {
            Action::PostToWorker(message) => {
                worker.post(message)?;
                posted += 1;
            }
            Action::ShowNotice(notice) => eprintln!("{}", notice.message()),
            other => tracing::debug!(action = ?other, "action has no effect in the command-line host"),
        }
    }
    Ok(posted)
}

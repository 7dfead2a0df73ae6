use chrono::Utc;
use happenstance_core::config::{LoggingSettings, Settings};
use happenstance_core::core::{filter_events_by_window, CompatibilityTable, PairingEngine};
use happenstance_core::models::{Event, Restaurant};
use happenstance_core::services::{
    build_snapshot, load_records, output::META_FILE, persist_snapshot, PreviousMetaStore, SnapshotError,
};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn run(settings: &Settings) -> Result<(), SnapshotError> {
    let compatibility = match &settings.compatibility_table {
        Some(path) => {
            info!("Loading compatibility table from {}", path.display());
            CompatibilityTable::from_path(path)?
        }
        None => CompatibilityTable::default(),
    };

    let engine = PairingEngine::new(settings.region.clone(), settings.pairing)
        .with_tiers(settings.distance_tiers)
        .with_compatibility(compatibility);

    let now = Utc::now();
    let restaurants: Vec<Restaurant> = load_records(&settings.paths.restaurants, "restaurants")?;
    let events: Vec<Event> = load_records(&settings.paths.events, "events")?;
    let events = filter_events_by_window(events, settings.event_window_days, now);

    // Read the previous hashes fully before anything new is computed
    let meta_path = settings.paths.output_dir.join(META_FILE);
    let store = PreviousMetaStore::load(&meta_path).unwrap_or_else(|e| {
        warn!("Ignoring unreadable previous meta ({}), treating run as first", e);
        PreviousMetaStore::default()
    });
    debug!(entries = store.len(), "Loaded previous content hashes");

    let snapshot = build_snapshot(settings, &engine, restaurants, events, &store, now)?;
    persist_snapshot(&settings.paths.output_dir, &snapshot)?;

    info!(
        "Published {} pairings to {}",
        snapshot.meta.pairings.len(),
        settings.paths.output_dir.display()
    );
    Ok(())
}

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let loaded = Settings::load(None);
    let logging = loaded
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    let settings = loaded.unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    info!(profile = %settings.profile, region = %settings.region, "Building Happenstance snapshot");

    if let Err(e) = run(&settings) {
        error!("Snapshot run aborted: {}", e);
        std::process::exit(1);
    }
}

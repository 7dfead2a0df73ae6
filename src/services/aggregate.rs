use chrono::{DateTime, Utc};

use crate::config::Settings;
use crate::core::{compatibility::normalize, compute_meta, HashError, HashStore, PairingEngine};
use crate::models::{ConfigDocument, Event, MetaDocument, PublishedCollection, Restaurant, SearchParams};

/// Everything one run publishes
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub restaurants: PublishedCollection<Restaurant>,
    pub events: PublishedCollection<Event>,
    pub meta: MetaDocument,
    pub config: ConfigDocument,
}

/// Pair, hash and assemble the documents for one run
///
/// Pairing runs before hashing so the published restaurant list, including
/// stamped `match_reason` fields, is exactly what the hash covers. The
/// store is only read.
pub fn build_snapshot(
    settings: &Settings,
    engine: &PairingEngine,
    mut restaurants: Vec<Restaurant>,
    events: Vec<Event>,
    store: &dyn HashStore,
    now: DateTime<Utc>,
) -> Result<Snapshot, HashError> {
    let pairing = engine.build_pairings(&events, &mut restaurants);

    let restaurants_meta = compute_meta("restaurants", &settings.profile, &restaurants, store)?;
    let events_meta = compute_meta("events", &settings.profile, &events, store)?;

    let gap_bullets = gap_bullets(
        &settings.target_cuisines,
        restaurants.iter().map(|r| r.cuisine.as_str()),
    )
    .into_iter()
    .chain(gap_bullets(
        &settings.target_categories,
        events.iter().map(|e| e.category.as_str()),
    ))
    .collect();

    let config = engine.config();
    let meta = MetaDocument {
        generated_at: now,
        profile: settings.profile.clone(),
        region: settings.region.clone(),
        branding: settings.branding.clone(),
        pairing_rules: settings.pairing_rules.clone(),
        search: SearchParams {
            mode: settings.search.mode.clone(),
            radius_km: config.radius_km,
            limit: config.limit,
        },
        gap_bullets,
        events: events_meta.clone(),
        restaurants: restaurants_meta.clone(),
        pairings: pairing.pairings,
    };

    tracing::info!(
        restaurants = restaurants.len(),
        events = events.len(),
        pairings = meta.pairings.len(),
        dropped_events = pairing.dropped_events,
        restaurants_changed = restaurants_meta.changed,
        events_changed = events_meta.changed,
        "Snapshot assembled"
    );

    Ok(Snapshot {
        restaurants: PublishedCollection {
            items: restaurants,
            meta: restaurants_meta,
        },
        events: PublishedCollection {
            items: events,
            meta: events_meta,
        },
        config: ConfigDocument {
            branding: settings.branding.clone(),
            pairing_rules: settings.pairing_rules.clone(),
        },
        meta,
    })
}

/// Targets with no matching record this run, in target order
pub fn gap_bullets<'a>(targets: &[String], present: impl Iterator<Item = &'a str>) -> Vec<String> {
    let present: Vec<String> = present.map(normalize).collect();
    targets
        .iter()
        .filter(|target| !present.contains(&normalize(target)))
        .map(|target| format!("No {} picks in this snapshot yet", target.trim()))
        .collect()
}

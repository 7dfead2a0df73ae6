use geo::Point;
use serde::{Deserialize, Serialize};

use crate::core::{
    compatibility::CompatibilityTable,
    distance::{distance_miles, km_to_miles, round_tenth},
};
use crate::models::{Event, Pairing, Restaurant};

/// Search configuration for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairingConfig {
    /// Maximum distance considered "nearby"
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    /// Maximum alternates listed per pairing
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Pair events nobody could locate with the first usable restaurant
    /// instead of dropping them
    #[serde(default)]
    pub pair_without_coordinates: bool,
}

fn default_radius_km() -> f64 { 1.6 }
fn default_limit() -> usize { 3 }

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            limit: default_limit(),
            pair_without_coordinates: false,
        }
    }
}

/// Thresholds for the verbal distance clause
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceTiers {
    #[serde(default = "default_walking_max")]
    pub walking_max_miles: f64,
    #[serde(default = "default_short_drive_max")]
    pub short_drive_max_miles: f64,
}

fn default_walking_max() -> f64 { 0.5 }
fn default_short_drive_max() -> f64 { 2.0 }

impl Default for DistanceTiers {
    fn default() -> Self {
        Self {
            walking_max_miles: default_walking_max(),
            short_drive_max_miles: default_short_drive_max(),
        }
    }
}

impl DistanceTiers {
    pub fn describe(&self, miles: f64) -> String {
        if miles < self.walking_max_miles {
            format!("{:.1} mi - walking distance", miles)
        } else if miles < self.short_drive_max_miles {
            format!("{:.1} mi - short drive", miles)
        } else {
            format!("{:.1} mi away", miles)
        }
    }
}

/// Output of one pairing pass
#[derive(Debug, Clone, Default)]
pub struct PairingResult {
    pub pairings: Vec<Pairing>,
    /// Input position of each pairing's primary restaurant
    pub primaries: Vec<usize>,
    /// Events that produced no pairing
    pub dropped_events: usize,
}

/// A restaurant eligible for matching, keyed by input position
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    index: usize,
    restaurant: &'a Restaurant,
    point: Option<Point<f64>>,
}

/// Greedy, explainable event → restaurant pairing
///
/// # Per-event pipeline
/// 1. Distance to every well-formed restaurant
/// 2. In-range partition, ranked by distance (stable on input order)
/// 3. Nearest in range, else nearest overall, else no pairing
/// 4. Reason = location; distance tier; compatibility phrase
#[derive(Debug, Clone)]
pub struct PairingEngine {
    region: String,
    config: PairingConfig,
    tiers: DistanceTiers,
    compatibility: CompatibilityTable,
}

impl PairingEngine {
    pub fn new(region: impl Into<String>, config: PairingConfig) -> Self {
        Self {
            region: region.into(),
            config,
            tiers: DistanceTiers::default(),
            compatibility: CompatibilityTable::default(),
        }
    }

    pub fn with_tiers(mut self, tiers: DistanceTiers) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn with_compatibility(mut self, compatibility: CompatibilityTable) -> Self {
        self.compatibility = compatibility;
        self
    }

    pub fn config(&self) -> &PairingConfig {
        &self.config
    }

    /// Pair every event, in input order, without touching the inputs
    pub fn pair(&self, events: &[Event], restaurants: &[Restaurant]) -> PairingResult {
        let candidates: Vec<Candidate<'_>> = restaurants
            .iter()
            .enumerate()
            .filter_map(|(index, restaurant)| match restaurant.well_formed() {
                Ok(point) => Some(Candidate {
                    index,
                    restaurant,
                    point,
                }),
                Err(e) => {
                    tracing::warn!(index, name = %restaurant.name, error = %e, "Skipping malformed restaurant");
                    None
                }
            })
            .collect();

        let mut result = PairingResult::default();

        for (position, event) in events.iter().enumerate() {
            let point = match event.well_formed() {
                Ok(point) => point,
                Err(e) => {
                    tracing::warn!(index = position, title = %event.title, error = %e, "Skipping malformed event");
                    result.dropped_events += 1;
                    continue;
                }
            };

            match self.pair_event(event, point, &candidates) {
                Some((pairing, primary)) => {
                    result.pairings.push(pairing);
                    result.primaries.push(primary);
                }
                None => {
                    tracing::debug!(title = %event.title, "No restaurant with a usable distance");
                    result.dropped_events += 1;
                }
            }
        }

        result
    }

    /// Pair events and stamp `match_reason` on first-time primary matches
    pub fn build_pairings(&self, events: &[Event], restaurants: &mut [Restaurant]) -> PairingResult {
        let result = self.pair(events, restaurants);
        stamp_match_reasons(restaurants, &result);
        result
    }

    fn pair_event(
        &self,
        event: &Event,
        event_point: Option<Point<f64>>,
        candidates: &[Candidate<'_>],
    ) -> Option<(Pairing, usize)> {
        let mut ranked: Vec<(Candidate<'_>, f64)> = candidates
            .iter()
            .filter_map(|c| distance_miles(event_point, c.point).map(|d| (*c, d)))
            .collect();

        // Stable: equal distances keep input order
        ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let radius_miles = km_to_miles(self.config.radius_km);
        let in_range: Vec<(Candidate<'_>, f64)> = ranked
            .iter()
            .copied()
            .filter(|(_, d)| *d <= radius_miles)
            .collect();

        // Published and described distances share one rounding
        let (primary, distance) = match in_range.first().or_else(|| ranked.first()) {
            Some((candidate, d)) => (*candidate, Some(round_tenth(*d))),
            None if self.config.pair_without_coordinates => (*candidates.first()?, None),
            None => return None,
        };

        let nearby_restaurants = in_range
            .iter()
            .filter(|(c, _)| c.index != primary.index)
            .take(self.config.limit)
            .map(|(c, _)| c.restaurant.summary())
            .collect();

        let restaurant = primary.restaurant;
        let pairing = Pairing {
            event: event.title.clone(),
            restaurant: restaurant.name.clone(),
            match_reason: self.match_reason(event, restaurant, distance),
            event_url: event.url.clone(),
            restaurant_url: restaurant.url.clone(),
            event_date: event.date,
            event_location: event.location.clone(),
            distance_miles: distance,
            nearby_restaurants,
        };

        Some((pairing, primary.index))
    }

    fn match_reason(&self, event: &Event, restaurant: &Restaurant, distance: Option<f64>) -> String {
        let mut clauses = Vec::with_capacity(3);

        let region = self.region.trim();
        if !region.is_empty() {
            clauses.push(format!("Located in {}", region));
        }
        if let Some(miles) = distance {
            clauses.push(self.tiers.describe(miles));
        }
        clauses.push(self.compatibility.phrase(&event.category, &restaurant.cuisine));

        clauses.join("; ")
    }
}

/// Copy each pairing's reason onto its primary restaurant, first pairing wins
pub fn stamp_match_reasons(restaurants: &mut [Restaurant], result: &PairingResult) {
    let mut stamped = vec![false; restaurants.len()];
    for (pairing, &index) in result.pairings.iter().zip(&result.primaries) {
        if let Some(restaurant) = restaurants.get_mut(index) {
            if !stamped[index] {
                restaurant.match_reason = Some(pairing.match_reason.clone());
                stamped[index] = true;
            }
        }
    }
}

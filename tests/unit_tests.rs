// Unit tests for Happenstance core

use happenstance_core::core::{
    canonical_json, canonicalize, compute_meta, content_digest,
    distance::{distance_miles, haversine_miles, km_to_miles},
    CompatibilityTable, DistanceTiers,
};
use happenstance_core::models::Restaurant;
use serde_json::{json, Value};
use std::collections::HashMap;

fn create_restaurant(name: &str, cuisine: &str, rating: Option<f64>) -> Restaurant {
    Restaurant {
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        address: "Troy, NY".to_string(),
        url: format!("https://example.com/{}", name.to_lowercase()),
        rating,
        price_level: Some(2),
        match_reason: None,
        latitude: Some(42.7284),
        longitude: Some(-73.6918),
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_miles(42.7284, -73.6918, 42.7284, -73.6918);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_troy_to_albany() {
    // Downtown Troy to downtown Albany is roughly 6 miles as the crow flies
    let distance = haversine_miles(42.7284, -73.6918, 42.6526, -73.7562);
    assert!(distance > 5.0 && distance < 10.0, "got {}", distance);
}

#[test]
fn test_haversine_short_distance() {
    let distance = haversine_miles(37.7749, -122.4194, 37.7820, -122.4194);
    assert!(distance > 0.0 && distance < 1.0);
}

#[test]
fn test_distance_unavailable_without_coordinates() {
    assert!(distance_miles(None, Some(geo::Point::new(-73.69, 42.73))).is_none());
}

#[test]
fn test_radius_conversion() {
    // 800 m is about half a mile
    let miles = km_to_miles(0.8);
    assert!((miles - 0.497).abs() < 0.001);
}

#[test]
fn test_tier_boundaries() {
    let tiers = DistanceTiers::default();
    assert!(tiers.describe(0.49).ends_with("walking distance"));
    assert!(tiers.describe(0.5).ends_with("short drive"));
    assert!(tiers.describe(1.99).ends_with("short drive"));
    assert_eq!(tiers.describe(2.0), "2.0 mi away");
}

#[test]
fn test_compatibility_is_case_insensitive() {
    let table = CompatibilityTable::default();
    assert_eq!(table.phrase("SPORTS", "bbq"), "Bbq is great sports event food");
    assert_eq!(table.phrase("Sports", "BBQ"), "BBQ is great sports event food");
}

#[test]
fn test_compatibility_generic_branch_never_fails() {
    let table = CompatibilityTable::default();
    for category in ["", "  ", "unknown thing", "🎉"] {
        let phrase = table.phrase(category, "Tapas");
        assert!(phrase.contains("Tapas"), "{} -> {}", category, phrase);
    }
}

#[test]
fn test_hash_is_deterministic_for_records() {
    let restaurants = vec![
        create_restaurant("Alpha", "Seafood", Some(4.5)),
        create_restaurant("Beta", "Italian", None),
    ];

    let first = content_digest(&canonicalize("restaurants", &restaurants).unwrap());
    let second = content_digest(&canonicalize("restaurants", &restaurants.clone()).unwrap());
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_struct_and_reordered_json_hash_identically() {
    let restaurant = create_restaurant("Alpha", "Seafood", Some(4.5));
    let reordered: Value = serde_json::from_str(
        r#"{"url": "https://example.com/alpha", "longitude": -73.6918, "latitude": 42.7284,
            "price_level": 2, "rating": 4.5, "address": "Troy, NY", "cuisine": "Seafood", "name": "Alpha"}"#,
    )
    .unwrap();

    let from_struct = canonicalize("restaurants", &[restaurant]).unwrap();
    let from_json = canonicalize("restaurants", &[reordered]).unwrap();
    assert_eq!(from_struct, from_json);
}

#[test]
fn test_canonical_numbers_have_single_form() {
    assert_eq!(canonical_json(&json!([4.0, 4.5, 10, -0.25])), "[4.0,4.5,10,-0.25]");
}

#[test]
fn test_changed_flag_against_previous_hash() {
    let restaurants = vec![create_restaurant("Alpha", "Seafood", Some(4.5))];
    let first = compute_meta("restaurants", "default", &restaurants, &HashMap::<String, String>::new()).unwrap();
    assert!(first.changed);

    let mut store = HashMap::new();
    store.insert("restaurants:default".to_string(), first.hash.clone());
    assert!(!compute_meta("restaurants", "default", &restaurants, &store).unwrap().changed);

    let edited = vec![create_restaurant("Alpha", "Seafood", Some(4.6))];
    let meta = compute_meta("restaurants", "default", &edited, &store).unwrap();
    assert!(meta.changed);
    assert_ne!(meta.hash, first.hash);
}

#[test]
fn test_shipped_table_matches_builtin_default() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/compatibility.toml");
    let shipped = CompatibilityTable::from_path(path).unwrap();
    assert_eq!(shipped, CompatibilityTable::default());
}

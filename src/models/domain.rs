use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Restaurant record as produced by the fetch/normalize stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Restaurant {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub url: String,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[validate(range(max = 4))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Restaurant {
    /// Validated position, `Ok(None)` when the record was never geocoded
    pub fn coordinates(&self) -> Result<Option<Point<f64>>, CoordinateError> {
        locate(self.latitude, self.longitude)
    }

    /// A restaurant may be offered as a match only if this holds
    pub fn is_well_formed(&self) -> bool {
        self.well_formed().is_ok()
    }

    /// Validated position of a record fit for matching, or why it isn't
    pub fn well_formed(&self) -> Result<Option<Point<f64>>, RecordError> {
        self.validate()?;
        Ok(self.coordinates()?)
    }

    pub fn summary(&self) -> NearbyRestaurant {
        NearbyRestaurant {
            name: self.name.clone(),
            cuisine: self.cuisine.clone(),
            url: self.url.clone(),
            rating: self.rating,
        }
    }
}

/// Event record as produced by the fetch/normalize stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Event {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Event {
    pub fn coordinates(&self) -> Result<Option<Point<f64>>, CoordinateError> {
        locate(self.latitude, self.longitude)
    }

    pub fn is_well_formed(&self) -> bool {
        self.well_formed().is_ok()
    }

    pub fn well_formed(&self) -> Result<Option<Point<f64>>, RecordError> {
        self.validate()?;
        Ok(self.coordinates()?)
    }
}

/// Why a record's coordinates can't be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("only one of latitude/longitude is set")]
    Partial,
    #[error("coordinate is not a finite number")]
    NonFinite,
    #[error("coordinate is outside valid degrees")]
    OutOfRange,
}

/// Why a record is excluded from pairing
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid field: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unusable coordinates: {0}")]
    Coordinates(#[from] CoordinateError),
}

fn locate(latitude: Option<f64>, longitude: Option<f64>) -> Result<Option<Point<f64>>, CoordinateError> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => {
            if !lat.is_finite() || !lon.is_finite() {
                return Err(CoordinateError::NonFinite);
            }
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(CoordinateError::OutOfRange);
            }
            Ok(Some(Point::new(lon, lat)))
        }
        _ => Err(CoordinateError::Partial),
    }
}

/// Alternate restaurant listed under a pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyRestaurant {
    pub name: String,
    pub cuisine: String,
    pub url: String,
    pub rating: Option<f64>,
}

/// Event matched with its primary restaurant and nearby alternates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub event: String,
    pub restaurant: String,
    pub match_reason: String,
    pub event_url: String,
    pub restaurant_url: String,
    pub event_date: DateTime<Utc>,
    pub event_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    #[serde(default)]
    pub nearby_restaurants: Vec<NearbyRestaurant>,
}

/// Content hash summary carried by the `_meta` sentinel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMeta {
    pub hash: String,
    pub item_count: usize,
    pub changed: bool,
}

use geo::Point;

/// Earth's radius in miles
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Kilometres per statute mile
const KM_PER_MILE: f64 = 1.609344;

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in miles
#[inline]
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Distance between two optional positions
///
/// Returns `None` when either side was never geocoded. Points carry
/// longitude as `x` and latitude as `y`.
#[inline]
pub fn distance_miles(from: Option<Point<f64>>, to: Option<Point<f64>>) -> Option<f64> {
    match (from, to) {
        (Some(a), Some(b)) => Some(haversine_miles(a.y(), a.x(), b.y(), b.x())),
        _ => None,
    }
}

#[inline]
pub fn km_to_miles(km: f64) -> f64 {
    km / KM_PER_MILE
}

/// Round to one decimal place, the precision published in pairings
#[inline]
pub fn round_tenth(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}

use crate::models::GeoPoint;

/// Earth's radius in miles
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Assumed average speed when estimating drive time without the provider
pub const FALLBACK_SPEED_MPH: f64 = 30.0;

/// Calculate the great-circle (haversine) distance between two points in miles
///
/// Pure and deterministic; used both as the cheap pre-filter and as the
/// fallback estimate when the routing provider is unavailable.
#[inline]
pub fn great_circle_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Estimate drive time in minutes from a distance at the assumed average speed
#[inline]
pub fn estimate_drive_minutes(distance_miles: f64) -> f64 {
    distance_miles / FALLBACK_SPEED_MPH * 60.0
}

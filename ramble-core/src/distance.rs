//! Great-circle distance and walking time between coordinates.
//!
//! Distances are "as the crow flies" on a sphere of radius
//! [`EARTH_RADIUS_KM`]. Street networks, elevation and obstacles are not
//! modelled.

use geo::Coord;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Walking speed assumed when a request does not override it.
pub const DEFAULT_WALKING_SPEED_KMH: f64 = 5.0;

/// Build a coordinate from latitude and longitude in decimal degrees.
///
/// `geo` stores longitude in `x` and latitude in `y`; this helper keeps call
/// sites from mixing the axes up.
///
/// # Examples
/// ```
/// use ramble_core::lat_lng;
///
/// let market_place = lat_lng(54.4025, -1.7367);
/// assert_eq!(market_place.y, 54.4025);
/// assert_eq!(market_place.x, -1.7367);
/// ```
#[must_use]
pub const fn lat_lng(lat: f64, lng: f64) -> Coord<f64> {
    Coord { x: lng, y: lat }
}

/// Great-circle distance between two coordinates, in kilometres.
///
/// The result is exactly symmetric and exactly zero for identical inputs.
/// Coordinates are not range-checked; validating them is the caller's job.
///
/// # Examples
/// ```
/// use ramble_core::{haversine_km, lat_lng};
///
/// let castle = lat_lng(54.4021, -1.7378);
/// let tower = lat_lng(54.4028, -1.7350);
/// let there = haversine_km(castle, tower);
/// assert!(there > 0.15 && there < 0.25);
/// assert_eq!(there, haversine_km(tower, castle));
/// assert_eq!(haversine_km(castle, castle), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    // Absolute deltas make the formula bit-for-bit symmetric.
    let d_lat = (to.y - from.y).abs().to_radians();
    let d_lng = (to.x - from.x).abs().to_radians();
    let cos_product = from.y.to_radians().cos() * to.y.to_radians().cos();
    let half_chord =
        (d_lat / 2.0).sin().powi(2) + cos_product * (d_lng / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * angle
}

/// Minutes needed to walk `distance_km` at `speed_kmh`.
///
/// # Examples
/// ```
/// use ramble_core::walking_minutes;
///
/// assert_eq!(walking_minutes(1.0, 5.0), 12.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "walking time is distance over speed scaled to minutes"
)]
pub fn walking_minutes(distance_km: f64, speed_kmh: f64) -> f64 {
    distance_km / speed_kmh * 60.0
}

/// Walking time between two coordinates at `speed_kmh`, in minutes.
#[must_use]
pub fn travel_minutes(from: Coord<f64>, to: Coord<f64>, speed_kmh: f64) -> f64 {
    walking_minutes(haversine_km(from, to), speed_kmh)
}

/// Offset `origin` due north by `distance_km` along its meridian.
///
/// Useful for laying out fixtures at exact great-circle spacings.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "converting an arc length into degrees of latitude"
)]
pub fn offset_north(origin: Coord<f64>, distance_km: f64) -> Coord<f64> {
    let degrees = (distance_km / EARTH_RADIUS_KM).to_degrees();
    lat_lng(origin.y + degrees, origin.x)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare distances within a tolerance"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE_KM: f64 = 1e-9;

    #[rstest]
    fn identical_points_are_zero_apart() {
        let point = lat_lng(54.4025, -1.7367);
        assert_eq!(haversine_km(point, point).to_bits(), 0.0_f64.to_bits());
    }

    #[rstest]
    #[case(lat_lng(0.0, 0.0), lat_lng(0.0, 1.0), 111.194_926_644_558_74)]
    #[case(lat_lng(51.5007, -0.1246), lat_lng(40.6892, -74.0445), 5574.840_456_848_555)]
    fn known_distances(#[case] from: Coord<f64>, #[case] to: Coord<f64>, #[case] expected: f64) {
        let distance = haversine_km(from, to);
        assert!(
            (distance - expected).abs() < 1e-6,
            "expected {expected} km, found {distance} km"
        );
    }

    #[rstest]
    #[case(0.1)]
    #[case(0.4)]
    #[case(2.0)]
    fn offset_north_matches_haversine(#[case] km: f64) {
        let origin = lat_lng(54.4025, -1.7367);
        let moved = offset_north(origin, km);
        assert!((haversine_km(origin, moved) - km).abs() < TOLERANCE_KM);
    }

    #[rstest]
    #[case(1.0, 5.0, 12.0)]
    #[case(0.1, 5.0, 1.2)]
    #[case(0.0, 5.0, 0.0)]
    #[case(3.0, 6.0, 30.0)]
    fn walking_time_scales_with_speed(
        #[case] km: f64,
        #[case] speed: f64,
        #[case] expected: f64,
    ) {
        assert!((walking_minutes(km, speed) - expected).abs() < 1e-12);
    }
}

//! Bounds checks, distances and areas over coordinate pairs

use crate::domain::CoordinatePair;

/// Sphere radius used for distances (WGS84 equatorial radius, metres)
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Check that a point lies within geographic longitude/latitude range.
///
/// Only meaningful for geographic coordinates: a projected point (metres)
/// will almost always be reported out of range.
pub fn check_bounds(point: CoordinatePair) -> bool {
    (-180.0..=180.0).contains(&point.x) && (-90.0..=90.0).contains(&point.y)
}

/// Great-circle distance in metres between two (longitude, latitude) points.
///
/// Haversine over a sphere of radius [`EARTH_RADIUS_METERS`]. The equatorial
/// radius overestimates slightly compared to the mean radius.
pub fn calculate_distance(p1: CoordinatePair, p2: CoordinatePair) -> f64 {
    let d_lat = (p2.y - p1.y).to_radians();
    let d_lon = (p2.x - p1.x).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + p1.y.to_radians().cos() * p2.y.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Planar polygon area (shoelace formula) in square coordinate units.
///
/// The ring must already be closed (last point equal to the first). An open
/// ring silently loses its closing edge and the result is wrong; this is
/// not corrected here.
pub fn calculate_area(ring: &[CoordinatePair]) -> f64 {
    let twice_area: f64 = ring.windows(2).map(|w| w[0].x * w[1].y - w[1].x * w[0].y).sum();
    twice_area.abs() / 2.0
}

/// Render a point as `"x, y"` with `precision` decimal places.
pub fn format_coordinate(point: CoordinatePair, precision: usize) -> String {
    format!("{:.precision$}, {:.precision$}", point.x, point.y)
}

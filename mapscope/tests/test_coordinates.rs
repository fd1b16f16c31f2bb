use mapscope::domain::{CoordinatePair, ProjectionError};
use mapscope::geo::{
    calculate_area, calculate_distance, check_bounds, register_reference_system, simplify_line,
    transform_coordinate, try_transform_coordinate,
};

fn pt(x: f64, y: f64) -> CoordinatePair {
    CoordinatePair::new(x, y)
}

#[test]
fn test_bounds_grid() {
    let mut lon = -180.0;
    while lon <= 180.0 {
        let mut lat = -90.0;
        while lat <= 90.0 {
            assert!(check_bounds(pt(lon, lat)), "({lon}, {lat})");
            lat += 15.0;
        }
        lon += 30.0;
    }
    assert!(!check_bounds(pt(200.0, 0.0)));
    assert!(!check_bounds(pt(0.0, -95.0)));
}

#[test]
fn test_distance_beijing_shanghai() {
    let beijing = pt(116.4074, 39.9042);
    let shanghai = pt(121.4737, 31.2304);
    let d = calculate_distance(beijing, shanghai);
    // ~1068 km on a sphere with the equatorial radius
    assert!((1_060_000.0..1_075_000.0).contains(&d), "distance was {d}");
    assert_eq!(d, calculate_distance(shanghai, beijing));
    assert_eq!(calculate_distance(beijing, beijing), 0.0);
}

#[test]
fn test_area_of_projected_square() {
    // 1 km square in web mercator metres
    let ring = [pt(0.0, 0.0), pt(1000.0, 0.0), pt(1000.0, 1000.0), pt(0.0, 1000.0), pt(0.0, 0.0)];
    assert_eq!(calculate_area(&ring), 1_000_000.0);
}

#[test]
fn test_invalid_target_returns_input() {
    let input = pt(2.3522, 48.8566);
    assert_eq!(transform_coordinate(input, "EPSG:4326", "EPSG:123456789"), input);
    assert!(matches!(
        try_transform_coordinate(input, "EPSG:4326", "EPSG:123456789"),
        Err(ProjectionError::UnknownReferenceSystem(_))
    ));
}

#[test]
fn test_transform_then_measure() {
    // Area in mercator metres of a small square near the equator
    let corners = [pt(0.0, 0.0), pt(0.01, 0.0), pt(0.01, 0.01), pt(0.0, 0.01), pt(0.0, 0.0)];
    let projected: Vec<CoordinatePair> =
        corners.iter().map(|&c| transform_coordinate(c, "EPSG:4326", "EPSG:3857")).collect();
    let area = calculate_area(&projected);
    let side = 6_378_137.0 * 0.01_f64.to_radians();
    assert!((area - side * side).abs() / (side * side) < 1e-3);
}

#[test]
fn test_registered_system_usable() {
    register_reference_system("EPSG:32650", "+proj=utm +zone=50 +datum=WGS84 +units=m +no_defs")
        .unwrap();
    let utm = try_transform_coordinate(pt(117.0, 0.0), "EPSG:4326", "EPSG:32650").unwrap();
    assert!((utm.x - 500_000.0).abs() < 1e-3);

    let back = try_transform_coordinate(utm, "EPSG:32650", "EPSG:4326").unwrap();
    assert!((back.x - 117.0).abs() < 1e-6);
    assert!(back.y.abs() < 1e-6);
}

#[test]
fn test_simplify_projected_track() {
    let track: Vec<CoordinatePair> = (0..=10).map(|i| pt(f64::from(i) * 100.0, 0.0)).collect();
    let simplified = simplify_line(&track, 1.0);
    assert_eq!(simplified, vec![pt(0.0, 0.0), pt(1000.0, 0.0)]);
}

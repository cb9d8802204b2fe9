//! Great-circle geometry on a spherical Earth
//!
//! Distances, initial courses, destination projection, and the arc/circle
//! point generators used by the boundary assembler and the MSA sector
//! builder. All angles are degrees, all distances meters. Internals compute
//! in f64 and hand back single-precision positions.

use super::types::{Position, Ring, EARTH_RADIUS_METERS};

/// Normalize a course to [0, 360).
pub fn normalize_course(course_deg: f32) -> f32 {
    let mut deg = course_deg % 360.0;
    if deg < 0.0 {
        deg += 360.0;
    }
    deg
}

/// Absolute angular difference between two courses, in [0, 180].
pub fn course_abs_diff(a: f32, b: f32) -> f32 {
    let diff = (normalize_course(a) - normalize_course(b)).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

fn normalize_lon(lon_deg: f64) -> f64 {
    let mut lon = lon_deg;
    while lon > 180.0 {
        lon -= 360.0;
    }
    while lon < -180.0 {
        lon += 360.0;
    }
    lon
}

/// Great-circle distance between two positions (haversine).
pub fn distance_meters(from: &Position, to: &Position) -> f32 {
    let phi1 = (from.lat as f64).to_radians();
    let phi2 = (to.lat as f64).to_radians();
    let dphi = ((to.lat - from.lat) as f64).to_radians();
    let dlambda = ((to.lon - from.lon) as f64).to_radians();

    let a = (dphi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    (EARTH_RADIUS_METERS * c) as f32
}

/// Initial great-circle course from one position to another, degrees true
/// in [0, 360).
pub fn course_to(from: &Position, to: &Position) -> f32 {
    let phi1 = (from.lat as f64).to_radians();
    let phi2 = (to.lat as f64).to_radians();
    let dlambda = ((to.lon - from.lon) as f64).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    normalize_course(y.atan2(x).to_degrees() as f32)
}

/// Destination point starting at `origin` on the given initial course for
/// the given distance.
pub fn endpoint(origin: &Position, course_deg: f32, distance_m: f32) -> Position {
    let phi1 = (origin.lat as f64).to_radians();
    let lambda1 = (origin.lon as f64).to_radians();
    let theta = (course_deg as f64).to_radians();
    let delta = distance_m as f64 / EARTH_RADIUS_METERS;

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos())
            .atan2(delta.cos() - phi1.sin() * phi2.sin());

    Position::new(normalize_lon(lambda2.to_degrees()) as f32, phi2.to_degrees() as f32)
}

/// Generate `segments + 1` points approximating a circular arc around
/// `center`, beginning at `start` and ending at `end`, swept in the
/// requested direction. The radius is taken from center to `start`.
/// Identical start and end bearings sweep a full 360 degrees.
pub fn arc(
    center: &Position,
    start: &Position,
    end: &Position,
    clockwise: bool,
    segments: usize,
) -> Ring {
    let segments = segments.max(1);
    let radius = distance_meters(center, start);
    let start_course = course_to(center, start);
    let end_course = course_to(center, end);

    let mut sweep = if clockwise {
        normalize_course(end_course - start_course)
    } else {
        normalize_course(start_course - end_course)
    };
    if sweep < 1e-6 {
        sweep = 360.0;
    }

    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let offset = sweep * i as f32 / segments as f32;
        let course = if clockwise {
            start_course + offset
        } else {
            start_course - offset
        };
        points.push(endpoint(center, normalize_course(course), radius));
    }
    // The contract requires both endpoints exactly so adjoining arcs
    // connect without gaps; reprojection rounding would leave them a few
    // meters off.
    points[0] = *start;
    points[segments] = *end;
    points
}

/// Generate `segments` evenly spaced points around a full circle, starting
/// due north and sweeping clockwise. No duplicate closing point.
pub fn circle(center: &Position, radius_m: f32, segments: usize) -> Ring {
    let segments = segments.max(3);
    let mut points = Vec::with_capacity(segments);
    for i in 0..segments {
        let course = 360.0 * i as f32 / segments as f32;
        points.push(endpoint(center, course, radius_m));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::types::METERS_PER_NM;

    #[test]
    fn test_course_normalization() {
        assert_eq!(normalize_course(0.0), 0.0);
        assert_eq!(normalize_course(360.0), 0.0);
        assert_eq!(normalize_course(-90.0), 270.0);
        assert_eq!(normalize_course(725.0), 5.0);
    }

    #[test]
    fn test_course_abs_diff_wraps() {
        assert!((course_abs_diff(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((course_abs_diff(0.0, 180.0) - 180.0).abs() < 1e-4);
        assert!(course_abs_diff(45.0, 45.0) < 1e-4);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(0.0, 1.0);
        let d = distance_meters(&a, &b);
        // One degree of latitude is roughly 60 NM.
        assert!((d - 60.0 * METERS_PER_NM).abs() < 800.0, "distance {}", d);
    }

    #[test]
    fn test_endpoint_round_trip() {
        let origin = Position::new(-122.0, 37.0);
        let dest = endpoint(&origin, 193.0, 25.0 * METERS_PER_NM);
        assert!(dest.is_valid());
        assert!((course_to(&origin, &dest) - 193.0).abs() < 0.1);
        assert!((distance_meters(&origin, &dest) - 25.0 * METERS_PER_NM).abs() < 50.0);
    }

    #[test]
    fn test_endpoint_normalizes_antimeridian() {
        let origin = Position::new(179.9, 0.0);
        let dest = endpoint(&origin, 90.0, 50.0 * METERS_PER_NM);
        assert!(dest.is_valid());
        assert!(dest.lon < 0.0, "expected wrap to west longitudes, got {}", dest.lon);
    }

    #[test]
    fn test_arc_includes_both_endpoints() {
        let center = Position::new(10.0, 50.0);
        let start = endpoint(&center, 0.0, 10_000.0);
        let end = endpoint(&center, 90.0, 10_000.0);
        let points = arc(&center, &start, &end, true, 12);
        assert_eq!(points.len(), 13);
        assert!(points[0].almost_equal(&start, 1e-4));
        assert!(points[12].almost_equal(&end, 1e-4));
    }

    #[test]
    fn test_arc_equal_bearings_sweeps_full_circle() {
        let center = Position::new(10.0, 50.0);
        let start = endpoint(&center, 45.0, 10_000.0);
        let points = arc(&center, &start, &start, true, 48);
        assert_eq!(points.len(), 49);
        // First and last both land on the start bearing.
        assert!(points[48].almost_equal(&points[0], 1e-4));
        // Halfway around lies on the opposite bearing.
        let mid_course = course_to(&center, &points[24]);
        assert!((course_abs_diff(mid_course, 225.0)) < 1.0);
    }

    #[test]
    fn test_circle_has_no_closing_duplicate() {
        let center = Position::new(-3.0, 40.0);
        let points = circle(&center, 20_000.0, 36);
        assert_eq!(points.len(), 36);
        assert!(!points[0].almost_equal(&points[35], 1e-6));
        for p in &points {
            assert!((distance_meters(&center, p) - 20_000.0).abs() < 10.0);
        }
    }
}

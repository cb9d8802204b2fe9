//! Rhumb-line geometry
//!
//! Constant-bearing paths on the sphere. Long rhumb segments in source
//! boundary data would otherwise be drawn as great-circle chords that
//! visibly diverge from the intended track, so the assembler densifies
//! them with the helpers in this module.

use super::types::{Position, Ring, EARTH_RADIUS_METERS};

/// Projected latitude difference used by the Mercator-based rhumb formulas.
fn delta_psi(phi1: f64, phi2: f64) -> f64 {
    ((std::f64::consts::FRAC_PI_4 + phi2 / 2.0).tan()
        / (std::f64::consts::FRAC_PI_4 + phi1 / 2.0).tan())
    .ln()
}

/// East-west delta in radians, taking the shorter way around the
/// anti-meridian.
fn delta_lambda(from: &Position, to: &Position) -> f64 {
    let mut dlambda = ((to.lon - from.lon) as f64).to_radians();
    if dlambda.abs() > std::f64::consts::PI {
        dlambda = if dlambda > 0.0 {
            dlambda - 2.0 * std::f64::consts::PI
        } else {
            dlambda + 2.0 * std::f64::consts::PI
        };
    }
    dlambda
}

/// Rhumb-line distance between two positions.
pub fn distance_meters(from: &Position, to: &Position) -> f32 {
    let phi1 = (from.lat as f64).to_radians();
    let phi2 = (to.lat as f64).to_radians();
    let dphi = phi2 - phi1;
    let dpsi = delta_psi(phi1, phi2);
    let q = if dpsi.abs() > 1e-12 { dphi / dpsi } else { phi1.cos() };
    let dlambda = delta_lambda(from, to);

    let delta = (dphi * dphi + q * q * dlambda * dlambda).sqrt();
    (delta * EARTH_RADIUS_METERS) as f32
}

/// Constant bearing from one position to another, degrees true in [0, 360).
pub fn course_to(from: &Position, to: &Position) -> f32 {
    let phi1 = (from.lat as f64).to_radians();
    let phi2 = (to.lat as f64).to_radians();
    let dpsi = delta_psi(phi1, phi2);
    let dlambda = delta_lambda(from, to);

    super::spherical::normalize_course(dlambda.atan2(dpsi).to_degrees() as f32)
}

/// Destination point along a rhumb line from `origin` on the given bearing
/// for the given distance.
pub fn endpoint(origin: &Position, course_deg: f32, distance_m: f32) -> Position {
    let phi1 = (origin.lat as f64).to_radians();
    let lambda1 = (origin.lon as f64).to_radians();
    let theta = (course_deg as f64).to_radians();
    let delta = distance_m as f64 / EARTH_RADIUS_METERS;

    let dphi = delta * theta.cos();
    let mut phi2 = phi1 + dphi;
    // Going past a pole keeps the latitude on the sphere.
    if phi2.abs() > std::f64::consts::FRAC_PI_2 {
        phi2 = if phi2 > 0.0 {
            std::f64::consts::PI - phi2
        } else {
            -std::f64::consts::PI - phi2
        };
    }

    let dpsi = delta_psi(phi1, phi2);
    let q = if dpsi.abs() > 1e-12 { dphi / dpsi } else { phi1.cos() };
    let dlambda = delta * theta.sin() / q;
    let mut lambda2 = (lambda1 + dlambda).to_degrees();
    while lambda2 > 180.0 {
        lambda2 -= 360.0;
    }
    while lambda2 < -180.0 {
        lambda2 += 360.0;
    }

    Position::new(lambda2 as f32, phi2.to_degrees() as f32)
}

/// Points strictly between `from` and `to` along the rhumb line, spaced at
/// roughly `spacing_m`. Returns an empty ring when the segment is already
/// shorter than the spacing.
pub fn intermediate_points(from: &Position, to: &Position, spacing_m: f32) -> Ring {
    let total = distance_meters(from, to);
    if !(spacing_m > 0.0) || total <= spacing_m {
        return Vec::new();
    }

    let steps = (total / spacing_m).floor() as usize;
    let course = course_to(from, to);
    let mut points = Vec::with_capacity(steps);
    for i in 1..=steps {
        let dist = total * i as f32 / (steps + 1) as f32;
        points.push(endpoint(from, course, dist));
    }
    points
}

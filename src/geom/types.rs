//! Core geometry types for boundary compilation
//!
//! This module contains the fundamental types used throughout the crate:
//! geodetic positions, rings, bounding rectangles, and the curve-node
//! polygon model used for pavement outlines.

use serde::Serialize;

/// Mean Earth radius in meters (spherical approximation used crate-wide).
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters per nautical mile.
pub const METERS_PER_NM: f32 = 1852.0;

/// Latitudes are clamped to this magnitude before storage to avoid
/// rendering artifacts at the poles.
pub const MAX_STORED_LATITUDE: f32 = 89.9;

/// Two positions closer than this (in degrees, per axis) are considered
/// duplicates. Roughly one meter at the equator.
pub const POSITION_EPSILON: f32 = 1e-5;

/// A geodetic position in degrees. Longitude in [-180, 180], latitude in
/// [-90, 90]. The optional altitude is carried through assembly but ignored
/// by all binary codecs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lon: f32,
    pub lat: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<f32>,
}

impl Position {
    /// Sentinel distinguishable from every valid position. Must never be
    /// written into a ring.
    pub const INVALID: Position = Position {
        lon: f32::MAX,
        lat: f32::MAX,
        alt: None,
    };

    pub fn new(lon: f32, lat: f32) -> Self {
        Position { lon, lat, alt: None }
    }

    pub fn with_alt(lon: f32, lat: f32, alt: f32) -> Self {
        Position { lon, lat, alt: Some(alt) }
    }

    /// True if both coordinates are finite and inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Coordinate-wise comparison within `epsilon` degrees. Altitude is
    /// ignored.
    pub fn almost_equal(&self, other: &Position, epsilon: f32) -> bool {
        (self.lon - other.lon).abs() <= epsilon && (self.lat - other.lat).abs() <= epsilon
    }
}

/// An ordered, non-circular sequence of positions forming one closed
/// boundary. The closing edge from last point back to first is implicit.
pub type Ring = Vec<Position>;

/// Clamp all latitudes in `ring` to `±max_lat`. Idempotent.
pub fn clamp_ring_latitudes(ring: &mut Ring, max_lat: f32) {
    for pos in ring.iter_mut() {
        pos.lat = pos.lat.clamp(-max_lat, max_lat);
    }
}

/// Remove consecutive duplicate points, including a trailing point that
/// duplicates the first (the implicit closing edge makes it redundant).
pub fn dedup_ring(ring: &mut Ring) {
    ring.dedup_by(|a, b| a.almost_equal(b, POSITION_EPSILON));
    while ring.len() > 1 {
        let first = ring[0];
        let last = ring[ring.len() - 1];
        if last.almost_equal(&first, POSITION_EPSILON) {
            ring.pop();
        } else {
            break;
        }
    }
}

/// Axis-aligned bounding rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingRect {
    pub min_lon: f32,
    pub max_lon: f32,
    pub min_lat: f32,
    pub max_lat: f32,
}

impl BoundingRect {
    /// Rectangle around all valid points, or `None` if there are none.
    pub fn from_points(points: &[Position]) -> Option<BoundingRect> {
        let mut rect: Option<BoundingRect> = None;
        for pos in points.iter().filter(|p| p.is_valid()) {
            match rect.as_mut() {
                Some(r) => r.extend(pos),
                None => {
                    rect = Some(BoundingRect {
                        min_lon: pos.lon,
                        max_lon: pos.lon,
                        min_lat: pos.lat,
                        max_lat: pos.lat,
                    })
                }
            }
        }
        rect
    }

    pub fn extend(&mut self, pos: &Position) {
        self.min_lon = self.min_lon.min(pos.lon);
        self.max_lon = self.max_lon.max(pos.lon);
        self.min_lat = self.min_lat.min(pos.lat);
        self.max_lat = self.max_lat.max(pos.lat);
    }

    /// True if the rectangle collapses to a single point. A point-sized
    /// rectangle cannot be queried spatially and marks a degenerate boundary.
    pub fn is_point(&self) -> bool {
        (self.max_lon - self.min_lon).abs() <= POSITION_EPSILON
            && (self.max_lat - self.min_lat).abs() <= POSITION_EPSILON
    }
}

/// One node of a pavement outline: either a plain vertex or a curve vertex
/// with its bezier control point (X-Plane apron/taxiway style).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PolygonNode {
    Straight(Position),
    Curve { point: Position, control: Position },
}

impl PolygonNode {
    pub fn point(&self) -> Position {
        match self {
            PolygonNode::Straight(pos) => *pos,
            PolygonNode::Curve { point, .. } => *point,
        }
    }
}

/// An outer outline plus zero or more hole outlines, all curve-aware.
/// Used only by the hole-aware polygon codec.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CurvedPolygon {
    pub outer: Vec<PolygonNode>,
    pub holes: Vec<Vec<PolygonNode>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_validity() {
        assert!(Position::new(-122.0, 37.0).is_valid());
        assert!(Position::new(180.0, -90.0).is_valid());
        assert!(!Position::new(181.0, 0.0).is_valid());
        assert!(!Position::new(0.0, 90.5).is_valid());
        assert!(!Position::new(f32::NAN, 0.0).is_valid());
        assert!(!Position::INVALID.is_valid());
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let mut ring = vec![
            Position::new(10.0, 89.95),
            Position::new(11.0, -89.99),
            Position::new(12.0, 45.0),
        ];
        clamp_ring_latitudes(&mut ring, MAX_STORED_LATITUDE);
        let once = ring.clone();
        clamp_ring_latitudes(&mut ring, MAX_STORED_LATITUDE);
        assert_eq!(ring, once);
        assert_eq!(ring[0].lat, 89.9);
        assert_eq!(ring[1].lat, -89.9);
        assert_eq!(ring[2].lat, 45.0);
    }

    #[test]
    fn test_dedup_removes_consecutive_and_closing() {
        let mut ring = vec![
            Position::new(0.0, 0.0),
            Position::new(0.0, 0.0),
            Position::new(1.0, 0.0),
            Position::new(1.0, 1.0),
            Position::new(0.0, 0.0),
        ];
        dedup_ring(&mut ring);
        assert_eq!(
            ring,
            vec![
                Position::new(0.0, 0.0),
                Position::new(1.0, 0.0),
                Position::new(1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_bounding_rect() {
        let points = vec![
            Position::new(-1.0, 2.0),
            Position::new(3.0, -4.0),
            Position::INVALID,
        ];
        let rect = BoundingRect::from_points(&points).unwrap();
        assert_eq!(rect.min_lon, -1.0);
        assert_eq!(rect.max_lon, 3.0);
        assert_eq!(rect.min_lat, -4.0);
        assert_eq!(rect.max_lat, 2.0);
        assert!(!rect.is_point());

        let single = vec![Position::new(5.0, 5.0); 3];
        assert!(BoundingRect::from_points(&single).unwrap().is_point());
        assert!(BoundingRect::from_points(&[]).is_none());
    }

    #[test]
    fn test_position_serializes_to_json() {
        let json = serde_json::to_string(&Position::new(-9.5, 51.2)).unwrap();
        assert!(json.contains("\"lon\""));
        assert!(json.contains("\"lat\""));
        assert!(!json.contains("alt"));
    }
}

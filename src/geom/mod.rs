//! Geometry module for boundary compilation
//!
//! Degree-based spherical Earth geometry shared by the assembler, the MSA
//! sector builder, and the binary codecs.
//!
//! # Submodules
//! - `types` - Positions, rings, bounding rectangles, curve-node polygons
//! - `spherical` - Great-circle math plus the arc/circle point generators
//! - `rhumb` - Constant-bearing math and rhumb densification

pub mod rhumb;
pub mod spherical;
mod types;

pub use types::{
    clamp_ring_latitudes,
    dedup_ring,
    BoundingRect,
    CurvedPolygon,
    PolygonNode,
    Position,
    Ring,
    EARTH_RADIUS_METERS,
    MAX_STORED_LATITUDE,
    METERS_PER_NM,
    POSITION_EPSILON,
};

/// Segment count for full-circle airspace boundaries. 7.5 degrees per
/// segment; must stay equal to 360 divided by the full-circle course
/// threshold used when classifying arc records.
pub const AIRSPACE_CIRCLE_SEGMENTS: usize = 48;

/// Segment count for MSA outer circles.
pub const MSA_CIRCLE_SEGMENTS: usize = 90;

/// Segment count for simple facility range rings.
pub const RANGE_CIRCLE_SEGMENTS: usize = 36;

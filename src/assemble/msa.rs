//! MSA sector geometry builder
//!
//! Derives the drawable geometry of a Minimum Safe Altitude diagram from
//! its sector definition: a continuous outer ring of sector arcs (or a
//! full circle), one label position per sector at half radius, and one
//! bearing-end position per sector at full radius.

use std::fmt;
use std::mem;

use serde::Serialize;

use crate::geom::{
    dedup_ring, spherical, BoundingRect, Position, Ring, AIRSPACE_CIRCLE_SEGMENTS,
    METERS_PER_NM, MSA_CIRCLE_SEGMENTS,
};

/// One MSA sector: bearing inbound to the navaid in degrees and the safe
/// altitude inside the sector. Sectors are ordered clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MsaSector {
    pub bearing_deg: f32,
    pub altitude_ft: f32,
}

/// Full definition of one MSA diagram as read from source data.
#[derive(Debug, Clone, PartialEq)]
pub struct MsaDefinition {
    pub center: Position,
    pub radius_nm: f32,
    /// Magnetic variation at the center, added to bearings when the
    /// definition is magnetic.
    pub mag_var: f32,
    /// True when sector bearings are degrees true rather than magnetic.
    pub true_bearing: bool,
    pub sectors: Vec<MsaSector>,
}

impl MsaDefinition {
    /// A single sector, or two sectors with near-equal bearings, denotes a
    /// full circle rather than discrete sectors.
    pub fn is_full_circle(&self, bearing_epsilon: f32) -> bool {
        match self.sectors.len() {
            1 => true,
            2 => {
                spherical::course_abs_diff(
                    self.sectors[0].bearing_deg,
                    self.sectors[1].bearing_deg,
                ) < bearing_epsilon
            }
            _ => false,
        }
    }
}

/// Derived MSA geometry. Created wholesale by
/// [`MsaSectorBuilder::calculate`] and immutable afterwards; the four
/// per-sector sequences are parallel and index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MsaGeometry {
    /// Outer ring: concatenated sector arcs, or a full circle.
    pub geometry: Ring,
    /// Sector bearings as entered.
    pub bearings: Vec<f32>,
    /// Sector altitudes in feet.
    pub altitudes: Vec<f32>,
    /// One point per sector at full radius on the sector's outbound heading.
    pub bearing_end_positions: Ring,
    /// One point per sector at half radius on the mid-sector bearing.
    pub label_positions: Ring,
    pub bounding_rect: BoundingRect,
}

/// Tuning constants for the builder.
#[derive(Debug, Clone)]
pub struct MsaConfig {
    /// Segments for a full-circle MSA ring.
    pub circle_segment_count: usize,
    /// Segments per full turn when generating sector arcs; arcs get a
    /// proportional share so adjacent arcs share endpoints exactly.
    pub arc_segments_per_circle: usize,
    /// Two-sector definitions with bearings closer than this are a full
    /// circle.
    pub full_circle_bearing_epsilon: f32,
}

impl Default for MsaConfig {
    fn default() -> Self {
        MsaConfig {
            circle_segment_count: MSA_CIRCLE_SEGMENTS,
            arc_segments_per_circle: AIRSPACE_CIRCLE_SEGMENTS,
            full_circle_bearing_epsilon: 0.1,
        }
    }
}

/// Problem found while building one MSA geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum MsaWarning {
    /// The definition had no sectors, an invalid center, or a non-positive
    /// radius.
    InvalidDefinition,
    /// The derived geometry contained no valid points.
    DegenerateGeometry,
}

impl fmt::Display for MsaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MsaWarning::InvalidDefinition => write!(f, "MSA definition invalid, skipped"),
            MsaWarning::DegenerateGeometry => write!(f, "MSA geometry degenerate, skipped"),
        }
    }
}

/// Builder for MSA geometry. One definition at a time; re-calculation
/// replaces the previous result wholesale.
#[derive(Debug, Default)]
pub struct MsaSectorBuilder {
    config: MsaConfig,
    warnings: Vec<MsaWarning>,
}

impl MsaSectorBuilder {
    pub fn new(config: MsaConfig) -> Self {
        MsaSectorBuilder { config, warnings: Vec::new() }
    }

    pub fn warnings(&self) -> &[MsaWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<MsaWarning> {
        mem::take(&mut self.warnings)
    }

    /// Compute the geometry for one MSA definition. Returns `None` for
    /// degenerate definitions; the caller decides whether to skip the
    /// record or abort.
    pub fn calculate(&mut self, def: &MsaDefinition) -> Option<MsaGeometry> {
        if def.sectors.is_empty() || !def.center.is_valid() || !(def.radius_nm > 0.0) {
            self.warnings.push(MsaWarning::InvalidDefinition);
            return None;
        }

        let radius_m = def.radius_nm * METERS_PER_NM;
        let full_circle = def.is_full_circle(self.config.full_circle_bearing_epsilon);
        let count = def.sectors.len();

        let mut geometry: Ring = Vec::new();
        let mut bearings = Vec::with_capacity(count);
        let mut altitudes = Vec::with_capacity(count);
        let mut bearing_ends: Ring = Vec::with_capacity(count);
        let mut labels: Ring = Vec::with_capacity(count);

        if full_circle {
            geometry = spherical::circle(&def.center, radius_m, self.config.circle_segment_count);
        }

        for (i, sector) in def.sectors.iter().enumerate() {
            let heading = self.outbound_heading(def, sector.bearing_deg);
            let next_bearing = def.sectors[(i + 1) % count].bearing_deg;
            let next_heading = self.outbound_heading(def, next_bearing);

            // Mid-sector bearing along the shorter angular difference; a
            // full circle labels due north.
            let label_bearing = if full_circle {
                0.0
            } else {
                let mut diff = spherical::normalize_course(next_heading - heading);
                if diff > 180.0 {
                    diff -= 360.0;
                }
                spherical::normalize_course(heading + diff / 2.0)
            };

            bearings.push(sector.bearing_deg);
            altitudes.push(sector.altitude_ft);
            labels.push(spherical::endpoint(&def.center, label_bearing, radius_m / 2.0));
            bearing_ends.push(spherical::endpoint(&def.center, heading, radius_m));

            if !full_circle {
                let sweep = spherical::normalize_course(next_heading - heading);
                let segments = ((sweep / 360.0) * self.config.arc_segments_per_circle as f32)
                    .round()
                    .max(1.0) as usize;
                let start = spherical::endpoint(&def.center, heading, radius_m);
                let end = spherical::endpoint(&def.center, next_heading, radius_m);
                geometry.extend(spherical::arc(&def.center, &start, &end, true, segments));
            }
        }

        dedup_ring(&mut geometry);

        let valid = !geometry.is_empty()
            && !labels.is_empty()
            && geometry.iter().all(Position::is_valid)
            && labels.iter().all(Position::is_valid)
            && bearing_ends.iter().all(Position::is_valid);
        if !valid {
            self.warnings.push(MsaWarning::DegenerateGeometry);
            return None;
        }

        let bounding_rect = BoundingRect::from_points(&geometry)?;
        Some(MsaGeometry {
            geometry,
            bearings,
            altitudes,
            bearing_end_positions: bearing_ends,
            label_positions: labels,
            bounding_rect,
        })
    }

    /// Stored bearings are inbound to the navaid; outbound from the center
    /// is 180 degrees away, plus magnetic variation for magnetic sectors.
    fn outbound_heading(&self, def: &MsaDefinition, bearing_deg: f32) -> f32 {
        let mut heading = bearing_deg + 180.0;
        if !def.true_bearing {
            heading += def.mag_var;
        }
        spherical::normalize_course(heading)
    }
}

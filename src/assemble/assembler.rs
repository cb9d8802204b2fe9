//! Streaming boundary assembler
//!
//! Turns one source boundary's ordered segment stream into a storable ring,
//! absorbing format-specific irregularities: arcs whose end point lives on
//! the following record, arc records whose begin/end bearings coincide and
//! actually describe a full circle, long rhumb connectors that need
//! densification, and malformed coordinates that must be dropped without
//! aborting the boundary.

use std::fmt;
use std::mem;

use crate::geom::{
    clamp_ring_latitudes, dedup_ring, rhumb, spherical, BoundingRect, Position, Ring,
    AIRSPACE_CIRCLE_SEGMENTS, MAX_STORED_LATITUDE, METERS_PER_NM, POSITION_EPSILON,
};

use super::segment::BoundarySegment;

/// Tuning constants for one assembler instance. Defaults carry the
/// production values; tests swap in deterministic edge densities.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Segments per synthesized arc.
    pub arc_segment_count: usize,
    /// Segments for full-circle boundaries.
    pub circle_segment_count: usize,
    /// Arc records whose begin and end bearings from the center differ by
    /// less than this describe a full circle. Kept at 360 / 48 so it stays
    /// in step with the circle segment count.
    pub full_circle_course_epsilon: f32,
    /// Latitude clamp applied before storage.
    pub max_stored_latitude: f32,
    /// Adaptive rhumb point spacing: (minimum absolute latitude in degrees,
    /// spacing in NM), checked in order. Meridian convergence makes chords
    /// diverge from true rhumb lines much sooner near the poles.
    pub rhumb_density_bands: [(f32, f32); 4],
    /// Rhumb spacing below the lowest band, in NM.
    pub default_rhumb_spacing_nm: f32,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        AssemblerConfig {
            arc_segment_count: AIRSPACE_CIRCLE_SEGMENTS,
            circle_segment_count: AIRSPACE_CIRCLE_SEGMENTS,
            full_circle_course_epsilon: 360.0 / AIRSPACE_CIRCLE_SEGMENTS as f32,
            max_stored_latitude: MAX_STORED_LATITUDE,
            rhumb_density_bands: [(70.0, 20.0), (60.0, 40.0), (30.0, 70.0), (10.0, 90.0)],
            default_rhumb_spacing_nm: 250.0,
        }
    }
}

/// Recoverable problem found while assembling one boundary. Surfaced to the
/// caller, who owns logging and abort policy.
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyWarning {
    /// A coordinate was invalid or out of range; the point was dropped.
    InvalidPoint(Position),
    /// A circle segment carried a non-positive radius; the segment was
    /// dropped.
    InvalidRadius(f32),
    /// An arc segment had no preceding point to start from.
    ArcMissingStart,
    /// An arc's end point could not be resolved from the lookahead segment.
    ArcMissingEnd,
    /// A full-circle segment arrived after other geometry and replaced it.
    CircleReplacedBoundary,
    /// A segment arrived outside an open boundary and was ignored.
    SegmentOutsideBoundary,
    /// The finished boundary collapsed below a storable ring.
    DegenerateBoundary { points: usize },
}

impl fmt::Display for AssemblyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyWarning::InvalidPoint(pos) => {
                write!(f, "invalid coordinate {}/{} dropped", pos.lon, pos.lat)
            }
            AssemblyWarning::InvalidRadius(radius) => {
                write!(f, "circle with invalid radius {} m dropped", radius)
            }
            AssemblyWarning::ArcMissingStart => {
                write!(f, "arc segment without a preceding point dropped")
            }
            AssemblyWarning::ArcMissingEnd => {
                write!(f, "arc segment with unresolved end point dropped")
            }
            AssemblyWarning::CircleReplacedBoundary => {
                write!(f, "full circle replaced previously accumulated geometry")
            }
            AssemblyWarning::SegmentOutsideBoundary => {
                write!(f, "segment outside an open boundary ignored")
            }
            AssemblyWarning::DegenerateBoundary { points } => {
                write!(f, "boundary degenerated to {} points and was skipped", points)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Accumulating,
}

/// Stateful assembler for one boundary at a time. Not safe for concurrent
/// mutation; use one instance per worker.
#[derive(Debug)]
pub struct BoundaryAssembler {
    config: AssemblerConfig,
    state: State,
    ring: Ring,
    last_was_rhumb: bool,
    /// End point already covered by synthesized geometry; the lookahead
    /// segment carrying it must not append it again.
    skip_point: Option<Position>,
    warnings: Vec<AssemblyWarning>,
}

impl Default for BoundaryAssembler {
    fn default() -> Self {
        BoundaryAssembler::new(AssemblerConfig::default())
    }
}

impl BoundaryAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        BoundaryAssembler {
            config,
            state: State::Idle,
            ring: Vec::new(),
            last_was_rhumb: false,
            skip_point: None,
            warnings: Vec::new(),
        }
    }

    /// Start a new boundary, discarding any unfinished geometry.
    pub fn begin_boundary(&mut self) {
        self.ring.clear();
        self.last_was_rhumb = false;
        self.skip_point = None;
        self.state = State::Accumulating;
    }

    /// Append the geometry for one segment. `lookahead` is the next segment
    /// of the same boundary, needed to resolve `ArcByEdge` end points.
    pub fn add_segment(&mut self, segment: &BoundarySegment, lookahead: Option<&BoundarySegment>) {
        if self.state != State::Accumulating {
            self.warnings.push(AssemblyWarning::SegmentOutsideBoundary);
            return;
        }

        match segment {
            BoundarySegment::LineTo(pos) => {
                let rhumb_edge = self.last_was_rhumb;
                if !self.consume_skip(pos) {
                    self.append_edge(*pos, rhumb_edge);
                }
                self.last_was_rhumb = false;
            }
            BoundarySegment::RhumbTo(pos) => {
                if !self.consume_skip(pos) {
                    self.append_edge(*pos, true);
                }
                self.last_was_rhumb = true;
            }
            BoundarySegment::ArcByEdge { center, direction } => {
                self.skip_point = None;
                self.append_arc(center, direction.is_clockwise(), lookahead);
                self.last_was_rhumb = false;
            }
            BoundarySegment::FullCircle { center, radius_m } => {
                self.skip_point = None;
                self.append_full_circle(center, *radius_m);
                self.last_was_rhumb = false;
            }
        }
    }

    /// Close the current boundary. Returns the finished ring, or `None` for
    /// boundaries that collapsed below three distinct points or to a
    /// point-sized bounding rectangle. Resets to idle either way.
    pub fn finish_boundary(&mut self) -> Option<Ring> {
        if self.state != State::Accumulating {
            return None;
        }
        self.state = State::Idle;
        self.last_was_rhumb = false;
        self.skip_point = None;

        let mut ring = mem::take(&mut self.ring);
        clamp_ring_latitudes(&mut ring, self.config.max_stored_latitude);
        dedup_ring(&mut ring);

        if ring.len() < 3 {
            self.warnings
                .push(AssemblyWarning::DegenerateBoundary { points: ring.len() });
            return None;
        }
        match BoundingRect::from_points(&ring) {
            Some(rect) if !rect.is_point() => Some(ring),
            _ => {
                self.warnings
                    .push(AssemblyWarning::DegenerateBoundary { points: ring.len() });
                None
            }
        }
    }

    /// Warnings accumulated so far.
    pub fn warnings(&self) -> &[AssemblyWarning] {
        &self.warnings
    }

    /// Drain accumulated warnings, typically once per boundary.
    pub fn take_warnings(&mut self) -> Vec<AssemblyWarning> {
        mem::take(&mut self.warnings)
    }

    fn append_edge(&mut self, pos: Position, rhumb_edge: bool) {
        if !pos.is_valid() {
            self.warnings.push(AssemblyWarning::InvalidPoint(pos));
            return;
        }
        if let Some(last) = self.ring.last().copied() {
            if last.almost_equal(&pos, POSITION_EPSILON) {
                return;
            }
            if rhumb_edge {
                let spacing = self.rhumb_spacing_m(last.lat.abs().max(pos.lat.abs()));
                if rhumb::distance_meters(&last, &pos) > spacing {
                    self.ring.extend(rhumb::intermediate_points(&last, &pos, spacing));
                }
            }
        }
        self.ring.push(pos);
    }

    fn append_arc(
        &mut self,
        center: &Position,
        clockwise: bool,
        lookahead: Option<&BoundarySegment>,
    ) {
        if !center.is_valid() {
            self.warnings.push(AssemblyWarning::InvalidPoint(*center));
            return;
        }
        let start = match self.ring.last().copied() {
            Some(start) => start,
            None => {
                self.warnings.push(AssemblyWarning::ArcMissingStart);
                return;
            }
        };
        let end = match lookahead.and_then(|seg| seg.anchor()) {
            Some(end) if end.is_valid() => end,
            Some(end) => {
                self.warnings.push(AssemblyWarning::InvalidPoint(end));
                return;
            }
            None => {
                self.warnings.push(AssemblyWarning::ArcMissingEnd);
                return;
            }
        };

        let start_course = spherical::course_to(center, &start);
        let end_course = spherical::course_to(center, &end);
        if spherical::course_abs_diff(start_course, end_course)
            < self.config.full_circle_course_epsilon
        {
            // Near-identical bearings: the source record describes a full
            // circle, not a sliver arc. The circle is the whole boundary,
            // and the lookahead's end point already lies on it; appending
            // it again would draw a chord back across the circle.
            let radius = spherical::distance_meters(center, &start);
            self.ring = spherical::circle(center, radius, self.config.circle_segment_count);
            self.skip_point = Some(end);
            return;
        }

        let mut points = spherical::arc(center, &start, &end, clockwise, self.config.arc_segment_count);
        // The next segment supplies the arc's end point itself.
        points.pop();
        self.ring.extend(points);
    }

    fn append_full_circle(&mut self, center: &Position, radius_m: f32) {
        if !center.is_valid() {
            self.warnings.push(AssemblyWarning::InvalidPoint(*center));
            return;
        }
        if !(radius_m > 0.0) {
            self.warnings.push(AssemblyWarning::InvalidRadius(radius_m));
            return;
        }
        if !self.ring.is_empty() {
            self.warnings.push(AssemblyWarning::CircleReplacedBoundary);
            self.ring.clear();
        }
        self.ring = spherical::circle(center, radius_m, self.config.circle_segment_count);
    }

    /// True if `pos` is the end point a preceding segment already emitted;
    /// consumes the marker either way.
    fn consume_skip(&mut self, pos: &Position) -> bool {
        match self.skip_point.take() {
            Some(skip) => skip.almost_equal(pos, POSITION_EPSILON),
            None => false,
        }
    }

    fn rhumb_spacing_m(&self, lat_abs: f32) -> f32 {
        for &(min_lat, spacing_nm) in &self.config.rhumb_density_bands {
            if lat_abs > min_lat {
                return spacing_nm * METERS_PER_NM;
            }
        }
        self.config.default_rhumb_spacing_nm * METERS_PER_NM
    }
}

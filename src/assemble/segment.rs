//! Boundary segment model
//!
//! One tagged variant per step of a boundary outline. Source-format
//! adapters (ARINC boundary-via rows, OpenAir D/DA/DB/DC/V records, GeoJSON
//! ring coordinates, apt.dat pavement lines) map their own notation onto
//! this variant set before handing segments to the assembler, which is what
//! lets one assembler serve unrelated source formats.

use crate::geom::Position;

/// Sweep direction of an arc segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

impl ArcDirection {
    pub fn is_clockwise(&self) -> bool {
        matches!(self, ArcDirection::Clockwise)
    }
}

/// One step of a boundary outline as read from a source format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundarySegment {
    /// Straight (great-circle) edge to a point.
    LineTo(Position),

    /// Circular arc from the previous point, swept around `center` in
    /// `direction`. The end point is carried by the next segment; the
    /// assembler resolves it through one-segment lookahead.
    ArcByEdge {
        center: Position,
        direction: ArcDirection,
    },

    /// A complete circle. Only valid as the sole segment of a boundary.
    FullCircle { center: Position, radius_m: f32 },

    /// Edge along a rhumb line (constant bearing) to a point.
    RhumbTo(Position),
}

impl BoundarySegment {
    /// The explicit point this segment is anchored to, if any. Used to
    /// resolve the end point of a preceding `ArcByEdge`.
    pub fn anchor(&self) -> Option<Position> {
        match self {
            BoundarySegment::LineTo(pos) | BoundarySegment::RhumbTo(pos) => Some(*pos),
            BoundarySegment::ArcByEdge { .. } | BoundarySegment::FullCircle { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_points() {
        let p = Position::new(8.5, 47.4);
        assert_eq!(BoundarySegment::LineTo(p).anchor(), Some(p));
        assert_eq!(BoundarySegment::RhumbTo(p).anchor(), Some(p));
        assert_eq!(
            BoundarySegment::ArcByEdge {
                center: p,
                direction: ArcDirection::Clockwise
            }
            .anchor(),
            None
        );
        assert_eq!(
            BoundarySegment::FullCircle { center: p, radius_m: 1000.0 }.anchor(),
            None
        );
    }
}

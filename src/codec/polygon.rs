//! Hole-aware polygon codec with curve-node markers
//!
//! Fixed layout, little endian, single precision:
//!
//! ```text
//! u32 outerNodeCount; outerNodeCount x node;
//! u16 holeCount; holeCount x { u32 nodeCount; nodeCount x node; }
//!
//! node: i8 nodeType; f32 lon; f32 lat;
//!       nodeType == 2: f32 controlLon; f32 controlLat;
//! ```
//!
//! Node type 1 is a straight vertex, type 2 a curve vertex with its bezier
//! control point. Used for pavement and taxiway outlines where source data
//! carries curved edges.

use std::io::Cursor;

use anyhow::{bail, ensure, Context, Result};
use byteorder::{LittleEndian, ReadBytesExt};

use crate::geom::{CurvedPolygon, PolygonNode, Position};

const NODE_TYPE_STRAIGHT: i8 = 1;
const NODE_TYPE_CURVE: i8 = 2;

/// Smallest possible encoded node: type byte plus one point.
const MIN_NODE_SIZE: u64 = 9;

/// Encode a curve-aware polygon. Fails when a ring count overflows its
/// fixed-width count field.
pub fn encode_curved_polygon(polygon: &CurvedPolygon) -> Result<Vec<u8>> {
    ensure!(
        polygon.outer.len() <= u32::MAX as usize,
        "outer ring of {} nodes exceeds the u32 count field",
        polygon.outer.len()
    );
    ensure!(
        polygon.holes.len() <= u16::MAX as usize,
        "{} holes exceed the u16 count field",
        polygon.holes.len()
    );

    let mut buffer = Vec::new();
    buffer.extend_from_slice(&(polygon.outer.len() as u32).to_le_bytes());
    for node in &polygon.outer {
        encode_node(&mut buffer, node);
    }

    buffer.extend_from_slice(&(polygon.holes.len() as u16).to_le_bytes());
    for hole in &polygon.holes {
        ensure!(
            hole.len() <= u32::MAX as usize,
            "hole ring of {} nodes exceeds the u32 count field",
            hole.len()
        );
        buffer.extend_from_slice(&(hole.len() as u32).to_le_bytes());
        for node in hole {
            encode_node(&mut buffer, node);
        }
    }
    Ok(buffer)
}

/// Decode a curve-aware polygon blob.
pub fn decode_curved_polygon(bytes: &[u8]) -> Result<CurvedPolygon> {
    let mut cursor = Cursor::new(bytes);

    let outer_count = cursor
        .read_u32::<LittleEndian>()
        .context("polygon blob shorter than its outer count field")?;
    let outer = decode_ring_nodes(&mut cursor, bytes.len() as u64, outer_count)
        .context("decoding outer ring")?;

    let hole_count = cursor
        .read_u16::<LittleEndian>()
        .context("polygon blob missing hole count")?;
    let mut holes = Vec::with_capacity(hole_count as usize);
    for i in 0..hole_count {
        let node_count = cursor
            .read_u32::<LittleEndian>()
            .with_context(|| format!("polygon blob missing count of hole {}", i))?;
        let hole = decode_ring_nodes(&mut cursor, bytes.len() as u64, node_count)
            .with_context(|| format!("decoding hole {}", i))?;
        holes.push(hole);
    }

    Ok(CurvedPolygon { outer, holes })
}

fn encode_node(buffer: &mut Vec<u8>, node: &PolygonNode) {
    match node {
        PolygonNode::Straight(pos) => {
            buffer.extend_from_slice(&NODE_TYPE_STRAIGHT.to_le_bytes());
            buffer.extend_from_slice(&pos.lon.to_le_bytes());
            buffer.extend_from_slice(&pos.lat.to_le_bytes());
        }
        PolygonNode::Curve { point, control } => {
            buffer.extend_from_slice(&NODE_TYPE_CURVE.to_le_bytes());
            buffer.extend_from_slice(&point.lon.to_le_bytes());
            buffer.extend_from_slice(&point.lat.to_le_bytes());
            buffer.extend_from_slice(&control.lon.to_le_bytes());
            buffer.extend_from_slice(&control.lat.to_le_bytes());
        }
    }
}

fn decode_ring_nodes(
    cursor: &mut Cursor<&[u8]>,
    total_len: u64,
    count: u32,
) -> Result<Vec<PolygonNode>> {
    // Curve nodes are wider than the minimum, so this is a lower bound; the
    // per-node reads still verify the rest.
    let remaining = total_len - cursor.position();
    ensure!(
        remaining >= count as u64 * MIN_NODE_SIZE,
        "ring truncated: {} nodes announced, {} bytes remain",
        count,
        remaining
    );

    let mut nodes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let node_type = cursor.read_i8()?;
        let lon = cursor.read_f32::<LittleEndian>()?;
        let lat = cursor.read_f32::<LittleEndian>()?;
        let point = Position::new(lon, lat);
        match node_type {
            NODE_TYPE_STRAIGHT => nodes.push(PolygonNode::Straight(point)),
            NODE_TYPE_CURVE => {
                let control_lon = cursor.read_f32::<LittleEndian>()?;
                let control_lat = cursor.read_f32::<LittleEndian>()?;
                nodes.push(PolygonNode::Curve {
                    point,
                    control: Position::new(control_lon, control_lat),
                });
            }
            other => bail!("unknown polygon node type {}", other),
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_polygon() -> CurvedPolygon {
        CurvedPolygon {
            outer: vec![
                PolygonNode::Straight(Position::new(-71.0101, 42.3656)),
                PolygonNode::Curve {
                    point: Position::new(-71.0088, 42.3661),
                    control: Position::new(-71.0094, 42.3664),
                },
                PolygonNode::Straight(Position::new(-71.0079, 42.3650)),
                PolygonNode::Straight(Position::new(-71.0095, 42.3645)),
            ],
            holes: vec![vec![
                PolygonNode::Straight(Position::new(-71.0092, 42.3653)),
                PolygonNode::Straight(Position::new(-71.0089, 42.3654)),
                PolygonNode::Curve {
                    point: Position::new(-71.0090, 42.3651),
                    control: Position::new(-71.0091, 42.3650),
                },
            ]],
        }
    }

    #[test]
    fn test_round_trip() {
        let polygon = sample_polygon();
        let bytes = encode_curved_polygon(&polygon).unwrap();
        assert_eq!(decode_curved_polygon(&bytes).unwrap(), polygon);
    }

    #[test]
    fn test_layout() {
        let polygon = CurvedPolygon {
            outer: vec![
                PolygonNode::Straight(Position::new(1.0, 2.0)),
                PolygonNode::Curve {
                    point: Position::new(3.0, 4.0),
                    control: Position::new(5.0, 6.0),
                },
            ],
            holes: vec![],
        };
        let bytes = encode_curved_polygon(&polygon).unwrap();
        // u32 count + straight node (9) + curve node (17) + u16 hole count.
        assert_eq!(bytes.len(), 4 + 9 + 17 + 2);
        assert_eq!(&bytes[0..4], &2u32.to_le_bytes());
        assert_eq!(bytes[4] as i8, NODE_TYPE_STRAIGHT);
        assert_eq!(bytes[13] as i8, NODE_TYPE_CURVE);
        assert_eq!(&bytes[30..32], &0u16.to_le_bytes());
    }

    #[test]
    fn test_no_holes_round_trip() {
        let polygon = CurvedPolygon {
            outer: vec![
                PolygonNode::Straight(Position::new(0.0, 0.0)),
                PolygonNode::Straight(Position::new(1.0, 0.0)),
                PolygonNode::Straight(Position::new(0.5, 1.0)),
            ],
            holes: vec![],
        };
        let bytes = encode_curved_polygon(&polygon).unwrap();
        let decoded = decode_curved_polygon(&bytes).unwrap();
        assert_eq!(decoded, polygon);
        assert!(decoded.holes.is_empty());
    }

    #[test]
    fn test_unknown_node_type_is_error() {
        let polygon = sample_polygon();
        let mut bytes = encode_curved_polygon(&polygon).unwrap();
        bytes[4] = 7;
        assert!(decode_curved_polygon(&bytes).is_err());
    }

    #[test]
    fn test_truncated_buffer_is_error() {
        let bytes = encode_curved_polygon(&sample_polygon()).unwrap();
        assert!(decode_curved_polygon(&bytes[..bytes.len() - 2]).is_err());
        assert!(decode_curved_polygon(&bytes[..5]).is_err());
        assert!(decode_curved_polygon(&[]).is_err());
    }

    #[test]
    fn test_hostile_count_does_not_allocate() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(decode_curved_polygon(&bytes).is_err());
    }
}

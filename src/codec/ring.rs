//! Plain ring codec
//!
//! Fixed layout for simple lat/lon line strings:
//!
//! ```text
//! u32 count; count x { f32 lon; f32 lat; }
//! ```
//!
//! Little endian, single precision, no header and no version field. The
//! layout is shared with other tools through the database and must stay
//! byte-for-byte identical; in particular the missing version field must
//! not be "fixed".

use std::io::Cursor;

use anyhow::{ensure, Context, Result};
use byteorder::{LittleEndian, ReadBytesExt};

use crate::geom::{Position, Ring};

/// Bytes per encoded point: lon + lat.
const POINT_SIZE: u64 = 8;

/// Encode a ring into the plain lon/lat blob. Altitudes are not stored.
pub fn encode_ring(ring: &[Position]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(4 + ring.len() * POINT_SIZE as usize);
    buffer.extend_from_slice(&(ring.len() as u32).to_le_bytes());
    for pos in ring {
        buffer.extend_from_slice(&pos.lon.to_le_bytes());
        buffer.extend_from_slice(&pos.lat.to_le_bytes());
    }
    buffer
}

/// Decode a plain ring blob. Fails on truncated buffers without reading
/// past the end.
pub fn decode_ring(bytes: &[u8]) -> Result<Ring> {
    let mut cursor = Cursor::new(bytes);
    let count = cursor
        .read_u32::<LittleEndian>()
        .context("ring blob shorter than its count field")?;

    let remaining = bytes.len() as u64 - cursor.position();
    ensure!(
        remaining >= count as u64 * POINT_SIZE,
        "ring blob truncated: {} points announced, {} bytes remain",
        count,
        remaining
    );

    let mut ring = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let lon = cursor.read_f32::<LittleEndian>()?;
        let lat = cursor.read_f32::<LittleEndian>()?;
        ring.push(Position::new(lon, lat));
    }
    Ok(ring)
}

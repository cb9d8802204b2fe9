//! MSA sector-fan codec
//!
//! Fixed layout, little endian, single precision:
//!
//! ```text
//! u16 geometryPointCount; geometryPointCount x { f32 lon; f32 lat; }
//! u8 sectorCount; sectorCount x {
//!     f32 bearingDeg; f32 altitudeFt;
//!     f32 bearingEndLon; f32 bearingEndLat;
//!     f32 labelLon; f32 labelLat;
//! }
//! ```
//!
//! Decoding reconstructs the four parallel per-sector sequences plus the
//! outer ring; the bounding rectangle is derived, not stored.

use std::io::Cursor;

use anyhow::{anyhow, ensure, Context, Result};
use byteorder::{LittleEndian, ReadBytesExt};

use crate::assemble::MsaGeometry;
use crate::geom::{BoundingRect, Position, Ring};

const POINT_SIZE: u64 = 8;
const SECTOR_SIZE: u64 = 24;

/// Encode MSA geometry into the sector-fan blob. Fails when the ring or
/// sector counts overflow their fixed-width count fields or the per-sector
/// sequences disagree in length.
pub fn encode_msa_fan(geometry: &MsaGeometry) -> Result<Vec<u8>> {
    let sectors = geometry.bearings.len();
    ensure!(
        geometry.altitudes.len() == sectors
            && geometry.bearing_end_positions.len() == sectors
            && geometry.label_positions.len() == sectors,
        "MSA sector sequences disagree in length"
    );
    ensure!(
        geometry.geometry.len() <= u16::MAX as usize,
        "MSA ring of {} points exceeds the u16 count field",
        geometry.geometry.len()
    );
    ensure!(
        sectors <= u8::MAX as usize,
        "{} MSA sectors exceed the u8 count field",
        sectors
    );

    let mut buffer = Vec::with_capacity(
        3 + geometry.geometry.len() * POINT_SIZE as usize + sectors * SECTOR_SIZE as usize,
    );
    buffer.extend_from_slice(&(geometry.geometry.len() as u16).to_le_bytes());
    for pos in &geometry.geometry {
        buffer.extend_from_slice(&pos.lon.to_le_bytes());
        buffer.extend_from_slice(&pos.lat.to_le_bytes());
    }

    buffer.push(sectors as u8);
    for i in 0..sectors {
        buffer.extend_from_slice(&geometry.bearings[i].to_le_bytes());
        buffer.extend_from_slice(&geometry.altitudes[i].to_le_bytes());
        buffer.extend_from_slice(&geometry.bearing_end_positions[i].lon.to_le_bytes());
        buffer.extend_from_slice(&geometry.bearing_end_positions[i].lat.to_le_bytes());
        buffer.extend_from_slice(&geometry.label_positions[i].lon.to_le_bytes());
        buffer.extend_from_slice(&geometry.label_positions[i].lat.to_le_bytes());
    }
    Ok(buffer)
}

/// Decode an MSA sector-fan blob.
pub fn decode_msa_fan(bytes: &[u8]) -> Result<MsaGeometry> {
    let mut cursor = Cursor::new(bytes);

    let point_count = cursor
        .read_u16::<LittleEndian>()
        .context("MSA blob shorter than its ring count field")?;
    let remaining = bytes.len() as u64 - cursor.position();
    ensure!(
        remaining >= point_count as u64 * POINT_SIZE,
        "MSA ring truncated: {} points announced, {} bytes remain",
        point_count,
        remaining
    );
    let mut geometry: Ring = Vec::with_capacity(point_count as usize);
    for _ in 0..point_count {
        let lon = cursor.read_f32::<LittleEndian>()?;
        let lat = cursor.read_f32::<LittleEndian>()?;
        geometry.push(Position::new(lon, lat));
    }

    let sector_count = cursor.read_u8().context("MSA blob missing sector count")?;
    let remaining = bytes.len() as u64 - cursor.position();
    ensure!(
        remaining >= sector_count as u64 * SECTOR_SIZE,
        "MSA sectors truncated: {} sectors announced, {} bytes remain",
        sector_count,
        remaining
    );

    let mut bearings = Vec::with_capacity(sector_count as usize);
    let mut altitudes = Vec::with_capacity(sector_count as usize);
    let mut bearing_ends: Ring = Vec::with_capacity(sector_count as usize);
    let mut labels: Ring = Vec::with_capacity(sector_count as usize);
    for _ in 0..sector_count {
        bearings.push(cursor.read_f32::<LittleEndian>()?);
        altitudes.push(cursor.read_f32::<LittleEndian>()?);
        let end_lon = cursor.read_f32::<LittleEndian>()?;
        let end_lat = cursor.read_f32::<LittleEndian>()?;
        bearing_ends.push(Position::new(end_lon, end_lat));
        let label_lon = cursor.read_f32::<LittleEndian>()?;
        let label_lat = cursor.read_f32::<LittleEndian>()?;
        labels.push(Position::new(label_lon, label_lat));
    }

    let bounding_rect = BoundingRect::from_points(&geometry)
        .ok_or_else(|| anyhow!("MSA blob contains no valid ring points"))?;

    Ok(MsaGeometry {
        geometry,
        bearings,
        altitudes,
        bearing_end_positions: bearing_ends,
        label_positions: labels,
        bounding_rect,
    })
}

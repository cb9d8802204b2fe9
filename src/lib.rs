//! Compilation of aeronautical boundary geometry
//!
//! This crate turns heterogeneous descriptions of aeronautical boundaries
//! (controlled/restricted airspace outlines, MSA sector diagrams, pavement
//! and taxiway outlines) into closed polygon or sector-fan geometry and
//! (de)serializes that geometry into compact fixed-layout binary blobs for
//! storage in a spatial database column.
//!
//! Source-format readers (ARINC/DFD rows, OpenAir records, IVAO/VATSIM
//! JSON, X-Plane apt.dat) stay outside this crate: an adapter maps its own
//! notation onto [`assemble::BoundarySegment`] values and feeds them to a
//! [`assemble::BoundaryAssembler`], or builds an [`assemble::MsaDefinition`]
//! for the [`assemble::MsaSectorBuilder`]. The finished geometry goes
//! through one of the [`codec`] functions for storage, or back through its
//! decoder for rendering.
//!
//! # Modules
//! - [`geom`] - Positions, rings and degree-based spherical Earth geometry
//! - [`assemble`] - The boundary assembler and the MSA sector builder
//! - [`codec`] - The three fixed-layout binary codecs

pub mod assemble;
pub mod codec;
pub mod geom;

pub use assemble::{
    ArcDirection, AssemblerConfig, AssemblyWarning, BoundaryAssembler, BoundarySegment,
    MsaDefinition, MsaGeometry, MsaSector, MsaSectorBuilder,
};
pub use geom::{CurvedPolygon, PolygonNode, Position, Ring};

//! Boundary and MSA assembly
//!
//! Streaming construction of closed rings from source-format segment
//! streams, plus derivation of MSA sector-fan geometry.
//!
//! # Submodules
//! - `segment` - The boundary segment model shared by all source adapters
//! - `assembler` - The boundary assembler state machine
//! - `msa` - The MSA sector builder

mod assembler;
mod msa;
mod segment;

pub use assembler::{AssemblerConfig, AssemblyWarning, BoundaryAssembler};
pub use msa::{MsaConfig, MsaDefinition, MsaGeometry, MsaSector, MsaSectorBuilder, MsaWarning};
pub use segment::{ArcDirection, BoundarySegment};

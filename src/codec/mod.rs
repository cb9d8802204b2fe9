//! Binary geometry codecs
//!
//! Three independent fixed-layout (de)serializers for the blobs stored in
//! the spatial database column. All are pure functions over byte buffers
//! and keep no state across calls, so they are freely shareable between
//! threads.
//!
//! # Submodules
//! - `ring` - Plain lon/lat ring blob (unversioned, by design)
//! - `msa` - MSA sector-fan blob
//! - `polygon` - Hole-aware polygon blob with curve-node markers

mod msa;
mod polygon;
mod ring;

pub use msa::{decode_msa_fan, encode_msa_fan};
pub use polygon::{decode_curved_polygon, encode_curved_polygon};
pub use ring::{decode_ring, encode_ring};

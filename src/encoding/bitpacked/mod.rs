//! The sibling bit-packed codec `DELTA_BINARY_PACKED` depends on: two
//! primitives that pack/unpack exactly 8 integers into/from `bit_width`
//! bytes, using little-endian bit order. Kept independent of the
//! block/miniblock framing in [`super::delta_bitpacked`] and exercised by
//! its own unit tests.

mod pack;
mod unpack;

pub use pack::pack8_values_le;
pub use unpack::unpack8_values_le;

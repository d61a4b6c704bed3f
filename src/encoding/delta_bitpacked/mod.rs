//! `DELTA_BINARY_PACKED`: Parquet's delta + bit-packing encoding for signed
//! integer columns.
//!
//! The wire format is generic over value width (32 or 64 bits); rather than
//! duplicating the block/miniblock framing per width, [`encoder::encode`]
//! and [`decoder::decode`] are written once against the [`value::DeltaNative`]
//! trait and monomorphized for `i32` and `i64` by the four functions below.

mod decoder;
mod encoder;
mod value;

pub use decoder::Decoded;
pub use value::DeltaNative;

use std::io::Write;

use crate::error::Result;

/// Default block size used by reference Parquet writers: 128 values.
pub const DEFAULT_BLOCK_SIZE: usize = 128;
/// Default miniblock size used by reference Parquet writers: 32 values.
pub const DEFAULT_MINIBLOCK_SIZE: usize = 32;

/// Encodes `values` into `sink` with the given block/miniblock geometry.
///
/// `block_size` must be a positive multiple of `miniblock_size`, and
/// `miniblock_size` must be a positive multiple of 8.
pub fn encode_i32<W: Write>(
    values: &[i32],
    sink: &mut W,
    block_size: usize,
    miniblock_size: usize,
) -> Result<()> {
    encoder::encode(values, sink, block_size, miniblock_size)
}

/// `i64` counterpart of [`encode_i32`].
pub fn encode_i64<W: Write>(
    values: &[i64],
    sink: &mut W,
    block_size: usize,
    miniblock_size: usize,
) -> Result<()> {
    encoder::encode(values, sink, block_size, miniblock_size)
}

/// Decodes a `DELTA_BINARY_PACKED` stream from `bytes` into `dest`.
///
/// Returns how many values were produced and how many input bytes were
/// consumed. `dest` smaller than the stream's declared value count is not
/// an error: decoding stops once `dest` is full.
pub fn decode_i32(bytes: &[u8], dest: &mut [i32]) -> Result<Decoded> {
    decoder::decode(bytes, dest)
}

/// `i64` counterpart of [`decode_i32`].
pub fn decode_i64(bytes: &[u8], dest: &mut [i64]) -> Result<Decoded> {
    decoder::decode(bytes, dest)
}

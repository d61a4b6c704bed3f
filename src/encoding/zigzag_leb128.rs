use super::uleb128;
use crate::error::Result;

/// Decodes a zig-zag encoded, ULEB128-varint-packed `i64` from the start of
/// `bytes`. `base_offset` is used the same way as in [`uleb128::decode`].
pub fn decode(bytes: &[u8], base_offset: usize) -> Result<(i64, usize)> {
    let (u, consumed) = uleb128::decode(bytes, base_offset)?;
    Ok(((u >> 1) as i64 ^ -((u & 1) as i64), consumed))
}

/// Zig-zag encodes `value` and writes it as a ULEB128 varint into a fresh
/// 10-byte container, returning the container and the number of bytes used.
pub fn encode(value: i64) -> ([u8; 10], usize) {
    let zigzagged = ((value << 1) ^ (value >> 63)) as u64;
    let mut container = [0u8; 10];
    let len = uleb128::encode(zigzagged, &mut container);
    (container, len)
}

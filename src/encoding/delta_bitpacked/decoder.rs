use super::value::DeltaNative;
use crate::encoding::bitpacked::unpack8_values_le;
use crate::encoding::{uleb128, zigzag_leb128};
use crate::error::{malformed, Result};

/// Outcome of a single [`decode`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Number of values written into the destination slice.
    pub produced: usize,
    /// Number of bytes of the input consumed to produce them.
    pub consumed: usize,
}

fn tail(bytes: &[u8], offset: usize) -> &[u8] {
    bytes.get(offset..).unwrap_or(&[])
}

/// Decodes a `DELTA_BINARY_PACKED` stream from `bytes` into `dest`.
///
/// Stops once `dest` is full or the stream's declared value count is
/// reached, whichever comes first -- a destination smaller than the
/// stream's total value count is not an error, just a partial decode.
pub(crate) fn decode<T: DeltaNative>(bytes: &[u8], dest: &mut [T]) -> Result<Decoded> {
    if bytes.is_empty() {
        return Ok(Decoded {
            produced: 0,
            consumed: 0,
        });
    }

    let mut offset = 0usize;

    let (block_size, len) = uleb128::decode(tail(bytes, offset), offset)?;
    offset += len;
    let (miniblock_count_raw, len) = uleb128::decode(tail(bytes, offset), offset)?;
    offset += len;
    let (total_value_count_raw, len) = uleb128::decode(tail(bytes, offset), offset)?;
    offset += len;
    let (first_value, len) = zigzag_leb128::decode(tail(bytes, offset), offset)?;
    offset += len;

    let total_value_count = total_value_count_raw as usize;
    if total_value_count == 0 {
        return Ok(Decoded {
            produced: 0,
            consumed: offset,
        });
    }

    let limit = dest.len().min(total_value_count);
    if limit == 0 {
        return Ok(Decoded {
            produced: 0,
            consumed: offset,
        });
    }

    dest[0] = T::narrow(first_value);
    let mut produced = 1usize;
    let mut current = first_value;

    if produced == limit {
        return Ok(Decoded { produced, consumed: offset });
    }

    let miniblock_count = miniblock_count_raw as usize;
    if miniblock_count == 0 {
        return malformed(offset, "miniblock_count must be > 0");
    }
    if block_size == 0 || block_size % miniblock_count_raw != 0 {
        return malformed(
            offset,
            "block_size must be a positive multiple of miniblock_count",
        );
    }
    let miniblock_size = (block_size / miniblock_count_raw) as usize;
    if miniblock_size == 0 || miniblock_size % 8 != 0 {
        return malformed(offset, "miniblock_size must be a positive multiple of 8");
    }

    'blocks: while produced < limit && offset < bytes.len() {
        let (min_delta, len) = zigzag_leb128::decode(tail(bytes, offset), offset)?;
        offset += len;

        let available = bytes.len().saturating_sub(offset).min(miniblock_count);
        let mut bitwidths = vec![0u8; miniblock_count];
        bitwidths[..available].copy_from_slice(&bytes[offset..offset + available]);
        offset += available;

        tracing::trace!(min_delta, miniblock_count, "parsed block header");

        for &bw in &bitwidths {
            if produced == limit {
                break 'blocks;
            }
            if bw as u32 > T::BITS {
                return malformed(offset, "bit width exceeds destination type's width");
            }

            if bw == 0 {
                let count = miniblock_size.min(limit - produced);
                for _ in 0..count {
                    current = current.wrapping_add(min_delta);
                    dest[produced] = T::narrow(current);
                    produced += 1;
                }
                continue;
            }

            let body_len = miniblock_size / 8 * bw as usize;
            if offset + body_len > bytes.len() {
                break 'blocks;
            }

            // Every chunk's bytes must be consumed even once `produced`
            // reaches `limit`, so `offset` lands on the next block/miniblock
            // boundary rather than mid-body.
            for _ in 0..miniblock_size / 8 {
                let packed = &bytes[offset..offset + bw as usize];
                offset += bw as usize;
                let mut chunk = [0u64; 8];
                unpack8_values_le(packed, bw, &mut chunk);
                for &d in &chunk {
                    if produced == limit {
                        continue;
                    }
                    current = current.wrapping_add(min_delta.wrapping_add(d as i64));
                    dest[produced] = T::narrow(current);
                    produced += 1;
                }
            }
        }
    }

    Ok(Decoded { produced, consumed: offset })
}

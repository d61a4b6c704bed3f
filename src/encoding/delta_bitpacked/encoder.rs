use std::io::Write;

use super::value::DeltaNative;
use crate::encoding::bitpacked::pack8_values_le;
use crate::encoding::{uleb128, zigzag_leb128};
use crate::error::{Error, Result};

/// Checks `block_size`/`miniblock_size` against the wire format's
/// constraints and returns the miniblock count implied by them.
pub(crate) fn validate_config(block_size: usize, miniblock_size: usize) -> Result<usize> {
    if block_size == 0 {
        return Err(Error::InvalidConfig("block_size must be > 0".to_string()));
    }
    if miniblock_size == 0 || miniblock_size % 8 != 0 {
        return Err(Error::InvalidConfig(
            "miniblock_size must be a positive multiple of 8".to_string(),
        ));
    }
    if block_size % miniblock_size != 0 {
        return Err(Error::InvalidConfig(
            "block_size must be a multiple of miniblock_size".to_string(),
        ));
    }
    Ok(block_size / miniblock_size)
}

/// Encodes `values` as a `DELTA_BINARY_PACKED` stream into `sink`, using
/// `block_size` values per block and `miniblock_size` values per miniblock.
///
/// Writes nothing for an empty `values`.
pub(crate) fn encode<T: DeltaNative, W: Write>(
    values: &[T],
    sink: &mut W,
    block_size: usize,
    miniblock_size: usize,
) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    let miniblock_count = validate_config(block_size, miniblock_size)?;

    let mut container = [0u8; 10];
    let len = uleb128::encode(block_size as u64, &mut container);
    sink.write_all(&container[..len])?;
    let len = uleb128::encode(miniblock_count as u64, &mut container);
    sink.write_all(&container[..len])?;
    let len = uleb128::encode(values.len() as u64, &mut container);
    sink.write_all(&container[..len])?;

    let (container, len) = zigzag_leb128::encode(values[0].widen());
    sink.write_all(&container[..len])?;

    if values.len() == 1 {
        return Ok(());
    }

    tracing::trace!(
        count = values.len(),
        block_size,
        miniblock_size,
        "encoding delta-binary-packed stream"
    );

    let mut deltas = Vec::with_capacity(block_size);
    let mut prev = values[0];
    let mut idx = 1;
    while idx < values.len() {
        let block_end = (idx + block_size).min(values.len());

        deltas.clear();
        let mut min_delta = i64::MAX;
        for &v in &values[idx..block_end] {
            let delta = v.wrapping_delta(prev);
            prev = v;
            min_delta = min_delta.min(delta);
            deltas.push(delta);
        }

        flush_block(sink, &deltas, min_delta, miniblock_count, miniblock_size)?;
        idx = block_end;
    }
    Ok(())
}

/// Writes one block: the zig-zag minimum delta, one bit-width byte per
/// miniblock, then each miniblock's bit-packed body.
///
/// Miniblocks past the end of `deltas` (a short final block) get no body
/// bytes; their bit-width byte is zero. A miniblock that does have values
/// but fewer than `miniblock_size` of them gets a full-width body, its
/// unfilled tail positions bit-packed as zero.
fn flush_block<W: Write>(
    sink: &mut W,
    deltas: &[i64],
    min_delta: i64,
    miniblock_count: usize,
    miniblock_size: usize,
) -> Result<()> {
    tracing::trace!(len = deltas.len(), min_delta, "flushing block");

    let (container, len) = zigzag_leb128::encode(min_delta);
    sink.write_all(&container[..len])?;

    let mut bitwidths = vec![0u8; miniblock_count];
    for (m, bw) in bitwidths.iter_mut().enumerate() {
        let start = m * miniblock_size;
        if start >= deltas.len() {
            continue;
        }
        let end = (start + miniblock_size).min(deltas.len());
        let max_adjusted = deltas[start..end]
            .iter()
            .map(|d| d.wrapping_sub(min_delta) as u64)
            .max()
            .unwrap_or(0);
        *bw = bit_width_of(max_adjusted);
    }
    sink.write_all(&bitwidths)?;

    let mut scratch = [0u64; 8];
    for (m, &bw) in bitwidths.iter().enumerate() {
        let start = m * miniblock_size;
        if start >= deltas.len() || bw == 0 {
            continue;
        }
        let end = (start + miniblock_size).min(deltas.len());

        let body_len = miniblock_size / 8 * bw as usize;
        let mut body = vec![0u8; body_len];
        let mut written = 0;
        for chunk_start in (start..start + miniblock_size).step_by(8) {
            scratch = [0u64; 8];
            let filled = end.saturating_sub(chunk_start).min(8);
            for (i, slot) in scratch.iter_mut().enumerate().take(filled) {
                *slot = deltas[chunk_start + i].wrapping_sub(min_delta) as u64;
            }
            pack8_values_le(scratch, bw, &mut body[written..written + bw as usize]);
            written += bw as usize;
        }
        sink.write_all(&body)?;
    }
    Ok(())
}

#[inline]
fn bit_width_of(x: u64) -> u8 {
    if x == 0 {
        0
    } else {
        (64 - x.leading_zeros()) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::delta_bitpacked::decoder::decode;

    fn roundtrip<T: DeltaNative + std::fmt::Debug + PartialEq>(
        values: &[T],
        block_size: usize,
        miniblock_size: usize,
    ) {
        let mut buffer = Vec::new();
        encode(values, &mut buffer, block_size, miniblock_size).unwrap();

        let mut dest = vec![T::narrow(0); values.len()];
        let decoded = decode(&buffer, &mut dest).unwrap();
        assert_eq!(decoded.produced, values.len());
        assert_eq!(dest, values);
        if !values.is_empty() {
            assert_eq!(decoded.consumed, buffer.len());
        }
    }

    #[test]
    fn empty_writes_nothing() {
        let mut buffer = Vec::new();
        encode::<i32, _>(&[], &mut buffer, 128, 32).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn single_value() {
        roundtrip(&[42i32], 128, 32);
    }

    #[test]
    fn constant_delta() {
        let values: Vec<i32> = (0..64).collect();
        roundtrip(&values, 128, 32);
    }

    #[test]
    fn negative_min_delta() {
        let values = vec![1i32, 3, -1, 2, 3];
        roundtrip(&values, 128, 32);
    }

    #[test]
    fn more_than_one_block() {
        let mut data = vec![1i32, 3, -1, 2, 3, 10, 1];
        for x in 0..128 {
            data.push(x - 10);
        }
        roundtrip(&data, 128, 32);
    }

    #[test]
    fn max_magnitude_jump_is_bit_exact() {
        roundtrip(&[0i32, i32::MAX, i32::MIN, 0], 128, 32);
    }

    #[test]
    fn i64_extremes() {
        roundtrip(&[i64::MIN, i64::MAX], 128, 32);
    }

    #[test]
    fn i64_max_magnitude_jump_does_not_overflow() {
        // min_delta-adjustment must wrap at native width: plain `i64::MAX -
        // i64::MIN` overflows and panics in debug builds.
        roundtrip(&[0i64, i64::MAX, 0], 128, 32);
        roundtrip(&[0i64, i64::MIN, 0], 128, 32);
    }

    #[test]
    fn invalid_config_rejected() {
        let mut buffer = Vec::new();
        assert!(encode::<i32, _>(&[1], &mut buffer, 0, 32).is_err());
        assert!(encode::<i32, _>(&[1], &mut buffer, 128, 0).is_err());
        assert!(encode::<i32, _>(&[1], &mut buffer, 100, 32).is_err());
        assert!(encode::<i32, _>(&[1], &mut buffer, 128, 7).is_err());
    }
}

//! Synthetic raw streams for tests.

use crate::image_pipeline::metadata::types::BitOrder;

/// Packs 12-bit values pairwise into 3 bytes, the inverse of `unpack_12bit`.
pub(crate) fn pack_12bit(values: &[u16], order: BitOrder) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * 3 / 2);
    for pair in values.chunks_exact(2) {
        let (first, second) = (pair[0] & 0x0FFF, pair[1] & 0x0FFF);
        match order {
            BitOrder::Lower => {
                bytes.push((first >> 4) as u8);
                bytes.push((((first & 0x0F) << 4) | (second >> 8)) as u8);
                bytes.push((second & 0xFF) as u8);
            }
            BitOrder::Higher | BitOrder::Unknown => {
                bytes.push((first & 0xFF) as u8);
                bytes.push(((first >> 8) | ((second & 0x0F) << 4)) as u8);
                bytes.push((second >> 4) as u8);
            }
        }
    }
    bytes
}

/// Serializes 16-bit values in the given byte order.
pub(crate) fn pack_u16(values: &[u16], order: BitOrder) -> Vec<u8> {
    values
        .iter()
        .flat_map(|&v| match order {
            BitOrder::Lower => v.to_le_bytes(),
            BitOrder::Higher | BitOrder::Unknown => v.to_be_bytes(),
        })
        .collect()
}

//! Pixel unpacking routines.
//!
//! These operate on the bytes of exactly one frame. `BitOrder::Unknown` must be
//! resolved by the caller; it is assembled like `Higher` here.

use crate::image_pipeline::metadata::types::BitOrder;

/// 8-bit storage: one byte per pixel, shifted left by `shift` and truncated to 8 bits.
pub fn unpack_u8(bytes: &[u8], shift: u32) -> Vec<u8> {
    bytes
        .iter()
        .map(|&b| (u32::from(b) << shift) as u8)
        .collect()
}

/// 16-bit storage: two bytes per pixel assembled in `order`, shifted left by
/// `shift` and truncated to 16 bits.
pub fn unpack_u16(bytes: &[u8], order: BitOrder, shift: u32) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| {
            let word = [pair[0], pair[1]];
            let value = match order {
                BitOrder::Lower => u16::from_le_bytes(word),
                BitOrder::Higher | BitOrder::Unknown => u16::from_be_bytes(word),
            };
            (u32::from(value) << shift) as u16
        })
        .collect()
}

/// Packed 12-bit storage: every 3 bytes hold two pixels.
///
/// `Higher`: `first = b0 | (b1 & 0x0F) << 8`, `second = b1 >> 4 | b2 << 4`.
/// `Lower`:  `first = b0 << 4 | b1 >> 4`,     `second = (b1 & 0x0F) << 8 | b2`.
pub fn unpack_12bit(bytes: &[u8], order: BitOrder) -> Vec<u16> {
    let mut pixels = Vec::with_capacity(bytes.len() / 3 * 2);
    for group in bytes.chunks_exact(3) {
        let (b0, b1, b2) = (u16::from(group[0]), u16::from(group[1]), u16::from(group[2]));
        let (first, second) = match order {
            BitOrder::Lower => ((b0 << 4) | (b1 >> 4), ((b1 & 0x0F) << 8) | b2),
            BitOrder::Higher | BitOrder::Unknown => (b0 | ((b1 & 0x0F) << 8), (b1 >> 4) | (b2 << 4)),
        };
        pixels.push(first);
        pixels.push(second);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::fixtures::pack_12bit;

    #[test]
    fn test_u8_passthrough_and_shift() {
        assert_eq!(unpack_u8(&[10, 20, 30], 0), vec![10, 20, 30]);
        assert_eq!(unpack_u8(&[0x0F, 0x1F], 4), vec![0xF0, 0xF0]);
    }

    #[test]
    fn test_u16_byte_order() {
        let bytes = [0x01, 0x02, 0xAB, 0xCD];
        assert_eq!(unpack_u16(&bytes, BitOrder::Higher, 0), vec![0x0102, 0xABCD]);
        assert_eq!(unpack_u16(&bytes, BitOrder::Lower, 0), vec![0x0201, 0xCDAB]);
    }

    #[test]
    fn test_u16_shift_moves_effective_bits_up() {
        // 12 effective bits in 16-bit storage
        let bytes = [0x0F, 0xFF, 0x00, 0x01];
        assert_eq!(unpack_u16(&bytes, BitOrder::Higher, 4), vec![0xFFF0, 0x0010]);
    }

    #[test]
    fn test_12bit_known_bytes() {
        let bytes = [0xAB, 0xCD, 0xEF];
        assert_eq!(unpack_12bit(&bytes, BitOrder::Higher), vec![0xDAB, 0xEFC]);
        assert_eq!(unpack_12bit(&bytes, BitOrder::Lower), vec![0xABC, 0xDEF]);
    }

    #[test]
    fn test_12bit_recovers_packed_values() {
        let values: Vec<u16> = vec![0, 4095, 1, 2048, 0x123, 0xABC];
        for order in [BitOrder::Higher, BitOrder::Lower] {
            let bytes = pack_12bit(&values, order);
            assert_eq!(bytes.len(), values.len() * 3 / 2);
            assert_eq!(unpack_12bit(&bytes, order), values);
        }
    }
}

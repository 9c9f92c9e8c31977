//! Decoded frame types

/// Pixel storage of a decoded frame, using the narrowest word that holds the
/// storage bit size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramePixels {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl FramePixels {
    pub fn len(&self) -> usize {
        match self {
            FramePixels::U8(values) => values.len(),
            FramePixels::U16(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<u16> {
        match self {
            FramePixels::U8(values) => values.get(index).map(|&v| u16::from(v)),
            FramePixels::U16(values) => values.get(index).copied(),
        }
    }

    /// Widens every value to `u16`.
    pub fn to_u16(&self) -> Vec<u16> {
        match self {
            FramePixels::U8(values) => values.iter().map(|&v| u16::from(v)).collect(),
            FramePixels::U16(values) => values.clone(),
        }
    }

    /// True when every value is an exact multiple of `divisor`.
    pub fn all_multiples_of(&self, divisor: u32) -> bool {
        if divisor == 0 {
            return false;
        }
        match self {
            FramePixels::U8(values) => values.iter().all(|&v| u32::from(v) % divisor == 0),
            FramePixels::U16(values) => values.iter().all(|&v| u32::from(v) % divisor == 0),
        }
    }
}

/// One decoded frame, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Storage bit size the frame was decoded from (8, 12 or 16)
    pub bit_size: u32,
    /// `width * height` pixel values
    pub pixels: FramePixels,
}

impl DecodedFrame {
    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x)
    }

    /// Row `y` widened to `u16`.
    pub fn row(&self, y: usize) -> Option<Vec<u16>> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        let end = start + self.width;
        match &self.pixels {
            FramePixels::U8(values) => values.get(start..end).map(|row| row.iter().map(|&v| u16::from(v)).collect()),
            FramePixels::U16(values) => values.get(start..end).map(<[u16]>::to_vec),
        }
    }

    /// The whole grid as `height` rows of `width` values.
    pub fn rows(&self) -> Vec<Vec<u16>> {
        (0..self.height).filter_map(|y| self.row(y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DecodedFrame {
        DecodedFrame {
            width: 3,
            height: 2,
            bit_size: 8,
            pixels: FramePixels::U8(vec![1, 2, 3, 4, 5, 6]),
        }
    }

    #[test]
    fn test_row_major_access() {
        let frame = frame();
        assert_eq!(frame.get(0, 0), Some(1));
        assert_eq!(frame.get(2, 1), Some(6));
        assert_eq!(frame.get(3, 0), None);
        assert_eq!(frame.get(0, 2), None);
        assert_eq!(frame.row(1), Some(vec![4, 5, 6]));
        assert_eq!(frame.rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn test_multiples() {
        assert!(FramePixels::U16(vec![0, 12, 24, 4092]).all_multiples_of(12));
        assert!(!FramePixels::U16(vec![0, 12, 13]).all_multiples_of(12));
        assert!(FramePixels::U8(vec![0, 8, 248]).all_multiples_of(8));
        assert!(!FramePixels::U8(vec![0]).all_multiples_of(0));
    }
}

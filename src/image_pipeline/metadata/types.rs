//! Acquisition parameter types

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Assembly direction of multi-byte (or multi-nibble) pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Most significant part first
    Higher,
    /// Least significant part first
    Lower,
    /// Not reliably recorded; resolved by inference before decoding
    Unknown,
}

impl BitOrder {
    /// Maps the raw metadata literal to an order. Anything but the two
    /// recognized literals is `Unknown`.
    pub fn from_metadata(value: &str) -> Self {
        match value {
            "Higher" => BitOrder::Higher,
            "Lower" => BitOrder::Lower,
            _ => BitOrder::Unknown,
        }
    }

    /// Swaps `Higher` and `Lower`; `Unknown` stays `Unknown`.
    pub fn flipped(self) -> Self {
        match self {
            BitOrder::Higher => BitOrder::Lower,
            BitOrder::Lower => BitOrder::Higher,
            BitOrder::Unknown => BitOrder::Unknown,
        }
    }
}

impl fmt::Display for BitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BitOrder::Higher => "Higher",
            BitOrder::Lower => "Lower",
            BitOrder::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

impl FromStr for BitOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "higher" => Ok(BitOrder::Higher),
            "lower" => Ok(BitOrder::Lower),
            other => Err(format!("unknown bit order '{other}' (expected 'higher' or 'lower')")),
        }
    }
}

/// Which of the two metadata syntaxes a file uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataEncoding {
    /// Line-based `Key : Value` text (`.cih`)
    Cih,
    /// Markup tags inside a `<cih>` region (`.cihx`)
    Cihx,
}

impl MetadataEncoding {
    /// Detects the encoding from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "cih" => Some(MetadataEncoding::Cih),
            "cihx" => Some(MetadataEncoding::Cihx),
            _ => None,
        }
    }
}

/// Normalized acquisition parameters of one recording.
///
/// Built once from the metadata file and never modified afterwards, except for
/// `bit_order`, which the frame decoder may refine through inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionParameters {
    /// Width of every frame in pixels
    pub width: usize,
    /// Height of every frame in pixels
    pub height: usize,
    /// Number of frames in the raw stream
    pub total_frames: usize,
    /// Recording rate in frames per second (informational)
    pub frame_rate: u32,
    /// Storage width of one pixel in bits (8, 12 or 16)
    pub bit_size: u32,
    /// Left shift that moves the effective bits to the high end of the storage word
    pub bit_shift: u32,
    /// Byte or nibble assembly order
    pub bit_order: BitOrder,
}

impl AcquisitionParameters {
    pub fn effective_bit_depth(&self) -> u32 {
        self.bit_size - self.bit_shift
    }

    pub fn pixels_per_frame(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Bytes occupied by one frame. For the packed 12-bit layout this is
    /// `pixels * 3 / 2`.
    ///
    /// Saturates instead of overflowing; parameters coming from the metadata
    /// parsers are guaranteed to fit (see `checked_raw_len`).
    pub fn frame_stride(&self) -> usize {
        self.pixels_per_frame().saturating_mul(self.bit_size as usize) / 8
    }

    pub fn frame_offset(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.frame_stride() as u64)
    }

    pub fn expected_raw_len(&self) -> u64 {
        self.frame_offset(self.total_frames)
    }

    /// Length of the whole raw stream, or `None` when one frame does not fit
    /// in memory or the stream length overflows `u64`.
    pub fn checked_raw_len(&self) -> Option<u64> {
        let pixels = (self.width as u64).checked_mul(self.height as u64)?;
        let stride = pixels.checked_mul(u64::from(self.bit_size))? / 8;
        usize::try_from(stride).ok()?;
        stride.checked_mul(self.total_frames as u64)
    }
}

//! Frame decoder for `.mraw` pixel streams.
//!
//! Frames are located arithmetically from the acquisition parameters; the raw
//! stream carries no index. Two layouts are supported: byte-aligned 8/16-bit
//! words and the packed 12-bit layout (two pixels per 3 bytes).
//!
//! When the metadata does not name a usable bit order, the decoder infers one
//! from frame 0 before serving the first request. The inference decodes frame 0
//! under the working hypothesis and flips the hypothesis only when it is `Lower`
//! and every trial value is a multiple of the storage bit size. An `Unknown`
//! order is first coerced to `Higher`, so automatic inference always settles on
//! `Higher`.

use tracing::{debug, instrument, warn};

use crate::image_pipeline::common::error::{MrawError, Result};
use crate::image_pipeline::metadata::types::{AcquisitionParameters, BitOrder};
use crate::image_pipeline::raw::reader::FrameSource;
use crate::image_pipeline::raw::types::{DecodedFrame, FramePixels};
use crate::image_pipeline::raw::unpack::{unpack_12bit, unpack_u16, unpack_u8};

pub struct FrameDecoder<S: FrameSource> {
    params: AcquisitionParameters,
    source: S,
}

impl<S: FrameSource> FrameDecoder<S> {
    pub fn new(params: AcquisitionParameters, source: S) -> Self {
        Self { params, source }
    }

    pub fn parameters(&self) -> &AcquisitionParameters {
        &self.params
    }

    pub fn bit_order(&self) -> BitOrder {
        self.params.bit_order
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Decodes frame `index` into a `height` x `width` grid.
    ///
    /// An `Unknown` bit order is resolved first, which reads frame 0.
    #[instrument(skip(self), fields(bit_size = self.params.bit_size))]
    pub fn decode(&mut self, index: usize) -> Result<DecodedFrame> {
        self.check_bit_size()?;
        if index >= self.params.total_frames {
            return Err(MrawError::FrameIndexOutOfRange {
                index,
                total: self.params.total_frames,
            });
        }
        self.check_packed_dimensions()?;

        if self.params.bit_order == BitOrder::Unknown {
            self.resolve_bit_order()?;
        }

        self.decode_with(index, self.params.bit_order)
    }

    /// Runs the bit order check against frame 0 and returns the resulting order.
    ///
    /// Calling it again on a settled `Higher` order is a no-op; on `Lower` it may
    /// flip to `Higher` once.
    #[instrument(skip(self))]
    pub fn verify_bit_order(&mut self) -> Result<BitOrder> {
        self.check_bit_size()?;
        self.check_packed_dimensions()?;

        if self.params.bit_order == BitOrder::Unknown {
            self.resolve_bit_order()?;
        } else {
            let checked = self.check_bit_order(self.params.bit_order)?;
            if checked != self.params.bit_order {
                debug!(from = %self.params.bit_order, to = %checked, "Bit order corrected");
                self.params.bit_order = checked;
            }
        }
        Ok(self.params.bit_order)
    }

    fn resolve_bit_order(&mut self) -> Result<()> {
        let resolved = self.check_bit_order(BitOrder::Higher)?;
        self.params.bit_order = resolved;
        warn!("Setting bit order automatically to {}", resolved);
        Ok(())
    }

    /// Decodes frame 0 under `hypothesis` and returns the order to keep.
    fn check_bit_order(&self, hypothesis: BitOrder) -> Result<BitOrder> {
        let trial = self.decode_with(0, hypothesis)?;
        // Unsigned values are never negative, so only divisibility is checked.
        let divisible = trial.pixels.all_multiples_of(self.params.bit_size);
        debug!(%hypothesis, divisible, "Checked bit order against frame 0");

        if divisible && hypothesis == BitOrder::Lower {
            Ok(hypothesis.flipped())
        } else {
            Ok(hypothesis)
        }
    }

    fn check_bit_size(&self) -> Result<()> {
        match self.params.bit_size {
            8 | 12 | 16 => Ok(()),
            other => Err(MrawError::UnsupportedBitSize(other)),
        }
    }

    fn check_packed_dimensions(&self) -> Result<()> {
        if self.params.bit_size == 12 && self.params.pixels_per_frame() % 2 != 0 {
            return Err(MrawError::InvalidDimensions(self.params.width, self.params.height));
        }
        Ok(())
    }

    fn decode_with(&self, index: usize, order: BitOrder) -> Result<DecodedFrame> {
        let offset = self.params.frame_offset(index);
        let stride = self.params.frame_stride();

        // Check the source before allocating a buffer sized from the metadata
        let available = self.source.byte_len()?;
        if offset.saturating_add(stride as u64) > available {
            return Err(MrawError::TruncatedRead {
                offset,
                needed: stride,
                available,
            });
        }

        let mut bytes = vec![0u8; stride];
        self.source.read_at(offset, &mut bytes)?;

        let pixels = match self.params.bit_size {
            8 => FramePixels::U8(unpack_u8(&bytes, self.params.bit_shift)),
            16 => FramePixels::U16(unpack_u16(&bytes, order, self.params.bit_shift)),
            12 => FramePixels::U16(unpack_12bit(&bytes, order)),
            other => return Err(MrawError::UnsupportedBitSize(other)),
        };

        debug!(index, offset, pixels = pixels.len(), %order, "Decoded frame");

        Ok(DecodedFrame {
            width: self.params.width,
            height: self.params.height,
            bit_size: self.params.bit_size,
            pixels,
        })
    }
}

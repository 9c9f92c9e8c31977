use std::path::Path;

use tracing::{info, instrument, warn};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::metadata::{AcquisitionParameters, BitOrder, MetadataEncoding, parse_metadata};
use crate::image_pipeline::mraw::config::ReaderConfig;
use crate::image_pipeline::mraw::discovery::discover;
use crate::image_pipeline::raw::{DecodedFrame, FrameDecoder, FrameSource, MrawFile};

/// Reader session over one recording.
///
/// Parameters are parsed once at construction. Every `decode` call reads its
/// frame from the source independently; the only state that changes afterwards
/// is the bit order, refined at most once by inference.
pub struct MrawReader<S: FrameSource> {
    decoder: FrameDecoder<S>,
}

impl MrawReader<MrawFile> {
    /// Opens the recording stored in `dir`.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(dir: P, config: &ReaderConfig) -> Result<Self> {
        let files = discover(dir)?;
        let metadata = std::fs::read(&files.metadata)?;
        Self::from_parts(files.encoding, &metadata, MrawFile::new(&files.raw), config)
    }
}

impl<S: FrameSource> MrawReader<S> {
    /// Builds a session from metadata bytes and a raw stream.
    pub fn from_parts(
        encoding: MetadataEncoding,
        metadata: &[u8],
        source: S,
        config: &ReaderConfig,
    ) -> Result<Self> {
        let mut params = parse_metadata(encoding, metadata)?;
        if let Some(order) = config.bit_order_override {
            params.bit_order = order;
        }

        let raw_len = source.byte_len()?;
        let expected = params.expected_raw_len();
        if raw_len != expected {
            warn!(
                raw_len,
                expected,
                "Raw stream length does not match {} frames of {} bytes",
                params.total_frames,
                params.frame_stride()
            );
        }

        info!(
            width = params.width,
            height = params.height,
            frames = params.total_frames,
            fps = params.frame_rate,
            bit_size = params.bit_size,
            bit_shift = params.bit_shift,
            bit_order = %params.bit_order,
            "Recording opened"
        );

        let mut reader = Self {
            decoder: FrameDecoder::new(params, source),
        };
        if config.check_bit_order {
            reader.verify_bit_order()?;
        }
        Ok(reader)
    }

    pub fn frame_count(&self) -> usize {
        self.decoder.parameters().total_frames
    }

    /// `(width, height)` of every frame.
    pub fn dimensions(&self) -> (usize, usize) {
        let params = self.decoder.parameters();
        (params.width, params.height)
    }

    pub fn frame_rate(&self) -> u32 {
        self.decoder.parameters().frame_rate
    }

    pub fn parameters(&self) -> &AcquisitionParameters {
        self.decoder.parameters()
    }

    pub fn bit_order(&self) -> BitOrder {
        self.decoder.bit_order()
    }

    pub fn decode(&mut self, index: usize) -> Result<DecodedFrame> {
        self.decoder.decode(index)
    }

    pub fn verify_bit_order(&mut self) -> Result<BitOrder> {
        self.decoder.verify_bit_order()
    }

    pub fn source(&self) -> &S {
        self.decoder.source()
    }
}

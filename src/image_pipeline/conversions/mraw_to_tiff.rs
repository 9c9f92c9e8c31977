use tracing::{info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{MrawError, Result},
    mraw::MrawReader,
    raw::{DecodedFrame, FrameSource},
    tiff::{TiffWriter, StandardTiffWriter, ConversionConfig},
};

pub struct MrawToTiffPipeline<W: TiffWriter> {
    writer: W,
    config: ConversionConfig,
}

impl MrawToTiffPipeline<StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<W: TiffWriter> MrawToTiffPipeline<W> {
    pub fn with_custom(writer: W, config: ConversionConfig) -> Self {
        Self {
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, frame: &DecodedFrame) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if frame.width == 0
            || frame.height == 0
            || frame.width.checked_mul(frame.height) != Some(frame.pixels.len())
            || u32::try_from(frame.width).is_err()
            || u32::try_from(frame.height).is_err()
        {
            return Err(MrawError::InvalidDimensions(frame.width, frame.height));
        }

        Ok(())
    }

    /// Decodes frame `index` and writes it as TIFF to `output`.
    #[instrument(skip(self, reader, output))]
    pub fn convert<S: FrameSource>(
        &self,
        reader: &mut MrawReader<S>,
        index: usize,
        output: &mut dyn Write,
    ) -> Result<()> {
        info!("Starting frame to TIFF conversion");

        let frame = {
            let _span = tracing::info_span!("decode_frame").entered();
            reader.decode(index)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = frame.width,
                height = frame.height
            ).entered();
            self.validate_dimensions(&frame)?;
        }

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_tiff(&frame, output, &self.config)?;
        }

        info!(
            width = frame.width,
            height = frame.height,
            "Conversion complete"
        );
        Ok(())
    }

    /// Exports frame `index` to `output_path`.
    #[instrument(skip(self, reader, output_path))]
    pub fn convert_file<S: FrameSource, P: AsRef<Path>>(
        &self,
        reader: &mut MrawReader<S>,
        index: usize,
        output_path: P,
    ) -> Result<()> {
        let output_path = output_path.as_ref();

        info!(output = %output_path.display(), "Exporting frame");

        // Nothing touches the disk until the frame has decoded and encoded
        let mut encoded = Vec::new();
        self.convert(reader, index, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file", bytes = encoded.len()).entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                MrawError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(())
    }

    /// Exports `count` frames starting at `start` into `output_dir` as
    /// `frame_NNNNNN.tiff`. Returns the written paths.
    #[instrument(skip(self, reader, output_dir))]
    pub fn convert_range<S: FrameSource, P: AsRef<Path>>(
        &self,
        reader: &mut MrawReader<S>,
        start: usize,
        count: usize,
        output_dir: P,
    ) -> Result<Vec<std::path::PathBuf>> {
        let output_dir = output_dir.as_ref();
        let total = reader.frame_count();
        let end = match start.checked_add(count) {
            Some(end) if end <= total => end,
            _ => {
                return Err(MrawError::FrameIndexOutOfRange {
                    index: start.max(total),
                    total,
                });
            }
        };

        std::fs::create_dir_all(output_dir).map_err(|e| {
            MrawError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
        })?;

        let mut written = Vec::with_capacity(end - start);
        for index in start..end {
            let path = output_dir.join(format!("frame_{index:06}.tiff"));
            self.convert_file(reader, index, &path)?;
            written.push(path);
        }

        info!(frames = written.len(), dir = %output_dir.display(), "Range export complete");
        Ok(written)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}

use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::DecodedFrame;
use crate::image_pipeline::tiff::types::ConversionConfig;

pub trait TiffWriter {
    fn write_tiff(&self, frame: &DecodedFrame, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}

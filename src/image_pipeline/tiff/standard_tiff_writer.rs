use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, MrawError};
use crate::image_pipeline::raw::types::{DecodedFrame, FramePixels};
use crate::image_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::TiffWriter;

/// Writes frames as Gray8 (8-bit storage) or Gray16 (12- and 16-bit storage) TIFFs.
pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, frame: &DecodedFrame, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}, {}-bit storage", frame.width, frame.height, frame.bit_size);

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| MrawError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        let (width, height) = (frame.width as u32, frame.height as u32);
        match &frame.pixels {
            FramePixels::U8(data) => encoder.write_image::<tiff::encoder::colortype::Gray8>(width, height, data),
            FramePixels::U16(data) => encoder.write_image::<tiff::encoder::colortype::Gray16>(width, height, data),
        }
        .map_err(|e| MrawError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tiff::decoder::{Decoder, DecodingResult};

    fn decode_back(bytes: Vec<u8>) -> ((u32, u32), DecodingResult) {
        let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
        let dims = decoder.dimensions().unwrap();
        (dims, decoder.read_image().unwrap())
    }

    #[test]
    fn test_gray16_frame() {
        let frame = DecodedFrame {
            width: 3,
            height: 2,
            bit_size: 12,
            pixels: FramePixels::U16(vec![0, 1, 4095, 2048, 7, 100]),
        };
        let mut out = Vec::new();
        StandardTiffWriter.write_tiff(&frame, &mut out, &ConversionConfig::default()).unwrap();

        let (dims, image) = decode_back(out);
        assert_eq!(dims, (3, 2));
        match image {
            DecodingResult::U16(data) => assert_eq!(data, vec![0, 1, 4095, 2048, 7, 100]),
            _ => panic!("expected 16-bit samples"),
        }
    }

    #[test]
    fn test_gray8_frame_with_compression() {
        let frame = DecodedFrame {
            width: 4,
            height: 2,
            bit_size: 8,
            pixels: FramePixels::U8(vec![10, 20, 30, 40, 50, 60, 70, 80]),
        };
        let config = ConversionConfig::builder()
            .compression(TiffCompression::Lzw)
            .predictor(Some(2))
            .build();
        let mut out = Vec::new();
        StandardTiffWriter.write_tiff(&frame, &mut out, &config).unwrap();

        let (dims, image) = decode_back(out);
        assert_eq!(dims, (4, 2));
        match image {
            DecodingResult::U8(data) => assert_eq!(data, vec![10, 20, 30, 40, 50, 60, 70, 80]),
            _ => panic!("expected 8-bit samples"),
        }
    }
}

//! Parser for the line-based `.cih` metadata encoding.
//!
//! Every line holding a colon is a `Key : Value` pair, split on the first colon
//! only so values may themselves contain colons. Other lines are skipped.

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::metadata::parser::{FieldKeys, FieldMap, MetadataParser};
use crate::image_pipeline::metadata::types::AcquisitionParameters;

pub struct CihParser;

const CIH_KEYS: FieldKeys = FieldKeys {
    height: "Image Height",
    width: "Image Width",
    total_frames: "Total Frame",
    frame_rate: "Record Rate(fps)",
    bit_order: "EffectiveBit Side",
    bit_size: "Color Bit",
    effective_depth: "EffectiveBit Depth",
};

impl MetadataParser for CihParser {
    fn parse(&self, data: &[u8]) -> Result<AcquisitionParameters> {
        debug!("Parsing CIH metadata, {} bytes", data.len());

        let text = String::from_utf8_lossy(data);
        let mut fields = FieldMap::default();
        for line in text.lines() {
            if let Some((key, value)) = line.split_once(':') {
                fields.insert(key.trim(), value.trim());
            }
        }

        debug!("Collected {} CIH fields", fields.len());
        fields.into_parameters(&CIH_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::error::MrawError;
    use crate::image_pipeline::metadata::types::BitOrder;

    const SAMPLE: &str = "#Camera Information Header\r\n\
Date : 2024/03/01\r\n\
Time : 12:30:45\r\n\
Camera Type : FASTCAM SA-Z\r\n\
Record Rate(fps) : 20000\r\n\
Shutter Speed(s) : 1/20000\r\n\
Total Frame : 100\r\n\
Image Width : 1024\r\n\
Image Height : 512\r\n\
File Format : MRaw\r\n\
EffectiveBit Depth : 12\r\n\
EffectiveBit Side : Higher\r\n\
Color Bit : 16\r\n\
Comment Text : \r\n\
END\r\n";

    #[test]
    fn test_parse_sample() {
        let params = CihParser.parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(params.width, 1024);
        assert_eq!(params.height, 512);
        assert_eq!(params.total_frames, 100);
        assert_eq!(params.frame_rate, 20000);
        assert_eq!(params.bit_size, 16);
        assert_eq!(params.bit_shift, 4);
        assert_eq!(params.effective_bit_depth(), 12);
        assert_eq!(params.bit_order, BitOrder::Higher);
    }

    #[test]
    fn test_value_keeps_inner_colons() {
        // "Time : 12:30:45" must not break the remaining lines
        let params = CihParser.parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(params.total_frames, 100);
    }

    #[test]
    fn test_missing_field() {
        let text = SAMPLE.replace("Total Frame : 100\r\n", "");
        let err = CihParser.parse(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MrawError::MissingField(ref key) if key == "Total Frame"));
    }

    #[test]
    fn test_malformed_value() {
        let text = SAMPLE.replace("Image Width : 1024", "Image Width : wide");
        let err = CihParser.parse(text.as_bytes()).unwrap_err();
        match err {
            MrawError::MalformedValue { key, value } => {
                assert_eq!(key, "Image Width");
                assert_eq!(value, "wide");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_side_is_unknown() {
        let text = SAMPLE.replace("EffectiveBit Side : Higher", "EffectiveBit Side : MSB");
        let params = CihParser.parse(text.as_bytes()).unwrap();
        assert_eq!(params.bit_order, BitOrder::Unknown);
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let mut data = b"Comment Text : \xff\xfe\r\n".to_vec();
        data.extend_from_slice(SAMPLE.as_bytes());
        assert!(CihParser.parse(&data).is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let text = SAMPLE.replace("Image Height : 512", "Image Height : 0");
        let err = CihParser.parse(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MrawError::InvalidDimensions(1024, 0)));
    }
}

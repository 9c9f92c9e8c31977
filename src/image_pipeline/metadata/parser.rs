use std::collections::HashMap;
use std::str::FromStr;

use tracing::debug;

use crate::image_pipeline::common::error::{MrawError, Result};
use crate::image_pipeline::metadata::cih_parser::CihParser;
use crate::image_pipeline::metadata::cihx_parser::CihxParser;
use crate::image_pipeline::metadata::types::{AcquisitionParameters, BitOrder, MetadataEncoding};

pub trait MetadataParser {
    fn parse(&self, data: &[u8]) -> Result<AcquisitionParameters>;
}

/// Parses metadata bytes with the parser matching `encoding`.
pub fn parse_metadata(encoding: MetadataEncoding, data: &[u8]) -> Result<AcquisitionParameters> {
    match encoding {
        MetadataEncoding::Cih => CihParser.parse(data),
        MetadataEncoding::Cihx => CihxParser.parse(data),
    }
}

/// Names under which one encoding stores the seven required fields.
pub(crate) struct FieldKeys {
    pub height: &'static str,
    pub width: &'static str,
    pub total_frames: &'static str,
    pub frame_rate: &'static str,
    pub bit_order: &'static str,
    pub bit_size: &'static str,
    pub effective_depth: &'static str,
}

/// Flat key/value view of a metadata file. Later occurrences of a key replace
/// earlier ones; keys nobody asks for are simply ignored.
#[derive(Debug, Default)]
pub(crate) struct FieldMap {
    fields: HashMap<String, String>,
}

impl FieldMap {
    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    fn required(&self, key: &str) -> Result<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| MrawError::MissingField(key.to_string()))
    }

    fn number<T: FromStr>(&self, key: &str) -> Result<T> {
        let raw = self.required(key)?;
        raw.parse::<T>().map_err(|_| MrawError::MalformedValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }

    /// Resolves and validates the seven normalized fields.
    pub fn into_parameters(self, keys: &FieldKeys) -> Result<AcquisitionParameters> {
        let height: usize = self.number(keys.height)?;
        let width: usize = self.number(keys.width)?;
        let total_frames: usize = self.number(keys.total_frames)?;
        let frame_rate: u32 = self.number(keys.frame_rate)?;
        let bit_order = BitOrder::from_metadata(self.required(keys.bit_order)?);
        let bit_size: u32 = self.number(keys.bit_size)?;
        let effective_depth: u32 = self.number(keys.effective_depth)?;

        if width == 0 || height == 0 || total_frames == 0 {
            return Err(MrawError::InvalidDimensions(width, height));
        }

        let bit_shift = bit_size.checked_sub(effective_depth).ok_or_else(|| {
            MrawError::MalformedValue {
                key: keys.effective_depth.to_string(),
                value: effective_depth.to_string(),
            }
        })?;

        let params = AcquisitionParameters {
            width,
            height,
            total_frames,
            frame_rate,
            bit_size,
            bit_shift,
            bit_order,
        };

        // Frame and stream sizes must be computable without overflow
        let raw_len = params
            .checked_raw_len()
            .ok_or(MrawError::InvalidDimensions(width, height))?;

        debug!(
            width, height, total_frames, frame_rate, bit_size, bit_shift, raw_len,
            bit_order = %bit_order,
            "Parsed acquisition parameters"
        );

        Ok(params)
    }
}

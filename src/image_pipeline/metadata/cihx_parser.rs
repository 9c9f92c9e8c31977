//! Parser for the markup-based `.cihx` metadata encoding.
//!
//! A `.cihx` file may carry binary data around the markup. Only the region from
//! the first `cih` marker (including the byte before it) through the last
//! `</cih>` is kept; each line inside it is read as one flat `<key>value</key>`
//! element.

use tracing::debug;

use crate::image_pipeline::common::error::{MrawError, Result};
use crate::image_pipeline::metadata::parser::{FieldKeys, FieldMap, MetadataParser};
use crate::image_pipeline::metadata::types::AcquisitionParameters;

pub struct CihxParser;

const CIHX_KEYS: FieldKeys = FieldKeys {
    height: "height",
    width: "width",
    total_frames: "totalFrame",
    frame_rate: "recordRate",
    bit_order: "side",
    bit_size: "bit",
    effective_depth: "depth",
};

const OPEN_MARKER: &[u8] = b"cih";
const CLOSE_MARKER: &[u8] = b"</cih>";

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// Cuts the `<cih> ... </cih>` region out of the file.
fn bounded_region(data: &[u8]) -> Result<&[u8]> {
    let start = find(data, OPEN_MARKER).ok_or(MrawError::UnboundedRegion)?;
    let end = rfind(data, CLOSE_MARKER).ok_or(MrawError::UnboundedRegion)? + CLOSE_MARKER.len();
    let start = start.saturating_sub(1);
    if end <= start {
        return Err(MrawError::UnboundedRegion);
    }
    Ok(&data[start..end])
}

/// Splits `<key>value</key>` into key and value. Lines lacking either `<` or
/// `>` are not elements.
fn split_element(line: &str) -> Option<(&str, &str)> {
    let (_, after_open) = line.split_once('<')?;
    let (_, after_close) = line.split_once('>')?;
    let key = after_open.split('<').next().unwrap_or("");
    let key = key.split('>').next().unwrap_or("");
    let value = after_close.split('<').next().unwrap_or("");
    Some((key, value))
}

impl MetadataParser for CihxParser {
    fn parse(&self, data: &[u8]) -> Result<AcquisitionParameters> {
        debug!("Parsing CIHX metadata, {} bytes", data.len());

        let region = bounded_region(data)?;
        let text = String::from_utf8_lossy(region);

        let mut fields = FieldMap::default();
        for line in text.lines() {
            if let Some((key, value)) = split_element(line.trim()) {
                fields.insert(key, value);
            }
        }

        debug!("Collected {} CIHX fields", fields.len());
        fields.into_parameters(&CIHX_KEYS)
    }
}

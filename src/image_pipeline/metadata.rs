//! Camera metadata module
//!
//! This module parses the sidecar metadata file of a recording (line-based `.cih`
//! or markup-based `.cihx`) into normalized acquisition parameters.

mod parser;
mod cih_parser;
mod cihx_parser;
pub mod types;

pub use parser::{MetadataParser, parse_metadata};
pub use cih_parser::CihParser;
pub use cihx_parser::CihxParser;
pub use types::{AcquisitionParameters, BitOrder, MetadataEncoding};

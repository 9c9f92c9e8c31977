//! Pipeline conversions module
//!
//! This module contains orchestration logic for exporting recorded frames.

mod mraw_to_tiff;

pub use mraw_to_tiff::MrawToTiffPipeline;

//! Image processing pipeline module
//!
//! This module provides a structured approach to reading high-speed camera
//! recordings, with separate modules for metadata parsing, raw frame decoding,
//! session handling and TIFF export.

pub mod metadata;
pub mod raw;
pub mod mraw;
pub mod tiff;
pub mod conversions;
pub mod common;

pub use common::{
    MrawError,
    Result,
};

pub use metadata::{
    AcquisitionParameters,
    BitOrder,
    MetadataEncoding,
    MetadataParser,
    CihParser,
    CihxParser,
    parse_metadata,
};

pub use raw::{
    DecodedFrame,
    FramePixels,
    FrameDecoder,
    FrameSource,
    MemorySource,
    MrawFile,
};

pub use mraw::{
    MrawReader,
    ReaderConfig,
    ReaderConfigBuilder,
    RecordingFiles,
    discover,
};

pub use tiff::{
    TiffCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    TiffWriter,
    StandardTiffWriter,
};

pub use conversions::{
    MrawToTiffPipeline,
};

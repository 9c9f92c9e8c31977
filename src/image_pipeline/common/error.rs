use thiserror::Error;

#[derive(Error, Debug)]
pub enum MrawError {
    #[error("Missing metadata field: {0}")]
    MissingField(String),

    #[error("Malformed value for metadata field {key}: {value:?}")]
    MalformedValue { key: String, value: String },

    #[error("Metadata region is not bounded by <cih> ... </cih>")]
    UnboundedRegion,

    #[error("Unsupported bit size: {0}")]
    UnsupportedBitSize(u32),

    #[error("Frame index {index} out of range (total frames: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Truncated read: {needed} bytes at offset {offset}, but source holds {available} bytes")]
    TruncatedRead { offset: u64, needed: usize, available: u64 },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Missing input file: {0}")]
    MissingFile(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MrawError>;

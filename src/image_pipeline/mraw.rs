//! Recording session module
//!
//! Ties a metadata file and a raw pixel stream together into a reader that
//! answers frame count, dimension and frame rate queries and decodes frames on
//! demand.

mod config;
mod discovery;
mod reader;


pub use config::{ReaderConfig, ReaderConfigBuilder};
pub use discovery::{RecordingFiles, discover};
pub use reader::MrawReader;

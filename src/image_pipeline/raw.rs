//! RAW frame reading module
//!
//! This module reads frames out of the headerless `.mraw` pixel stream: the data
//! source abstraction, the bit unpacking routines and the frame decoder that
//! ties them to the acquisition parameters.

mod reader;
mod file_source;
mod memory_source;
mod frame_decoder;
pub mod unpack;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use reader::FrameSource;
pub use file_source::MrawFile;
pub use memory_source::MemorySource;
pub use frame_decoder::FrameDecoder;
pub use types::{DecodedFrame, FramePixels};

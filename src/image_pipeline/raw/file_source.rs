//! File-backed frame source.
//!
//! Each read opens the `.mraw` file, seeks to the requested offset and reads
//! exactly one frame. Nothing is cached between calls, so independent readers
//! never share a file handle.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::image_pipeline::common::error::{MrawError, Result};
use crate::image_pipeline::raw::reader::FrameSource;

#[derive(Debug, Clone)]
pub struct MrawFile {
    path: PathBuf,
}

impl MrawFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for MrawFile {
    fn byte_len(&self) -> Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut file = File::open(&self.path)?;
        let available = file.metadata()?.len();
        let end = offset.checked_add(buf.len() as u64);
        if end.is_none_or(|end| end > available) {
            return Err(MrawError::TruncatedRead {
                offset,
                needed: buf.len(),
                available,
            });
        }

        trace!(offset, len = buf.len(), path = %self.path.display(), "Reading raw bytes");
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(buf)?;
        Ok(())
    }
}

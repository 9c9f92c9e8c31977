use crate::image_pipeline::common::error::{MrawError, Result};
use crate::image_pipeline::raw::reader::FrameSource;

/// Raw pixel stream held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl FrameSource for MemorySource {
    fn byte_len(&self) -> Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let needed = buf.len();
        let truncated = || MrawError::TruncatedRead {
            offset,
            needed,
            available: self.data.len() as u64,
        };
        let start = usize::try_from(offset).map_err(|_| truncated())?;
        let bytes = start
            .checked_add(needed)
            .and_then(|end| self.data.get(start..end))
            .ok_or_else(truncated)?;
        buf.copy_from_slice(bytes);
        Ok(())
    }
}

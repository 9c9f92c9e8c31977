use crate::image_pipeline::common::error::Result;

/// Random-access byte source holding a raw pixel stream.
pub trait FrameSource {
    /// Total number of bytes in the stream.
    fn byte_len(&self) -> Result<u64>;

    /// Fills `buf` with the bytes starting at `offset`. Fails with
    /// `TruncatedRead` when the stream ends before `buf` is full.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;
}

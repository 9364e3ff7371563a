//! Seekable byte source with absolute offsets and bounded reads.

use std::io::{Read, Seek, SeekFrom};

use crate::errors::ReadError;

/// Wraps a seekable byte source. Knows nothing about types; the offset is
/// always whatever the underlying source reports.
#[derive(Debug)]
pub struct ByteCursor<R> {
    inner: R,
}

impl<R: Read + Seek> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        ByteCursor { inner }
    }

    /// Current absolute offset of the source.
    pub fn offset(&mut self) -> Result<u64, ReadError> {
        Ok(self.inner.stream_position()?)
    }

    /// Seeks to an absolute offset and returns it.
    pub fn seek_to(&mut self, offset: u64) -> Result<u64, ReadError> {
        Ok(self.inner.seek(SeekFrom::Start(offset))?)
    }

    /// Fills `buf` completely. Fails if fewer bytes are available; there is no
    /// partial-success reporting.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        Ok(self.inner.read_exact(buf)?)
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

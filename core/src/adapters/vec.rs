//! adapters/vec.rs
//! Growable in-memory sink.

use bytes::{Buf, Bytes};

use crate::buffering::{Buffering, Region};
use crate::contract::{Closeable, Writable};
use crate::types::{StreamError, StreamResult};

/// Appends everything written to a `Vec<u8>`. Never signals end-of-stream.
#[derive(Debug, Default, Clone)]
pub struct VecWriter {
    buf: Vec<u8>,
    closed: bool,
}

impl VecWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        VecWriter { buf: Vec::with_capacity(capacity), closed: false }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Freeze the collected bytes without copying.
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.buf)
    }

    #[inline]
    fn sink(&mut self) -> StreamResult<&mut Vec<u8>> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        Ok(&mut self.buf)
    }
}

impl Closeable for VecWriter {
    fn close(&mut self) -> StreamResult<()> {
        self.closed = true;
        Ok(())
    }
}

impl Writable for VecWriter {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        self.sink()?.push(v);
        Ok(())
    }

    fn buffering(&self) -> Buffering {
        Buffering::PreferIndirect
    }

    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        self.sink()?.extend_from_slice(src);
        Ok(())
    }

    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        let sink = self.sink()?;
        let n = region.remaining();
        sink.extend_from_slice(region.chunk());
        region.advance(n);
        Ok(())
    }
}

impl From<Vec<u8>> for VecWriter {
    fn from(buf: Vec<u8>) -> Self {
        VecWriter { buf, closed: false }
    }
}

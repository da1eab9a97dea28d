//! adapters/array.rs
//! Fixed byte-array source and sink.

use std::cmp::min;

use bytes::Buf;

use crate::buffering::{Buffering, Region};
use crate::contract::{Closeable, Readable, Writable};
use crate::types::{StreamError, StreamResult};

/// Reads the bytes of `B` front to back.
#[derive(Debug, Clone)]
pub struct ArrayReader<B> {
    data: B,
    position: usize,
    closed: bool,
}

impl<B: AsRef<[u8]>> ArrayReader<B> {
    pub fn new(data: B) -> Self {
        ArrayReader { data, position: 0, closed: false }
    }

    /// Bytes not yet read.
    pub fn available(&self) -> usize {
        self.data.as_ref().len() - self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_inner(self) -> B {
        self.data
    }

    #[inline]
    fn rest(&self) -> StreamResult<&[u8]> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        Ok(&self.data.as_ref()[self.position..])
    }
}

impl<B: AsRef<[u8]>> Closeable for ArrayReader<B> {
    fn close(&mut self) -> StreamResult<()> {
        self.closed = true;
        Ok(())
    }
}

impl<B: AsRef<[u8]>> Readable for ArrayReader<B> {
    fn read_u8(&mut self) -> StreamResult<u8> {
        let b = *self.rest()?.first().ok_or(StreamError::EndOfStream)?;
        self.position += 1;
        Ok(b)
    }

    fn buffering(&self) -> Buffering {
        Buffering::PreferIndirect
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        let rest = self.rest()?;
        let n = min(rest.len(), dst.len());
        dst[..n].copy_from_slice(&rest[..n]);
        self.position += n;
        if n < dst.len() {
            return Err(StreamError::EndOfStream);
        }
        Ok(())
    }

    fn fill_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        let n = region.put_slice(&self.data.as_ref()[self.position..])?;
        self.position += n;
        Ok(())
    }
}

/// Writes into the fixed capacity of `B`, raising end-of-stream once full.
#[derive(Debug, Clone)]
pub struct ArrayWriter<B> {
    data: B,
    position: usize,
    closed: bool,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> ArrayWriter<B> {
    pub fn new(data: B) -> Self {
        ArrayWriter { data, position: 0, closed: false }
    }

    /// Bytes still accepted before end-of-stream.
    pub fn available(&self) -> usize {
        self.data.as_ref().len() - self.position
    }

    pub fn written(&self) -> &[u8] {
        &self.data.as_ref()[..self.position]
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_inner(self) -> B {
        self.data
    }

    #[inline]
    fn space(&mut self) -> StreamResult<&mut [u8]> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        let start = self.position;
        Ok(&mut self.data.as_mut()[start..])
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Closeable for ArrayWriter<B> {
    fn close(&mut self) -> StreamResult<()> {
        self.closed = true;
        Ok(())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Writable for ArrayWriter<B> {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        let slot = self.space()?.first_mut().ok_or(StreamError::EndOfStream)?;
        *slot = v;
        self.position += 1;
        Ok(())
    }

    fn buffering(&self) -> Buffering {
        Buffering::PreferIndirect
    }

    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        let space = self.space()?;
        let n = min(space.len(), src.len());
        space[..n].copy_from_slice(&src[..n]);
        self.position += n;
        if n < src.len() {
            return Err(StreamError::EndOfStream);
        }
        Ok(())
    }

    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        let space = self.space()?;
        let chunk = region.chunk();
        let n = min(space.len(), chunk.len());
        space[..n].copy_from_slice(&chunk[..n]);
        region.advance(n);
        self.position += n;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffering::Placement;

    #[test]
    fn short_bulk_read_consumes_rest_then_signals_eos() {
        let mut r = ArrayReader::new([1u8, 2, 3]);
        let mut dst = [0u8; 5];
        assert!(r.read_bytes(&mut dst).unwrap_err().is_end_of_stream());
        assert_eq!(&dst[..3], &[1, 2, 3]);
        assert_eq!(r.available(), 0);
    }

    #[test]
    fn fill_buffer_is_short_not_eos() {
        let mut r = ArrayReader::new(vec![7u8; 3]);
        let mut region = Region::allocate(8, Placement::Indirect);
        r.fill_buffer(&mut region).unwrap();
        assert_eq!(region.position(), 3);
        assert!(region.has_remaining());
    }

    #[test]
    fn writer_rejects_past_capacity() {
        let mut w = ArrayWriter::new([0u8; 2]);
        w.write_u8(1).unwrap();
        w.write_u8(2).unwrap();
        assert!(w.write_u8(3).unwrap_err().is_end_of_stream());
        assert_eq!(w.written(), &[1, 2]);
    }
}

//! adapters/io.rs
//! Bridges between `std::io` blocking streams and the stream contracts.
//!
//! Notes:
//! - `close()` drops the wrapped stream (the writer flushes it first); later
//!   data operations fail with `StreamError::Closed`.
//! - `Interrupted` is retried, as `std::io` helpers do.
//! - A `read` of 0 bytes, or a `write` of 0 bytes, is exhaustion.

use std::io::{self, Read, Write};

use crate::buffering::{Buffering, Region};
use crate::contract::{Closeable, Readable, Writable};
use crate::types::{StreamError, StreamResult};

#[derive(Debug)]
pub struct IoReader<R> {
    inner: Option<R>,
}

impl<R: Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        IoReader { inner: Some(inner) }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// The wrapped reader, unless already closed.
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }

    #[inline]
    fn reader(&mut self) -> StreamResult<&mut R> {
        self.inner.as_mut().ok_or(StreamError::Closed)
    }
}

impl<R: Read> Closeable for IoReader<R> {
    fn close(&mut self) -> StreamResult<()> {
        self.inner = None;
        Ok(())
    }
}

impl<R: Read> Readable for IoReader<R> {
    fn read_u8(&mut self) -> StreamResult<u8> {
        let mut b = [0u8; 1];
        self.reader()?.read_exact(&mut b)?;
        Ok(b[0])
    }

    fn buffering(&self) -> Buffering {
        Buffering::PreferAny
    }

    /// `read_exact` maps a premature end to `EndOfStream`; bytes read before it stay in `dst`.
    fn read_bytes(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        self.reader()?.read_exact(dst)?;
        Ok(())
    }

    fn fill_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        let reader = self.inner.as_mut().ok_or(StreamError::Closed)?;
        while region.has_remaining() {
            let dst = region.unfilled_mut()?;
            match reader.read(dst) {
                Ok(0) => break,
                Ok(n) => region.advance(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct IoWriter<W> {
    inner: Option<W>,
}

impl<W: Write> IoWriter<W> {
    pub fn new(inner: W) -> Self {
        IoWriter { inner: Some(inner) }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    /// The wrapped writer, unless already closed. Does not flush.
    pub fn into_inner(self) -> Option<W> {
        self.inner
    }

    #[inline]
    fn writer(&mut self) -> StreamResult<&mut W> {
        self.inner.as_mut().ok_or(StreamError::Closed)
    }
}

impl<W: Write> Closeable for IoWriter<W> {
    fn close(&mut self) -> StreamResult<()> {
        match self.inner.take() {
            Some(mut w) => w.flush().map_err(StreamError::from),
            None => Ok(()),
        }
    }
}

impl<W: Write> Writable for IoWriter<W> {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        self.writer()?.write_all(&[v])?;
        Ok(())
    }

    fn buffering(&self) -> Buffering {
        Buffering::PreferAny
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.writer()?.flush()?;
        Ok(())
    }

    /// `write_all` maps a zero-length write to `EndOfStream`.
    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        self.writer()?.write_all(src)?;
        Ok(())
    }

    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        use bytes::Buf;

        let writer = self.inner.as_mut().ok_or(StreamError::Closed)?;
        while region.has_remaining() {
            match writer.write(region.chunk()) {
                Ok(0) => break,
                Ok(n) => region.advance(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WriteZero => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffering::Placement;
    use std::io::Cursor;

    #[test]
    fn fill_stops_short_at_end_of_reader() {
        let mut r = IoReader::new(Cursor::new(vec![1u8, 2, 3]));
        let mut region = Region::allocate(16, Placement::Direct);
        r.fill_buffer(&mut region).unwrap();
        assert_eq!(region.filled(), &[1, 2, 3]);
        assert!(r.read_u8().unwrap_err().is_end_of_stream());
    }

    #[test]
    fn closed_reader_rejects_reads() {
        let mut r = IoReader::new(Cursor::new(vec![1u8]));
        r.close().unwrap();
        assert!(r.read_u8().unwrap_err().is_closed());
        assert!(r.into_inner().is_none());
    }

    #[test]
    fn writer_flushes_through_on_close() {
        let mut w = IoWriter::new(io::BufWriter::new(Vec::new()));
        w.write_i32(0x0102_0304).unwrap();
        assert!(w.get_ref().is_some());
        w.close().unwrap();
        assert!(w.is_closed());
        assert!(w.write_u8(0).unwrap_err().is_closed());
    }

    #[test]
    fn full_slice_sink_maps_to_end_of_stream() {
        let mut backing = [0u8; 2];
        let mut w = IoWriter::new(&mut backing[..]);
        w.write_u8(1).unwrap();
        w.write_u8(2).unwrap();
        assert!(w.write_u8(3).unwrap_err().is_end_of_stream());
    }
}

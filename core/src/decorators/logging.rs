//! decorators/logging.rs
//! Transparent decorators tracing every data operation through the `log` facade.

use crate::buffering::{Buffering, Region};
use crate::contract::{Closeable, Readable, Writable};
use crate::types::StreamResult;

#[derive(Debug)]
pub struct LoggingReader<R> {
    inner: R,
    label: String,
}

impl<R: Readable> LoggingReader<R> {
    pub fn new(inner: R, label: impl Into<String>) -> Self {
        LoggingReader { inner, label: label.into() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Readable> Closeable for LoggingReader<R> {
    fn close(&mut self) -> StreamResult<()> {
        let result = self.inner.close();
        log::debug!("[{}] close -> {:?}", self.label, result);
        result
    }
}

impl<R: Readable> Readable for LoggingReader<R> {
    fn read_u8(&mut self) -> StreamResult<u8> {
        let result = self.inner.read_u8();
        log::trace!("[{}] read_u8 -> {:?}", self.label, result);
        result
    }

    fn buffering(&self) -> Buffering {
        self.inner.buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        self.inner.remaining_bound()
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        let result = self.inner.read_bytes(dst);
        log::trace!("[{}] read_bytes({}) -> {:?}", self.label, dst.len(), result);
        result
    }

    fn read_chars16(&mut self, dst: &mut [u16]) -> StreamResult<()> {
        let result = self.inner.read_chars16(dst);
        log::trace!("[{}] read_chars16({}) -> {:?}", self.label, dst.len(), result);
        result
    }

    fn fill_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        let before = region.position();
        let result = self.inner.fill_buffer(region);
        log::trace!(
            "[{}] fill_buffer filled {} of {} -> {:?}",
            self.label,
            region.position() - before,
            region.limit() - before,
            result
        );
        result
    }
}

#[derive(Debug)]
pub struct LoggingWriter<W> {
    inner: W,
    label: String,
}

impl<W: Writable> LoggingWriter<W> {
    pub fn new(inner: W, label: impl Into<String>) -> Self {
        LoggingWriter { inner, label: label.into() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Writable> Closeable for LoggingWriter<W> {
    fn close(&mut self) -> StreamResult<()> {
        let result = self.inner.close();
        log::debug!("[{}] close -> {:?}", self.label, result);
        result
    }
}

impl<W: Writable> Writable for LoggingWriter<W> {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        let result = self.inner.write_u8(v);
        log::trace!("[{}] write_u8({:#04x}) -> {:?}", self.label, v, result);
        result
    }

    fn buffering(&self) -> Buffering {
        self.inner.buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        self.inner.remaining_bound()
    }

    fn flush(&mut self) -> StreamResult<()> {
        let result = self.inner.flush();
        log::trace!("[{}] flush -> {:?}", self.label, result);
        result
    }

    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        let result = self.inner.write_bytes(src);
        log::trace!("[{}] write_bytes({}) -> {:?}", self.label, src.len(), result);
        result
    }

    fn write_chars16(&mut self, src: &[u16]) -> StreamResult<()> {
        let result = self.inner.write_chars16(src);
        log::trace!("[{}] write_chars16({}) -> {:?}", self.label, src.len(), result);
        result
    }

    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        let before = region.position();
        let result = self.inner.drain_buffer(region);
        log::trace!(
            "[{}] drain_buffer drained {} of {} -> {:?}",
            self.label,
            region.position() - before,
            region.limit() - before,
            result
        );
        result
    }
}

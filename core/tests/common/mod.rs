//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use bytestream_core::prelude::*;

/// Install `env_logger` once per test binary; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Byte source that counts how often it was physically closed.
///
/// Implements only the required primitive, so every codec and bulk operation
/// runs through the trait defaults. Reads after close fail with `Closed`.
#[derive(Debug)]
pub struct TrackedReader {
    data: Vec<u8>,
    pos: usize,
    closes: Rc<Cell<u32>>,
    buffering: Buffering,
}

impl TrackedReader {
    pub fn new(data: Vec<u8>) -> Self {
        TrackedReader {
            data,
            pos: 0,
            closes: Rc::new(Cell::new(0)),
            buffering: Buffering::Unsupported,
        }
    }

    pub fn with_buffering(mut self, buffering: Buffering) -> Self {
        self.buffering = buffering;
        self
    }

    /// Handle that keeps observing the close count after the reader is moved.
    pub fn close_counter(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.closes)
    }

    pub fn close_count(&self) -> u32 {
        self.closes.get()
    }

    pub fn is_closed(&self) -> bool {
        self.closes.get() > 0
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Closeable for TrackedReader {
    fn close(&mut self) -> StreamResult<()> {
        self.closes.set(self.closes.get() + 1);
        Ok(())
    }
}

impl Readable for TrackedReader {
    fn read_u8(&mut self) -> StreamResult<u8> {
        if self.is_closed() {
            return Err(StreamError::Closed);
        }
        let b = *self.data.get(self.pos).ok_or(StreamError::EndOfStream)?;
        self.pos += 1;
        Ok(b)
    }

    fn buffering(&self) -> Buffering {
        self.buffering
    }
}

/// Fixed-capacity sink with the same close accounting as [`TrackedReader`].
#[derive(Debug)]
pub struct TrackedWriter {
    data: Vec<u8>,
    capacity: Option<usize>,
    closes: Rc<Cell<u32>>,
}

impl TrackedWriter {
    pub fn unbounded() -> Self {
        TrackedWriter { data: Vec::new(), capacity: None, closes: Rc::new(Cell::new(0)) }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TrackedWriter { capacity: Some(capacity), ..Self::unbounded() }
    }

    pub fn written(&self) -> &[u8] {
        &self.data
    }

    pub fn close_count(&self) -> u32 {
        self.closes.get()
    }

    pub fn is_closed(&self) -> bool {
        self.closes.get() > 0
    }
}

impl Closeable for TrackedWriter {
    fn close(&mut self) -> StreamResult<()> {
        self.closes.set(self.closes.get() + 1);
        Ok(())
    }
}

impl Writable for TrackedWriter {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        if self.is_closed() {
            return Err(StreamError::Closed);
        }
        if self.capacity.is_some_and(|cap| self.data.len() >= cap) {
            return Err(StreamError::EndOfStream);
        }
        self.data.push(v);
        Ok(())
    }
}

/// `0, 1, 2, ...` wrapping at 251 so patterns do not align with power-of-two buffers.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

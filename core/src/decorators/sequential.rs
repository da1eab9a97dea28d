//! decorators/sequential.rs
//! Present an ordered list of streams as one logical stream, front to back.
//!
//! State machine:
//!
//! ```text
//! Active(0) --EOS--> Active(1) --EOS--> ... Active(n-1) --EOS--> Exhausted
//! ```
//!
//! Each transition runs the close policy on the stream being left (its
//! boolean is discarded) and happens at most once. A writer member is flushed
//! before its policy runs, so bytes it buffered reach the sink even when the
//! policy leaves it open. Closing the wrapper drives
//! the machine to `Exhausted` and then physically closes the last stream,
//! whatever the policy decided for it.

use crate::buffering::{Buffering, Region};
use crate::contract::{Closeable, Readable, Writable};
use crate::decorators::policy::{ClosePolicy, StandardPolicy};
use crate::types::{StreamError, StreamResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cursor {
    Active(usize),
    Exhausted,
}

impl Cursor {
    fn start(len: usize) -> Self {
        if len == 0 { Cursor::Exhausted } else { Cursor::Active(0) }
    }
}

/// Shared bookkeeping of both sequential decorators.
struct Sequence<S, P> {
    streams: Vec<S>,
    cursor: Cursor,
    policy: P,
    closed: bool,
}

impl<S: Closeable, P: ClosePolicy<S>> Sequence<S, P> {
    fn new(streams: Vec<S>, policy: P) -> Self {
        let cursor = Cursor::start(streams.len());
        Sequence { streams, cursor, policy, closed: false }
    }

    /// Leave the current stream. The cursor moves before `on_leave` and the
    /// policy run, so a failure in either never causes the same transition twice.
    fn advance(&mut self, on_leave: fn(&mut S) -> StreamResult<()>) -> StreamResult<()> {
        let Cursor::Active(i) = self.cursor else {
            return Ok(());
        };
        self.cursor = if i + 1 < self.streams.len() {
            Cursor::Active(i + 1)
        } else {
            Cursor::Exhausted
        };
        log::debug!("sequence left stream {}/{} -> {:?}", i + 1, self.streams.len(), self.cursor);

        let left = on_leave(&mut self.streams[i]);
        let closed = self.policy.on_close(&mut self.streams[i]);
        left?;
        closed?;
        Ok(())
    }

    fn close(&mut self, on_leave: fn(&mut S) -> StreamResult<()>) -> StreamResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let mut first_err = None;
        while self.cursor != Cursor::Exhausted {
            if let Err(e) = self.advance(on_leave) {
                first_err.get_or_insert(e);
            }
        }
        let n = self.streams.len();
        if let Some(last) = self.streams.last_mut() {
            log::debug!("sequence closing terminal stream {n}");
            if let Err(e) = last.close() {
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn keep<R: Readable>(_: &mut R) -> StreamResult<()> {
    Ok(())
}

fn flush_member<W: Writable>(w: &mut W) -> StreamResult<()> {
    w.flush()
}

// ---------------------------------------------------------------------------
// Read side
// ---------------------------------------------------------------------------

pub struct SequentialReader<R, P = StandardPolicy> {
    seq: Sequence<R, P>,
}

impl<R: Readable> SequentialReader<R, StandardPolicy> {
    /// Sequence that physically closes every stream it leaves.
    pub fn concat(streams: Vec<R>) -> Self {
        SequentialReader::new(streams, StandardPolicy::Close)
    }
}

impl<R: Readable, P: ClosePolicy<R>> SequentialReader<R, P> {
    pub fn new(streams: Vec<R>, policy: P) -> Self {
        SequentialReader { seq: Sequence::new(streams, policy) }
    }

    pub fn cursor(&self) -> Cursor {
        self.seq.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.seq.cursor == Cursor::Exhausted
    }

    pub fn streams(&self) -> &[R] {
        &self.seq.streams
    }

    pub fn into_inner(self) -> Vec<R> {
        self.seq.streams
    }
}

impl<R: Readable, P: ClosePolicy<R>> Closeable for SequentialReader<R, P> {
    fn close(&mut self) -> StreamResult<()> {
        self.seq.close(keep::<R>)
    }
}

impl<R: Readable, P: ClosePolicy<R>> Readable for SequentialReader<R, P> {
    fn read_u8(&mut self) -> StreamResult<u8> {
        loop {
            let Cursor::Active(i) = self.seq.cursor else {
                return Err(StreamError::EndOfStream);
            };
            match self.seq.streams[i].read_u8() {
                Err(StreamError::EndOfStream) => self.seq.advance(keep::<R>)?,
                other => return other,
            }
        }
    }

    /// Combined preference of every member.
    fn buffering(&self) -> Buffering {
        self.seq
            .streams
            .iter()
            .fold(Buffering::Unsupported, |acc, s| Buffering::negotiate(acc, s.buffering()))
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        let mut region = Region::wrap(dst);
        self.fill_buffer(&mut region)?;
        if region.has_remaining() {
            return Err(StreamError::EndOfStream);
        }
        Ok(())
    }

    fn fill_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        while region.has_remaining() {
            let Cursor::Active(i) = self.seq.cursor else {
                break;
            };
            self.seq.streams[i].fill_buffer(region)?;
            // Short fill: the member is exhausted.
            if region.has_remaining() {
                self.seq.advance(keep::<R>)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Write side
// ---------------------------------------------------------------------------

pub struct SequentialWriter<W, P = StandardPolicy> {
    seq: Sequence<W, P>,
}

impl<W: Writable> SequentialWriter<W, StandardPolicy> {
    /// Sequence that physically closes every stream it leaves.
    pub fn concat(streams: Vec<W>) -> Self {
        SequentialWriter::new(streams, StandardPolicy::Close)
    }
}

impl<W: Writable, P: ClosePolicy<W>> SequentialWriter<W, P> {
    pub fn new(streams: Vec<W>, policy: P) -> Self {
        SequentialWriter { seq: Sequence::new(streams, policy) }
    }

    pub fn cursor(&self) -> Cursor {
        self.seq.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.seq.cursor == Cursor::Exhausted
    }

    pub fn streams(&self) -> &[W] {
        &self.seq.streams
    }

    pub fn into_inner(self) -> Vec<W> {
        self.seq.streams
    }
}

impl<W: Writable, P: ClosePolicy<W>> Closeable for SequentialWriter<W, P> {
    fn close(&mut self) -> StreamResult<()> {
        self.seq.close(flush_member::<W>)
    }
}

impl<W: Writable, P: ClosePolicy<W>> Writable for SequentialWriter<W, P> {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        loop {
            let Cursor::Active(i) = self.seq.cursor else {
                return Err(StreamError::EndOfStream);
            };
            match self.seq.streams[i].write_u8(v) {
                Err(StreamError::EndOfStream) => self.seq.advance(flush_member::<W>)?,
                other => return other,
            }
        }
    }

    fn buffering(&self) -> Buffering {
        self.seq
            .streams
            .iter()
            .fold(Buffering::Unsupported, |acc, s| Buffering::negotiate(acc, s.buffering()))
    }

    /// Flushes the member currently receiving bytes; members already left were
    /// flushed on the way out.
    fn flush(&mut self) -> StreamResult<()> {
        match self.seq.cursor {
            Cursor::Active(i) => self.seq.streams[i].flush(),
            Cursor::Exhausted => Ok(()),
        }
    }

    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        let mut region = Region::readonly(src);
        self.drain_buffer(&mut region)?;
        if region.has_remaining() {
            return Err(StreamError::EndOfStream);
        }
        Ok(())
    }

    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        while region.has_remaining() {
            let Cursor::Active(i) = self.seq.cursor else {
                break;
            };
            self.seq.streams[i].drain_buffer(region)?;
            if region.has_remaining() {
                self.seq.advance(flush_member::<W>)?;
            }
        }
        Ok(())
    }
}

//! decorators/bounded.rs
//! Byte-quota decorators.
//!
//! Invariants:
//! - `remaining` only decreases, by exactly the bytes that crossed the wrapper.
//! - At zero every data operation fails with `EndOfStream` without touching the inner stream
//!   (bulk fill/drain return short instead).
//! - Re-bounding only tightens: a limit `>= remaining` returns the wrapper unchanged,
//!   and a wrapper stacked over an already bounded stream starts from the smaller quota.

use std::cmp::min;

use crate::buffering::{Buffering, Region};
use crate::contract::{Closeable, Readable, Writable};
use crate::types::{StreamError, StreamResult};

/// Run `op` against `region` with its limit clipped to `quota` bytes past the position.
///
/// Returns the number of bytes the position moved, alongside the operation result.
fn clipped<F>(region: &mut Region<'_>, quota: u64, op: F) -> (usize, StreamResult<()>)
where
    F: FnOnce(&mut Region<'_>) -> StreamResult<()>,
{
    let saved_limit = region.limit();
    let start = region.position();
    let allowed = min(region.remaining() as u64, quota) as usize;

    region.set_limit(start + allowed);
    let result = op(region);
    let moved = region.position() - start;
    region.set_limit(saved_limit);

    (moved, result)
}

fn tightest(limit: u64, inner: Option<u64>) -> u64 {
    inner.map_or(limit, |r| min(r, limit))
}

// ---------------------------------------------------------------------------
// Read side
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct BoundedReader<R> {
    inner: R,
    remaining: u64,
}

impl<R: Readable> BoundedReader<R> {
    /// Wrap `inner` with a quota of `limit` bytes, never looser than a quota
    /// `inner` already reports through `remaining_bound`.
    pub fn new(inner: R, limit: u64) -> Self {
        let remaining = tightest(limit, inner.remaining_bound());
        BoundedReader { inner, remaining }
    }

    /// Tighten the bound. A `limit >= remaining()` leaves the wrapper as it is.
    pub fn bounded(self, limit: u64) -> Self {
        if limit >= self.remaining {
            self
        } else {
            BoundedReader { inner: self.inner, remaining: limit }
        }
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Readable> Closeable for BoundedReader<R> {
    fn close(&mut self) -> StreamResult<()> {
        self.inner.close()
    }
}

impl<R: Readable> Readable for BoundedReader<R> {
    fn read_u8(&mut self) -> StreamResult<u8> {
        if self.remaining == 0 {
            return Err(StreamError::EndOfStream);
        }
        let v = self.inner.read_u8()?;
        self.remaining -= 1;
        Ok(v)
    }

    fn buffering(&self) -> Buffering {
        self.inner.buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        Some(self.remaining)
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
        if self.remaining == 0 {
            return Ok(());
        }
        let inner = &mut self.inner;
        let (moved, result) = clipped(region, self.remaining, |r| inner.fill_buffer(r));
        self.remaining -= moved as u64;
        result
    }
}

// ---------------------------------------------------------------------------
// Write side
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct BoundedWriter<W> {
    inner: W,
    remaining: u64,
}

impl<W: Writable> BoundedWriter<W> {
    /// Wrap `inner` with a quota of `limit` bytes, never looser than a quota
    /// `inner` already reports through `remaining_bound`.
    pub fn new(inner: W, limit: u64) -> Self {
        let remaining = tightest(limit, inner.remaining_bound());
        BoundedWriter { inner, remaining }
    }

    /// Tighten the bound. A `limit >= remaining()` leaves the wrapper as it is.
    pub fn bounded(self, limit: u64) -> Self {
        if limit >= self.remaining {
            self
        } else {
            BoundedWriter { inner: self.inner, remaining: limit }
        }
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Writable> Closeable for BoundedWriter<W> {
    fn close(&mut self) -> StreamResult<()> {
        self.inner.close()
    }
}

impl<W: Writable> Writable for BoundedWriter<W> {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        if self.remaining == 0 {
            return Err(StreamError::EndOfStream);
        }
        self.inner.write_u8(v)?;
        self.remaining -= 1;
        Ok(())
    }

    fn buffering(&self) -> Buffering {
        self.inner.buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        Some(self.remaining)
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.inner.flush()
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
        if self.remaining == 0 {
            return Ok(());
        }
        let inner = &mut self.inner;
        let (moved, result) = clipped(region, self.remaining, |r| inner.drain_buffer(r));
        self.remaining -= moved as u64;
        result
    }
}

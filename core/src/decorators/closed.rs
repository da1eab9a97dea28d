//! decorators/closed.rs
//! Configurable, idempotent closing with a queryable closed state.
//!
//! - The policy runs at most once, on the first `close()`; later calls are no-ops.
//! - The closed flag takes the policy's return value.
//! - Once closed, every data operation fails with `StreamError::Closed` (not EOS)
//!   without reaching the wrapped stream.
//!
//! Wrapping a closed-policy wrapper in another simply nests them; each layer
//! keeps its own policy and flag.

use crate::buffering::{Buffering, Region};
use crate::contract::{Closeable, Readable, Writable};
use crate::decorators::policy::{ClosePolicy, StandardPolicy};
use crate::types::{StreamError, StreamResult};

/// Policy slot plus closed flag, shared by both directions.
#[derive(Debug)]
struct CloseState<P> {
    policy: Option<P>,
    closed: bool,
}

impl<P> CloseState<P> {
    fn new(policy: P) -> Self {
        CloseState { policy: Some(policy), closed: false }
    }

    #[inline]
    fn ensure_open(&self) -> StreamResult<()> {
        if self.closed {
            Err(StreamError::Closed)
        } else {
            Ok(())
        }
    }

    fn close<S: ?Sized>(&mut self, stream: &mut S) -> StreamResult<()>
    where
        P: ClosePolicy<S>,
    {
        // Taking the policy out makes it single-shot even when it fails.
        if let Some(mut policy) = self.policy.take() {
            let closed = policy.on_close(stream)?;
            log::debug!("close policy applied, wrapper reports closed={closed}");
            self.closed = closed;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Read side
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ClosedReader<R, P = StandardPolicy> {
    inner: R,
    state: CloseState<P>,
}

impl<R: Readable, P: ClosePolicy<R>> ClosedReader<R, P> {
    pub fn new(inner: R, policy: P) -> Self {
        ClosedReader { inner, state: CloseState::new(policy) }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state.closed
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Readable, P: ClosePolicy<R>> Closeable for ClosedReader<R, P> {
    fn close(&mut self) -> StreamResult<()> {
        self.state.close(&mut self.inner)
    }
}

impl<R: Readable, P: ClosePolicy<R>> Readable for ClosedReader<R, P> {
    fn read_u8(&mut self) -> StreamResult<u8> {
        self.state.ensure_open()?;
        self.inner.read_u8()
    }

    fn buffering(&self) -> Buffering {
        self.inner.buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        self.inner.remaining_bound()
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        self.state.ensure_open()?;
        self.inner.read_bytes(dst)
    }

    fn read_chars16(&mut self, dst: &mut [u16]) -> StreamResult<()> {
        self.state.ensure_open()?;
        self.inner.read_chars16(dst)
    }

    fn fill_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        self.state.ensure_open()?;
        self.inner.fill_buffer(region)
    }
}

// ---------------------------------------------------------------------------
// Write side
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ClosedWriter<W, P = StandardPolicy> {
    inner: W,
    state: CloseState<P>,
}

impl<W: Writable, P: ClosePolicy<W>> ClosedWriter<W, P> {
    pub fn new(inner: W, policy: P) -> Self {
        ClosedWriter { inner, state: CloseState::new(policy) }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state.closed
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Writable, P: ClosePolicy<W>> Closeable for ClosedWriter<W, P> {
    fn close(&mut self) -> StreamResult<()> {
        self.state.close(&mut self.inner)
    }
}

impl<W: Writable, P: ClosePolicy<W>> Writable for ClosedWriter<W, P> {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        self.state.ensure_open()?;
        self.inner.write_u8(v)
    }

    fn buffering(&self) -> Buffering {
        self.inner.buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        self.inner.remaining_bound()
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.state.ensure_open()?;
        self.inner.flush()
    }

    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        self.state.ensure_open()?;
        self.inner.write_bytes(src)
    }

    fn write_chars16(&mut self, src: &[u16]) -> StreamResult<()> {
        self.state.ensure_open()?;
        self.inner.write_chars16(src)
    }

    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        self.state.ensure_open()?;
        self.inner.drain_buffer(region)
    }
}

//! transfer/engine.rs
//! Copy bytes from a `Readable` into a `Writable`.
//!
//! Paths:
//! - Unbuffered: `read_u8` -> `write_u8` until the source signals end-of-stream.
//!   A target end-of-stream is an error.
//! - Buffered: `clear` -> (clip to quota) -> `fill_buffer` -> `flip` -> `drain_buffer`,
//!   stopping on the first round where either side came up short, or once the
//!   requested count is reached.
//!
//! Every path reports the exact number of bytes the target accepted. A short
//! transfer is not an error; callers needing an exact count check `bytes`.

use std::cmp::min;
use std::time::Instant;

use crate::buffering::{Buffering, Region};
use crate::constants::{DEFAULT_TRANSFER_BUFFER_SIZE, MAX_TRANSFER_BUFFER_SIZE};
use crate::contract::{Readable, Writable};
use crate::transfer::config::TransferConfig;
use crate::transfer::report::{Strategy, TransferReport};
use crate::types::{StreamError, StreamResult};

/// One-shot transfer builder.
///
/// ```
/// use bytestream_core::prelude::*;
///
/// let mut src = ArrayReader::new(b"hello world".to_vec());
/// let mut dst = VecWriter::new();
/// let report = Transfer::new(&mut src, &mut dst).limit(5).run().unwrap();
/// assert_eq!(report.bytes, 5);
/// assert_eq!(dst.as_slice(), b"hello");
/// ```
pub struct Transfer<'a, R: ?Sized, W: ?Sized> {
    source: &'a mut R,
    target: &'a mut W,
    limit: Option<u64>,
    buffer_size: usize,
}

impl<'a, R, W> Transfer<'a, R, W>
where
    R: Readable + ?Sized,
    W: Writable + ?Sized,
{
    pub fn new(source: &'a mut R, target: &'a mut W) -> Self {
        Transfer { source, target, limit: None, buffer_size: DEFAULT_TRANSFER_BUFFER_SIZE }
    }

    /// Stop after `n` bytes.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Size of the negotiated buffer. 0 forces the unbuffered path.
    pub fn buffer_size(mut self, n: usize) -> Self {
        self.buffer_size = n;
        self
    }

    /// Apply a config. A config without a limit keeps any limit already set.
    pub fn config(mut self, config: &TransferConfig) -> Self {
        self.buffer_size = config.buffer_size;
        if let Some(limit) = config.limit {
            self.limit = Some(limit);
        }
        self
    }

    /// Run with a buffer negotiated from both sides' preferences.
    pub fn run(mut self) -> StreamResult<TransferReport> {
        if self.buffer_size > MAX_TRANSFER_BUFFER_SIZE {
            return Err(StreamError::InvalidArgument(format!(
                "buffer_size {} exceeds the maximum of {}",
                self.buffer_size, MAX_TRANSFER_BUFFER_SIZE
            )));
        }

        let preference = Buffering::negotiate(self.source.buffering(), self.target.buffering());
        let placement = match preference.placement() {
            Some(p) if self.buffer_size > 0 => p,
            _ => {
                log::debug!(
                    "transfer: unbuffered (preference {preference}, buffer_size {})",
                    self.buffer_size
                );
                return self.unbuffered();
            }
        };

        // No point allocating past the requested count.
        let capacity = match self.limit {
            Some(limit) => min(self.buffer_size as u64, limit.max(1)) as usize,
            None => self.buffer_size,
        };
        log::debug!("transfer: buffered {placement} x {capacity} (preference {preference})");

        let mut region = Region::allocate(capacity, placement);
        self.buffered(&mut region)
    }

    /// Run through a caller-supplied region. Its contents are overwritten.
    ///
    /// A zero-capacity region disables buffering for an unbounded transfer and
    /// is rejected for a bounded one.
    pub fn run_with(mut self, region: &mut Region<'_>) -> StreamResult<TransferReport> {
        if region.is_read_only() {
            return Err(StreamError::InvalidArgument(
                "transfer buffer must be writable".into(),
            ));
        }
        if region.capacity() == 0 {
            if self.limit.is_some() {
                return Err(StreamError::InvalidArgument(
                    "zero-capacity buffer for a bounded transfer".into(),
                ));
            }
            return self.unbuffered();
        }
        self.buffered(region)
    }

    fn unbuffered(&mut self) -> StreamResult<TransferReport> {
        let started = Instant::now();
        let mut moved = 0u64;

        while self.limit.map_or(true, |limit| moved < limit) {
            let b = match self.source.read_u8() {
                Ok(b) => b,
                Err(StreamError::EndOfStream) => break,
                Err(e) => return Err(e),
            };
            self.target.write_u8(b)?;
            moved += 1;
        }

        Ok(TransferReport::finish(moved, moved, Strategy::Unbuffered, started))
    }

    fn buffered(&mut self, region: &mut Region<'_>) -> StreamResult<TransferReport> {
        let started = Instant::now();
        let strategy = Strategy::Buffered {
            placement: region.placement(),
            capacity: region.capacity(),
        };
        let mut moved = 0u64;
        let mut rounds = 0u64;

        loop {
            region.clear();
            if let Some(limit) = self.limit {
                let quota = limit - moved;
                if quota == 0 {
                    break;
                }
                if quota < region.capacity() as u64 {
                    region.set_limit(quota as usize);
                }
            }

            self.source.fill_buffer(region)?;
            let source_done = region.has_remaining();

            region.flip();
            let staged = region.remaining();
            self.target.drain_buffer(region)?;
            let drained = staged - region.remaining();
            let target_done = region.has_remaining();

            moved += drained as u64;
            rounds += 1;
            log::trace!(
                "transfer round {rounds}: staged {staged}, drained {drained}, total {moved}"
            );

            if source_done || target_done {
                break;
            }
        }

        Ok(TransferReport::finish(moved, rounds, strategy, started))
    }
}

/// Copy until either side is exhausted; returns the byte count.
pub fn transfer<R, W>(source: &mut R, target: &mut W) -> StreamResult<u64>
where
    R: Readable + ?Sized,
    W: Writable + ?Sized,
{
    Ok(Transfer::new(source, target).run()?.bytes)
}

/// Copy at most `n` bytes; returns the byte count, which may be short.
pub fn transfer_n<R, W>(source: &mut R, target: &mut W, n: u64) -> StreamResult<u64>
where
    R: Readable + ?Sized,
    W: Writable + ?Sized,
{
    Ok(Transfer::new(source, target).limit(n).run()?.bytes)
}


//! buffering/region.rs
//! Addressable byte region used by bulk fill/drain operations.
//!
//! Design notes:
//! - Java-style cursor: `0 <= position <= limit <= capacity`.
//! - Filling writes into `[position, limit)` and advances `position`.
//! - `flip()` turns a filled region into a drainable one; draining reads
//!   `[position, limit)` and advances `position` again.
//! - A short fill or drain (region still `has_remaining()`) is how exhaustion
//!   is reported by `fill_buffer`/`drain_buffer`; they never raise EOS.

use bytes::Buf;

use crate::buffering::types::Placement;
use crate::types::{StreamError, StreamResult};

enum Storage<'a> {
    Owned(Box<[u8]>),
    Borrowed(&'a mut [u8]),
    ReadOnly(&'a [u8]),
}

impl Storage<'_> {
    #[inline]
    fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Owned(b) => &b[..],
            Storage::Borrowed(b) => &b[..],
            Storage::ReadOnly(b) => b,
        }
    }
}

/// Fixed-capacity byte region with a position/limit cursor.
pub struct Region<'a> {
    storage: Storage<'a>,
    placement: Placement,
    position: usize,
    limit: usize,
}

impl Region<'static> {
    /// Allocate a zeroed, owned region ready to be filled.
    pub fn allocate(capacity: usize, placement: Placement) -> Self {
        Region {
            storage: Storage::Owned(vec![0u8; capacity].into_boxed_slice()),
            placement,
            position: 0,
            limit: capacity,
        }
    }
}

impl<'a> Region<'a> {
    /// Wrap caller memory as an indirect region ready to be filled.
    pub fn wrap(buf: &'a mut [u8]) -> Self {
        let limit = buf.len();
        Region {
            storage: Storage::Borrowed(buf),
            placement: Placement::Indirect,
            position: 0,
            limit,
        }
    }

    /// Wrap caller bytes as a read-only region ready to be drained.
    pub fn readonly(buf: &'a [u8]) -> Self {
        let limit = buf.len();
        Region {
            storage: Storage::ReadOnly(buf),
            placement: Placement::Indirect,
            position: 0,
            limit,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.as_slice().len()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        matches!(self.storage, Storage::ReadOnly(_))
    }

    /// Reset for filling: position 0, limit = capacity.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity();
    }

    /// Switch from filling to draining: limit = position, position 0.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    /// Move the limit, clamped to capacity. Position is pulled back if it exceeds it.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.min(self.capacity());
        if self.position > self.limit {
            self.position = self.limit;
        }
    }

    /// Consume `n` bytes of the `[position, limit)` window.
    ///
    /// # Panics
    /// If `n` exceeds `remaining()`.
    pub fn advance(&mut self, n: usize) {
        assert!(
            n <= self.remaining(),
            "cannot advance region by {n}: only {} remaining",
            self.remaining()
        );
        self.position += n;
    }

    /// Writable view of `[position, limit)`.
    pub fn unfilled_mut(&mut self) -> StreamResult<&mut [u8]> {
        let (start, end) = (self.position, self.limit);
        match &mut self.storage {
            Storage::Owned(b) => Ok(&mut b[start..end]),
            Storage::Borrowed(b) => Ok(&mut b[start..end]),
            Storage::ReadOnly(_) => Err(read_only_error()),
        }
    }

    /// Append one byte at `position`.
    pub fn put_u8(&mut self, v: u8) -> StreamResult<()> {
        if !self.has_remaining() {
            return Err(StreamError::InvalidArgument("region has no remaining capacity".into()));
        }
        self.unfilled_mut()?[0] = v;
        self.position += 1;
        Ok(())
    }

    /// Copy as much of `src` as fits; returns the number of bytes copied.
    pub fn put_slice(&mut self, src: &[u8]) -> StreamResult<usize> {
        let dst = self.unfilled_mut()?;
        let n = dst.len().min(src.len());
        dst[..n].copy_from_slice(&src[..n]);
        self.position += n;
        Ok(n)
    }

    /// Next drainable byte without consuming it.
    #[inline]
    pub fn peek_u8(&self) -> Option<u8> {
        if self.has_remaining() {
            Some(self.storage.as_slice()[self.position])
        } else {
            None
        }
    }

    /// Bytes written so far while filling: `[0, position)`.
    pub fn filled(&self) -> &[u8] {
        &self.storage.as_slice()[..self.position]
    }
}

impl Buf for Region<'_> {
    fn remaining(&self) -> usize {
        Region::remaining(self)
    }

    fn chunk(&self) -> &[u8] {
        &self.storage.as_slice()[self.position..self.limit]
    }

    fn advance(&mut self, cnt: usize) {
        Region::advance(self, cnt)
    }
}

impl std::fmt::Debug for Region<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("placement", &self.placement)
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("capacity", &self.capacity())
            .field("read_only", &self.is_read_only())
            .finish()
    }
}

fn read_only_error() -> StreamError {
    StreamError::InvalidArgument("cannot fill a read-only region".into())
}

//! contract/ext.rs
//! Decorator construction surface, available on every stream.

use crate::contract::{Readable, Writable};
use crate::decorators::{
    BoundedReader, BoundedWriter, ClosePolicy, ClosedReader, ClosedWriter, LoggingReader,
    LoggingWriter,
};

pub trait ReadableExt: Readable + Sized {
    /// Cap the number of bytes readable through the returned wrapper.
    ///
    /// On a `BoundedReader` the inherent `bounded` takes precedence and
    /// tightens the existing bound instead of stacking a new one. Through a
    /// borrow, a trait object or a generic `R` the new wrapper still starts
    /// from the inner quota when that is smaller.
    fn bounded(self, limit: u64) -> BoundedReader<Self> {
        BoundedReader::new(self, limit)
    }

    fn with_close_policy<P: ClosePolicy<Self>>(self, policy: P) -> ClosedReader<Self, P> {
        ClosedReader::new(self, policy)
    }

    fn logged(self, label: impl Into<String>) -> LoggingReader<Self> {
        LoggingReader::new(self, label)
    }
}

impl<R: Readable> ReadableExt for R {}

pub trait WritableExt: Writable + Sized {
    fn bounded(self, limit: u64) -> BoundedWriter<Self> {
        BoundedWriter::new(self, limit)
    }

    fn with_close_policy<P: ClosePolicy<Self>>(self, policy: P) -> ClosedWriter<Self, P> {
        ClosedWriter::new(self, policy)
    }

    fn logged(self, label: impl Into<String>) -> LoggingWriter<Self> {
        LoggingWriter::new(self, label)
    }
}

impl<W: Writable> WritableExt for W {}

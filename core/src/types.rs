//! types.rs
//! Unified stream error shared by contracts, decorators, adapters and the transfer engine.

use std::io;
use thiserror::Error;

/// Result alias used by every fallible stream operation.
pub type StreamResult<T> = Result<T, StreamError>;

/// Stream failure.
///
/// Every variant is a stream failure; [`StreamError::EndOfStream`] is the
/// specialization meaning "this source/sink is exhausted". Bulk-copy logic
/// (transfer engine, sequential decorators) catches it as a structural signal,
/// everything else propagates to the caller unmodified.
#[derive(Debug, Error)]
pub enum StreamError {
    /// No more data can be read, or no more capacity is available for a write.
    #[error("end of stream")]
    EndOfStream,

    /// Data operation attempted after the stream (or its wrapper) was closed.
    #[error("stream closed")]
    Closed,

    /// Fault raised by an underlying adapter.
    #[error("I/O error: {0}")]
    Io(io::Error),

    /// Caller error detected before any I/O took place.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed wire input.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl StreamError {
    #[inline]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, StreamError::EndOfStream)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, StreamError::Closed)
    }
}

impl From<io::Error> for StreamError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            // A blocking stream running dry, or refusing more bytes, is exhaustion not a fault.
            io::ErrorKind::UnexpectedEof | io::ErrorKind::WriteZero => StreamError::EndOfStream,
            _ => StreamError::Io(e),
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(inner) => inner,
            StreamError::EndOfStream => io::Error::new(io::ErrorKind::UnexpectedEof, e),
            StreamError::Closed => io::Error::new(io::ErrorKind::BrokenPipe, e),
            StreamError::InvalidArgument(_) => io::Error::new(io::ErrorKind::InvalidInput, e),
            StreamError::InvalidData(_) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_eof_kinds_become_end_of_stream() {
        let eof: StreamError = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(eof.is_end_of_stream());

        let zero: StreamError = io::Error::from(io::ErrorKind::WriteZero).into();
        assert!(zero.is_end_of_stream());

        let other: StreamError = io::Error::from(io::ErrorKind::PermissionDenied).into();
        assert!(matches!(other, StreamError::Io(_)));
    }

    #[test]
    fn stream_error_round_trips_to_io_kind() {
        let e: io::Error = StreamError::Closed.into();
        assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);

        let e: io::Error = StreamError::EndOfStream.into();
        assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
    }
}

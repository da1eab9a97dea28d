//! contract/mod.rs
//! The two stream capability contracts and their default codec.
//!
//! Notes:
//! - `Readable`/`Writable` need exactly one primitive (`read_u8`/`write_u8`).
//! - Wire format: big-endian integers and IEEE-754 bit patterns, booleans as
//!   0x00/0xFF (any non-zero reads as true), UTF-16 code units, sequences as a
//!   signed 4-byte code-unit count followed by the units.
//! - `&mut S` and `Box<S>` are streams too, so decorators can borrow or own.

pub mod readable;
pub mod writable;
pub mod ext;

pub use readable::Readable;
pub use writable::Writable;
pub use ext::{ReadableExt, WritableExt};

use crate::types::StreamResult;

/// Release of the resource behind a stream.
///
/// `close` must be idempotent: decorators may close the same inner stream
/// more than once (see `SequentialReader::close`).
pub trait Closeable {
    fn close(&mut self) -> StreamResult<()> {
        Ok(())
    }
}

impl<S: Closeable + ?Sized> Closeable for &mut S {
    fn close(&mut self) -> StreamResult<()> {
        (**self).close()
    }
}

impl<S: Closeable + ?Sized> Closeable for Box<S> {
    fn close(&mut self) -> StreamResult<()> {
        (**self).close()
    }
}

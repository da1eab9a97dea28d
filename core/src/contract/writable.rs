//! contract/writable.rs
//! Write-side capability contract, mirror image of `Readable`.

use byteorder::{BigEndian, ByteOrder};

use crate::buffering::{Buffering, Region};
use crate::constants::{BOOL_FALSE, BOOL_TRUE};
use crate::contract::Closeable;
use crate::types::{StreamError, StreamResult};

pub trait Writable: Closeable {
    /// Write one byte, or fail with [`StreamError::EndOfStream`] when no capacity remains.
    fn write_u8(&mut self, v: u8) -> StreamResult<()>;

    /// Preferred bulk-transfer buffer type. Defaults to `Unsupported`.
    fn buffering(&self) -> Buffering {
        Buffering::Unsupported
    }

    /// Bytes this sink still accepts when a byte quota caps it; `None` when unbounded.
    fn remaining_bound(&self) -> Option<u64> {
        None
    }

    /// Push buffered bytes to the underlying sink.
    fn flush(&mut self) -> StreamResult<()> {
        Ok(())
    }

    fn write_i8(&mut self, v: i8) -> StreamResult<()> {
        self.write_u8(v as u8)
    }

    /// `false` is all-bits-zero, `true` is all-bits-one.
    fn write_bool(&mut self, v: bool) -> StreamResult<()> {
        self.write_u8(if v { BOOL_TRUE } else { BOOL_FALSE })
    }

    fn write_u16(&mut self, v: u16) -> StreamResult<()> {
        let mut b = [0u8; 2];
        BigEndian::write_u16(&mut b, v);
        put(self, &b)
    }

    fn write_i16(&mut self, v: i16) -> StreamResult<()> {
        let mut b = [0u8; 2];
        BigEndian::write_i16(&mut b, v);
        put(self, &b)
    }

    fn write_char16(&mut self, v: u16) -> StreamResult<()> {
        self.write_u16(v)
    }

    fn write_u32(&mut self, v: u32) -> StreamResult<()> {
        let mut b = [0u8; 4];
        BigEndian::write_u32(&mut b, v);
        put(self, &b)
    }

    fn write_i32(&mut self, v: i32) -> StreamResult<()> {
        let mut b = [0u8; 4];
        BigEndian::write_i32(&mut b, v);
        put(self, &b)
    }

    fn write_u64(&mut self, v: u64) -> StreamResult<()> {
        let mut b = [0u8; 8];
        BigEndian::write_u64(&mut b, v);
        put(self, &b)
    }

    fn write_i64(&mut self, v: i64) -> StreamResult<()> {
        let mut b = [0u8; 8];
        BigEndian::write_i64(&mut b, v);
        put(self, &b)
    }

    fn write_f32(&mut self, v: f32) -> StreamResult<()> {
        self.write_u32(v.to_bits())
    }

    fn write_f64(&mut self, v: f64) -> StreamResult<()> {
        self.write_u64(v.to_bits())
    }

    /// Write all of `src`.
    ///
    /// Adapters should override with a true bulk copy that behaves like this
    /// byte-at-a-time default.
    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        put(self, src)
    }

    fn write_chars16(&mut self, src: &[u16]) -> StreamResult<()> {
        for &c in src {
            self.write_char16(c)?;
        }
        Ok(())
    }

    /// Signed 4-byte length (in code units) followed by the code units.
    fn write_utf16(&mut self, units: &[u16]) -> StreamResult<()> {
        let len = i32::try_from(units.len()).map_err(|_| {
            StreamError::InvalidArgument(format!(
                "sequence of {} code units exceeds the 4-byte length prefix",
                units.len()
            ))
        })?;
        self.write_i32(len)?;
        self.write_chars16(units)
    }

    fn write_str(&mut self, s: &str) -> StreamResult<()> {
        let units: Vec<u16> = s.encode_utf16().collect();
        self.write_utf16(&units)
    }

    /// Best-effort drain of `region` from position to limit.
    ///
    /// A byte leaves the region only once the sink accepted it; exhaustion is
    /// reported by leaving the region short, never by returning `EndOfStream`.
    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        while let Some(b) = region.peek_u8() {
            match self.write_u8(b) {
                Ok(()) => region.advance(1),
                Err(StreamError::EndOfStream) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

#[inline]
fn put<W: Writable + ?Sized>(w: &mut W, bytes: &[u8]) -> StreamResult<()> {
    for &b in bytes {
        w.write_u8(b)?;
    }
    Ok(())
}

// ---- forwarding impls ----

impl<W: Writable + ?Sized> Writable for &mut W {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        (**self).write_u8(v)
    }

    fn buffering(&self) -> Buffering {
        (**self).buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        (**self).remaining_bound()
    }

    fn flush(&mut self) -> StreamResult<()> {
        (**self).flush()
    }

    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        (**self).write_bytes(src)
    }

    fn write_chars16(&mut self, src: &[u16]) -> StreamResult<()> {
        (**self).write_chars16(src)
    }

    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        (**self).drain_buffer(region)
    }
}

impl<W: Writable + ?Sized> Writable for Box<W> {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        (**self).write_u8(v)
    }

    fn buffering(&self) -> Buffering {
        (**self).buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        (**self).remaining_bound()
    }

    fn flush(&mut self) -> StreamResult<()> {
        (**self).flush()
    }

    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        (**self).write_bytes(src)
    }

    fn write_chars16(&mut self, src: &[u16]) -> StreamResult<()> {
        (**self).write_chars16(src)
    }

    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        (**self).drain_buffer(region)
    }
}

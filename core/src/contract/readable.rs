//! contract/readable.rs
//! Read-side capability contract.
//!
//! Summary: an implementation supplies `read_u8` (and optionally a buffering
//! hint and bulk overrides); every other codec operation derives from it.
//! All multi-byte values are big-endian.

use byteorder::{BigEndian, ByteOrder};

use crate::buffering::{Buffering, Region};
use crate::constants::BOOL_FALSE;
use crate::contract::Closeable;
use crate::types::{StreamError, StreamResult};

/// Largest number of code units decoded per step when reading a length-prefixed sequence.
const UTF16_READ_STEP: usize = 4096;

pub trait Readable: Closeable {
    /// Read one byte, or fail with [`StreamError::EndOfStream`] when no data remains.
    fn read_u8(&mut self) -> StreamResult<u8>;

    /// Preferred bulk-transfer buffer type. Defaults to `Unsupported`.
    fn buffering(&self) -> Buffering {
        Buffering::Unsupported
    }

    /// Bytes this stream is still allowed to move, when a byte quota caps it.
    ///
    /// `None` means unbounded. Quota decorators report their `remaining`, and
    /// transparent wrappers forward the inner stream's answer.
    fn remaining_bound(&self) -> Option<u64> {
        None
    }

    fn read_i8(&mut self) -> StreamResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Any non-zero byte reads as `true`.
    fn read_bool(&mut self) -> StreamResult<bool> {
        Ok(self.read_u8()? != BOOL_FALSE)
    }

    fn read_u16(&mut self) -> StreamResult<u16> {
        Ok(BigEndian::read_u16(&take::<2, _>(self)?))
    }

    fn read_i16(&mut self) -> StreamResult<i16> {
        Ok(BigEndian::read_i16(&take::<2, _>(self)?))
    }

    /// One UTF-16 code unit (surrogate halves are separate units).
    fn read_char16(&mut self) -> StreamResult<u16> {
        self.read_u16()
    }

    fn read_u32(&mut self) -> StreamResult<u32> {
        Ok(BigEndian::read_u32(&take::<4, _>(self)?))
    }

    fn read_i32(&mut self) -> StreamResult<i32> {
        Ok(BigEndian::read_i32(&take::<4, _>(self)?))
    }

    fn read_u64(&mut self) -> StreamResult<u64> {
        Ok(BigEndian::read_u64(&take::<8, _>(self)?))
    }

    fn read_i64(&mut self) -> StreamResult<i64> {
        Ok(BigEndian::read_i64(&take::<8, _>(self)?))
    }

    /// IEEE-754 bit pattern, big-endian.
    fn read_f32(&mut self) -> StreamResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    fn read_f64(&mut self) -> StreamResult<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Fill `dst` completely.
    ///
    /// Adapters should override with a true bulk copy; the observable
    /// behaviour must match this byte-at-a-time default, including the
    /// bytes consumed before an end-of-stream.
    fn read_bytes(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        for b in dst.iter_mut() {
            *b = self.read_u8()?;
        }
        Ok(())
    }

    fn read_chars16(&mut self, dst: &mut [u16]) -> StreamResult<()> {
        for c in dst.iter_mut() {
            *c = self.read_char16()?;
        }
        Ok(())
    }

    /// Signed 4-byte length (in code units) followed by that many code units.
    fn read_utf16(&mut self) -> StreamResult<Vec<u16>> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(StreamError::InvalidData(format!("negative sequence length {len}")));
        }

        let len = len as usize;
        let mut units = Vec::with_capacity(len.min(UTF16_READ_STEP));
        let mut step = [0u16; UTF16_READ_STEP];
        while units.len() < len {
            let n = (len - units.len()).min(UTF16_READ_STEP);
            self.read_chars16(&mut step[..n])?;
            units.extend_from_slice(&step[..n]);
        }
        Ok(units)
    }

    /// Length-prefixed sequence decoded into a Rust string.
    fn read_string(&mut self) -> StreamResult<String> {
        let units = self.read_utf16()?;
        String::from_utf16(&units).map_err(|e| StreamError::InvalidData(e.to_string()))
    }

    /// Best-effort fill of `region` up to its limit.
    ///
    /// Exhaustion is reported by leaving the region short (`has_remaining()`),
    /// never by returning `EndOfStream`.
    fn fill_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        if region.is_read_only() {
            return Err(StreamError::InvalidArgument("cannot fill a read-only region".into()));
        }
        while region.has_remaining() {
            match self.read_u8() {
                Ok(b) => region.put_u8(b)?,
                Err(StreamError::EndOfStream) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Read exactly `N` bytes through the single-byte primitive.
#[inline]
fn take<const N: usize, R: Readable + ?Sized>(r: &mut R) -> StreamResult<[u8; N]> {
    let mut buf = [0u8; N];
    for b in buf.iter_mut() {
        *b = r.read_u8()?;
    }
    Ok(buf)
}

// ---- forwarding impls ----

impl<R: Readable + ?Sized> Readable for &mut R {
    fn read_u8(&mut self) -> StreamResult<u8> {
        (**self).read_u8()
    }

    fn buffering(&self) -> Buffering {
        (**self).buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        (**self).remaining_bound()
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        (**self).read_bytes(dst)
    }

    fn read_chars16(&mut self, dst: &mut [u16]) -> StreamResult<()> {
        (**self).read_chars16(dst)
    }

    fn fill_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        (**self).fill_buffer(region)
    }
}

impl<R: Readable + ?Sized> Readable for Box<R> {
    fn read_u8(&mut self) -> StreamResult<u8> {
        (**self).read_u8()
    }

    fn buffering(&self) -> Buffering {
        (**self).buffering()
    }

    fn remaining_bound(&self) -> Option<u64> {
        (**self).remaining_bound()
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        (**self).read_bytes(dst)
    }

    fn read_chars16(&mut self, dst: &mut [u16]) -> StreamResult<()> {
        (**self).read_chars16(dst)
    }

    fn fill_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        (**self).fill_buffer(region)
    }
}

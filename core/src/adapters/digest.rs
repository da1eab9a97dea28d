//! adapters/digest.rs
//! Sink that hashes everything written to it.
//!
//! Algorithms are identified by a stable `u16`, so the id can be stored
//! alongside a digest and resolved again with `DigestAlg::try_from`.

use std::convert::TryFrom;
use std::fmt;

use bytes::Buf;
use sha2::{Digest as _, Sha256, Sha512};

use crate::buffering::{Buffering, Region};
use crate::contract::{Closeable, Writable};
use crate::types::{StreamError, StreamResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DigestAlg {
    Sha256 = 0x0001,
    Sha512 = 0x0002,
    /// Unkeyed BLAKE3.
    Blake3 = 0x0003,
}

impl DigestAlg {
    /// Digest size in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            DigestAlg::Sha256 => 32,
            DigestAlg::Sha512 => 64,
            DigestAlg::Blake3 => blake3::OUT_LEN,
        }
    }
}

impl TryFrom<u16> for DigestAlg {
    type Error = StreamError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x0001 => Ok(DigestAlg::Sha256),
            0x0002 => Ok(DigestAlg::Sha512),
            0x0003 => Ok(DigestAlg::Blake3),
            _ => Err(StreamError::InvalidData(format!("unknown digest algorithm {value:#06x}"))),
        }
    }
}

impl fmt::Display for DigestAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DigestAlg::Sha256 => "sha256",
            DigestAlg::Sha512 => "sha512",
            DigestAlg::Blake3 => "blake3",
        })
    }
}

enum DigestState {
    Sha256(Sha256),
    Sha512(Sha512),
    Blake3(Box<blake3::Hasher>),
}

impl DigestState {
    fn new(alg: DigestAlg) -> Self {
        match alg {
            DigestAlg::Sha256 => DigestState::Sha256(Sha256::new()),
            DigestAlg::Sha512 => DigestState::Sha512(Sha512::new()),
            DigestAlg::Blake3 => DigestState::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        match self {
            DigestState::Sha256(h) => h.update(data),
            DigestState::Sha512(h) => h.update(data),
            DigestState::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            DigestState::Sha256(h) => h.finalize().to_vec(),
            DigestState::Sha512(h) => h.finalize().to_vec(),
            DigestState::Blake3(h) => h.finalize().as_bytes().to_vec(),
        }
    }
}

pub struct DigestWriter {
    alg: DigestAlg,
    state: DigestState,
    bytes_written: u64,
    closed: bool,
}

impl DigestWriter {
    pub fn new(alg: DigestAlg) -> Self {
        DigestWriter { alg, state: DigestState::new(alg), bytes_written: 0, closed: false }
    }

    pub fn algorithm(&self) -> DigestAlg {
        self.alg
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Digest of every byte accepted so far. Usable whether or not the writer was closed.
    pub fn finalize(self) -> Vec<u8> {
        self.state.finalize()
    }

    fn absorb(&mut self, data: &[u8]) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        self.state.update(data);
        self.bytes_written += data.len() as u64;
        Ok(())
    }
}

impl fmt::Debug for DigestWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestWriter")
            .field("alg", &self.alg)
            .field("bytes_written", &self.bytes_written)
            .field("closed", &self.closed)
            .finish()
    }
}

impl Closeable for DigestWriter {
    fn close(&mut self) -> StreamResult<()> {
        self.closed = true;
        Ok(())
    }
}

impl Writable for DigestWriter {
    fn write_u8(&mut self, v: u8) -> StreamResult<()> {
        self.absorb(&[v])
    }

    fn buffering(&self) -> Buffering {
        Buffering::PreferAny
    }

    fn write_bytes(&mut self, src: &[u8]) -> StreamResult<()> {
        self.absorb(src)
    }

    fn drain_buffer(&mut self, region: &mut Region<'_>) -> StreamResult<()> {
        let n = region.remaining();
        self.absorb(region.chunk())?;
        region.advance(n);
        Ok(())
    }
}

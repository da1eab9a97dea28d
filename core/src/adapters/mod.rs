//! adapters/mod.rs
//! Concrete endpoints: in-memory arrays and vectors, `std::io` bridges, and a hashing sink.

pub mod array;
pub mod vec;
pub mod io;
pub mod digest;

pub use array::{ArrayReader, ArrayWriter};
pub use vec::VecWriter;
pub use io::{IoReader, IoWriter};
pub use digest::{DigestAlg, DigestWriter};

//! bytestream-core
//!
//! Synchronous byte-stream capability layer: two minimal stream contracts
//! with a big-endian codec on top, structural decorators (bounded,
//! sequential, close-policy), buffering negotiation and a transfer engine.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

// Contracts and the buffer they bulk-transfer through
pub mod buffering;
pub mod contract;

// Composition
pub mod decorators;
pub mod transfer;

// Concrete endpoints
pub mod adapters;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::types::{StreamError, StreamResult};

    pub use crate::buffering::{Buffering, Placement, Region};
    pub use crate::contract::{Closeable, Readable, ReadableExt, Writable, WritableExt};

    pub use crate::decorators::{
        BoundedReader, BoundedWriter, ClosePolicy, ClosedReader, ClosedWriter, Cursor,
        LoggingReader, LoggingWriter, SequentialReader, SequentialWriter, StandardPolicy,
    };
    pub use crate::transfer::{transfer, transfer_n, Strategy, Transfer, TransferConfig, TransferReport};

    pub use crate::adapters::{
        ArrayReader, ArrayWriter, DigestAlg, DigestWriter, IoReader, IoWriter, VecWriter,
    };
}

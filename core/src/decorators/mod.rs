//! decorators/mod.rs
//! Structural decorators composing streams: bounding, sequencing, close-policy
//! wrapping, and a debug-logging pass-through.

pub mod policy;
pub mod bounded;
pub mod sequential;
pub mod closed;
pub mod logging;

pub use policy::{ClosePolicy, StandardPolicy};
pub use bounded::{BoundedReader, BoundedWriter};
pub use sequential::{Cursor, SequentialReader, SequentialWriter};
pub use closed::{ClosedReader, ClosedWriter};
pub use logging::{LoggingReader, LoggingWriter};

//! buffering/mod.rs
//! Buffer-type negotiation and the byte region handed to bulk fill/drain.

pub mod types;
pub mod region;

pub use types::*;
pub use region::Region;

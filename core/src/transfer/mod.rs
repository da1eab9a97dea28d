//! transfer/mod.rs
//! Bulk copy from a source to a target, with serializable settings and reports.

pub mod config;
pub mod engine;
pub mod report;

pub use config::TransferConfig;
pub use engine::{transfer, transfer_n, Transfer};
pub use report::{Strategy, TransferReport};

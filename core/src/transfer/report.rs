//! transfer/report.rs
//! Outcome of one transfer: byte count, strategy, and timing.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::buffering::Placement;

/// How the bytes were moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// One `read_u8`/`write_u8` pair per byte.
    Unbuffered,
    /// Fill/flip/drain rounds through a shared region.
    Buffered { placement: Placement, capacity: usize },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Unbuffered => f.write_str("unbuffered"),
            Strategy::Buffered { placement, capacity } => {
                write!(f, "buffered({placement}, {capacity} bytes)")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReport {
    /// Exact number of bytes the target accepted.
    pub bytes: u64,
    /// Fill/drain rounds, or bytes for the unbuffered path.
    pub rounds: u64,
    pub strategy: Strategy,
    pub elapsed: Duration,
}

impl TransferReport {
    pub(crate) fn finish(bytes: u64, rounds: u64, strategy: Strategy, started: Instant) -> Self {
        TransferReport { bytes, rounds, strategy, elapsed: started.elapsed() }
    }

    pub fn throughput_bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes as f64 / secs
        } else {
            0.0
        }
    }

    /// `true` when fewer than `requested` bytes moved because a side ran dry.
    pub fn is_short_of(&self, requested: u64) -> bool {
        self.bytes < requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_elapsed_has_zero_throughput() {
        let r = TransferReport {
            bytes: 10,
            rounds: 1,
            strategy: Strategy::Unbuffered,
            elapsed: Duration::ZERO,
        };
        assert_eq!(r.throughput_bytes_per_sec(), 0.0);
        assert!(r.is_short_of(11));
        assert!(!r.is_short_of(10));
    }

    #[test]
    fn report_serializes_strategy() {
        let r = TransferReport {
            bytes: 4,
            rounds: 1,
            strategy: Strategy::Buffered { placement: Placement::Indirect, capacity: 16 },
            elapsed: Duration::from_millis(2),
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"Indirect\""));
        let back: TransferReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}

//! buffering/types.rs
//! Buffering preferences advertised by streams and the rule that combines them.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Where a transfer buffer lives.
///
/// Both placements are ordinary heap memory in Rust; the tag tells adapters
/// whether the buffer is meant to be handed to native/channel I/O (`Direct`)
/// or addressed byte-by-byte by host code (`Indirect`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    Direct,
    Indirect,
}

/// Hint a stream gives about the bulk-transfer buffer that benefits it most.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Buffering {
    PreferIndirect,
    PreferDirect,
    PreferAny,
    #[default]
    Unsupported,
}

impl Buffering {
    /// Combine a source preference with a target preference.
    ///
    /// Asymmetric: the source is considered first. `Unsupported` defers entirely
    /// to the other side, and `PreferIndirect` on either side wins because every
    /// byte-addressing sink can use an indirect buffer.
    ///
    /// ```text
    /// source \ target | Unsupported | Any    | Direct | Indirect
    /// Unsupported     | Unsupported | Any    | Direct | Indirect
    /// Any             | Direct      | Direct | Direct | Indirect
    /// Direct          | Direct      | Direct | Direct | Indirect
    /// Indirect        | Indirect    | Indirect | Indirect | Indirect
    /// ```
    pub const fn negotiate(source: Buffering, target: Buffering) -> Buffering {
        match (source, target) {
            (Buffering::Unsupported, other) => other,
            (Buffering::PreferIndirect, _) => Buffering::PreferIndirect,
            (_, Buffering::PreferIndirect) => Buffering::PreferIndirect,
            (Buffering::PreferAny | Buffering::PreferDirect, _) => Buffering::PreferDirect,
        }
    }

    /// Concrete placement for a shared buffer, `None` when buffering brings nothing.
    ///
    /// `PreferAny` only survives negotiation when both sides are indifferent;
    /// it resolves to `Direct` like it does against an `Unsupported` target.
    pub const fn placement(self) -> Option<Placement> {
        match self {
            Buffering::PreferIndirect => Some(Placement::Indirect),
            Buffering::PreferDirect | Buffering::PreferAny => Some(Placement::Direct),
            Buffering::Unsupported => None,
        }
    }
}

impl fmt::Display for Buffering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Buffering::PreferIndirect => "prefer-indirect",
            Buffering::PreferDirect   => "prefer-direct",
            Buffering::PreferAny      => "prefer-any",
            Buffering::Unsupported    => "unsupported",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Direct   => f.write_str("direct"),
            Placement::Indirect => f.write_str("indirect"),
        }
    }
}

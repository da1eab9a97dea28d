//! transfer/config.rs
//! Serializable transfer settings.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TRANSFER_BUFFER_SIZE, MAX_TRANSFER_BUFFER_SIZE};
use crate::types::{StreamError, StreamResult};

/// Settings applied by [`Transfer::config`](crate::transfer::Transfer::config).
///
/// Missing JSON fields take their default. A `buffer_size` of 0 forces the
/// byte-at-a-time path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    pub buffer_size: usize,
    /// Stop after this many bytes. `None` copies until either side is exhausted.
    pub limit: Option<u64>,
}

impl Default for TransferConfig {
    fn default() -> Self {
        TransferConfig { buffer_size: DEFAULT_TRANSFER_BUFFER_SIZE, limit: None }
    }
}

impl TransferConfig {
    pub fn bounded(limit: u64) -> Self {
        TransferConfig { limit: Some(limit), ..Self::default() }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(s: &str) -> StreamResult<Self> {
        let config: TransferConfig = serde_json::from_str(s)
            .map_err(|e| StreamError::InvalidArgument(format!("transfer config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> StreamResult<String> {
        serde_json::to_string(self)
            .map_err(|e| StreamError::InvalidArgument(format!("transfer config: {e}")))
    }

    pub fn validate(&self) -> StreamResult<()> {
        if self.buffer_size > MAX_TRANSFER_BUFFER_SIZE {
            return Err(StreamError::InvalidArgument(format!(
                "buffer_size {} exceeds the maximum of {}",
                self.buffer_size, MAX_TRANSFER_BUFFER_SIZE
            )));
        }
        Ok(())
    }
}

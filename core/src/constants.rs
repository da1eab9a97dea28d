/// Boolean wire encoding. Readers accept any non-zero byte as `true`.
pub const BOOL_TRUE: u8 = 0xFF;
pub const BOOL_FALSE: u8 = 0x00;

/// Defaults when a transfer does not name a buffer size.
pub const DEFAULT_TRANSFER_BUFFER_SIZE: usize = 8 * 1024; // 8 KiB

/// Max transfer buffer size sanity bound (32 MiB).
pub const MAX_TRANSFER_BUFFER_SIZE: usize = 32 * 1024 * 1024;

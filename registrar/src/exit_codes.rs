//! Stable exit codes for registrar CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Startup failure, invalid records file, or other unrecoverable error.
pub const INVALID: i32 = 1;

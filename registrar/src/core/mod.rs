//! Pure, deterministic domain logic. No I/O; dates are passed in by callers.

pub mod invariants;
pub mod ops;
pub mod report;
pub mod validate;

//! Console student records manager.
//!
//! This crate implements a single-user record store for students, courses,
//! enrollments, and grades, persisted to one JSON file. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (operations, validation,
//!   invariants, report derivation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (persistence, configuration,
//!   text rendering of reports).
//!
//! The [`shell`] module coordinates core logic with I/O to implement the
//! interactive console, and `main` adds thin maintenance commands on top.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod records;
pub mod shell;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

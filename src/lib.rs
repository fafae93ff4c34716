//! rs274-exec – block execution core for an RS274/NGC interpreter
//!
//! This crate turns one parsed program line into an ordered sequence of
//! effects on machine state, and evaluates the operators that parameterize
//! those lines:
//! - Strict-order block execution with complete / suspend / exit outcomes
//! - A deferred tool-change handshake resumed through a stored continuation
//! - Binary and unary expression operations with exact domain errors
//! - Centralized formatting of operator-facing error messages

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Shared context, status model, and configuration
pub mod runtime;

/// Block executor, handshake, expression evaluator, and reporting
pub mod interpreter;

// Re-export key types for convenience
pub use interpreter::{BlockExecutor, BlockOutcome};
pub use runtime::{InterpConfig, InterpError, InterpResult, Settings, Status};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

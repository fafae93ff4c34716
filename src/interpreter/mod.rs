//! Execution core for RS274/NGC blocks.
//!
//! A parsed block is turned into an ordered series of calls on host
//! collaborators ([`host`]), with the tool-change handshake able to suspend a
//! block until a handler program returns. The expression evaluator used by the
//! parameter reader lives alongside in [`expr`].

/// Parsed program line.
pub mod block;
/// Strict-order block execution.
pub mod executor;
/// Binary and unary expression operations.
pub mod expr;
/// Deferred tool-change handshake.
pub mod handshake;
/// Collaborator traits implemented by the host.
pub mod host;
/// Error reporting.
pub mod report;

pub use block::Block;
pub use executor::{BlockExecutor, BlockOutcome};
pub use expr::{
    AddOp, BinaryOp, MulOp, TOLERANCE_EQUAL, UnaryOp, evaluate_binary, evaluate_binary_code,
    evaluate_unary, evaluate_unary_code,
};
pub use handshake::{RemapTag, dispatch_deferred, finish_tool_prepare, run_epilog};
pub use host::{Canon, Diagnostics, ExecutorHost, HandlerCaller, ModalConverter, ToolTable};
pub use report::ErrorReporter;

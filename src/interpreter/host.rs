//! Collaborator traits the execution core drives.
//!
//! The semantic conversion inside each modal group, pocket lookup, handler
//! invocation and machine actuation all live outside this crate. Hosts
//! implement these traits; the executor and handshake only sequence the calls.

use crate::interpreter::block::Block;
use crate::interpreter::handshake::RemapTag;
use crate::runtime::error::{ErrorClass, InterpError, InterpResult, Status};
use crate::runtime::settings::Settings;

/// Per-group conversion of a block into canonical machine commands.
pub trait ModalConverter {
    /// Handle a comment (messages, debug prints, probe logging).
    fn convert_comment(&mut self, text: &str) -> InterpResult<()>;
    /// Apply a spindle-mode selection (G96/G97).
    fn convert_spindle_mode(&mut self, block: &Block, settings: &mut Settings) -> InterpResult<()>;
    /// Apply a feed-mode selection (G93/G94/G95).
    fn convert_feed_mode(&mut self, mode: i32, settings: &mut Settings) -> InterpResult<()>;
    /// Apply an F word outside inverse-time mode.
    fn convert_feed_rate(&mut self, block: &Block, settings: &mut Settings) -> InterpResult<()>;
    /// Apply an S word.
    fn convert_speed(&mut self, block: &Block, settings: &mut Settings) -> InterpResult<()>;
    /// Select a tool synchronously.
    fn convert_tool_select(&mut self, block: &Block, settings: &mut Settings) -> InterpResult<()>;
    /// Convert the block's M-codes.
    fn convert_m(
        &mut self,
        block: &mut Block,
        settings: &mut Settings,
        remove_trail: bool,
    ) -> InterpResult<()>;
    /// Convert the block's G-codes, including inverse-time feed.
    fn convert_g(
        &mut self,
        block: &mut Block,
        settings: &mut Settings,
        remove_trail: bool,
    ) -> InterpResult<()>;
    /// Convert a program stop. Returns `Status::Exit` when the program ends.
    fn convert_stop(&mut self, block: &Block, settings: &mut Settings) -> InterpResult<Status>;
}

/// Tool table access.
pub trait ToolTable {
    /// Pocket holding `tool`.
    fn find_tool_pocket(&mut self, settings: &Settings, tool: i32) -> InterpResult<i32>;
}

/// Runs handler programs (T, M6, on-abort) as subroutine calls.
pub trait HandlerCaller {
    /// Begin executing `command` as a subroutine invocation.
    ///
    /// The handler's return sets `settings.return_value` and triggers the
    /// pending epilog; that happens later, outside this call.
    fn call_handler(
        &mut self,
        settings: &mut Settings,
        command: &str,
        tag: RemapTag,
    ) -> InterpResult<Status>;
}

/// Canonical machine interface, as far as the core touches it.
pub trait Canon {
    /// Prepare the tool in `pocket`. Fire and forget.
    fn select_pocket(&mut self, pocket: i32);
    /// Raise a machine-level error.
    fn canon_error(&mut self, message: &str);
    /// Abort the running handler with `reason`.
    fn send_handler_abort(&mut self, reason: i32);
    /// Operator-visible message sink.
    fn emit_message(&mut self, text: &str);
}

/// Lookups used when formatting diagnostics.
pub trait Diagnostics {
    /// Explanation for an error. Bug errors have none by default.
    fn error_text(&self, err: &InterpError) -> Option<String> {
        match err.class() {
            ErrorClass::Diagnosable => Some(err.to_string()),
            ErrorClass::Bug => None,
        }
    }

    /// Short tag for a status or error.
    fn status_tag(&self, result: &InterpResult<Status>) -> String {
        match result {
            Ok(status) => status.tag().to_string(),
            Err(err) => err.tag().to_string(),
        }
    }

    /// Name of the handler frame at `index`, innermost first.
    fn stack_frame_name(&self, _index: usize) -> Option<String> {
        None
    }
}

/// Everything the block executor needs from its host.
pub trait ExecutorHost: ModalConverter + ToolTable + HandlerCaller + Canon {}

impl<T: ModalConverter + ToolTable + HandlerCaller + Canon> ExecutorHost for T {}

//! Strict-order execution of one block.
//!
//! The order in which a block's items take effect matters for safe machine
//! operation: a feed mode must be in place before the feed rate it governs,
//! the tool must be selected before M6, and program stops come last.
//!
//! Actions run in this order:
//! 1. comment
//! 2. spindle mode (G96, G97)
//! 3. feed mode (G93, G94, G95)
//! 4. feed rate (F), unless in inverse-time mode where G1/G2/G3 carry it
//! 5. spindle speed (S)
//! 6. tool selection (T), which suspends the block when a handler is configured
//! 7. M-codes
//! 8. G-codes
//! 9. program stops (M0, M1, M2, M30, M60)
//!
//! A failing step ends the block at once. Fields consumed by earlier steps
//! stay cleared when trailing removal is on; nothing is rolled back.

use serde::{Deserialize, Serialize};

use crate::interpreter::block::{Block, GM_FEED_MODE, GM_SPINDLE_MODE};
use crate::interpreter::handshake::{self, RemapTag};
use crate::interpreter::host::ExecutorHost;
use crate::runtime::error::{InterpResult, Status};
use crate::runtime::settings::{FeedMode, Settings};

/// Result of driving a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockOutcome {
    /// The block ran to a status.
    Done(Status),
    /// A handler was dispatched; the block resumes through the pending epilog.
    Deferred(RemapTag),
}

impl BlockOutcome {
    /// Final status, if the block was not deferred.
    pub fn status(&self) -> Option<Status> {
        match self {
            BlockOutcome::Done(status) => Some(*status),
            BlockOutcome::Deferred(_) => None,
        }
    }

    /// Whether the host must wait before starting the next block.
    pub fn is_suspended(&self) -> bool {
        matches!(
            self,
            BlockOutcome::Done(Status::ExecuteFinish) | BlockOutcome::Deferred(_)
        )
    }
}

/// Drives blocks against a host implementing the modal collaborators.
pub struct BlockExecutor<H> {
    host: H,
}

impl<H: ExecutorHost> BlockExecutor<H> {
    /// Create an executor for the provided host.
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// Access the host (useful for inspection in tests).
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give the host back.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Convert one block into machine actions.
    ///
    /// Returns `Done(Exit)` when a program stop ends the program,
    /// `Done(ExecuteFinish)` when a probe, input or tool change is still
    /// pending, and `Deferred` when a tool-change handler took over.
    pub fn execute_block(
        &mut self,
        block: &mut Block,
        settings: &mut Settings,
        remove_trail: bool,
    ) -> InterpResult<BlockOutcome> {
        block.line_number = settings.sequence_number;
        let line = block.line_number;

        if let Some(text) = block.comment.clone() {
            tracing::debug!(line, "comment");
            let result = self.host.convert_comment(&text);
            if remove_trail {
                block.comment = None;
            }
            log_step(line, "comment", result)?;
        }

        if block.spindle_mode().is_some() {
            tracing::debug!(line, "spindle mode");
            let result = self.host.convert_spindle_mode(block, settings);
            if remove_trail {
                block.g_modes[GM_SPINDLE_MODE] = None;
            }
            log_step(line, "spindle mode", result)?;
        }

        if let Some(mode) = block.feed_mode() {
            tracing::debug!(line, mode, "feed mode");
            let result = self.host.convert_feed_mode(mode, settings);
            if remove_trail {
                block.g_modes[GM_FEED_MODE] = None;
            }
            log_step(line, "feed mode", result)?;
        }

        // In inverse time the F word belongs to the motion, so convert_g takes it.
        if block.f_flag && settings.feed_mode != FeedMode::InverseTime {
            tracing::debug!(line, rate = block.f_number, "feed rate");
            let result = self.host.convert_feed_rate(block, settings);
            if remove_trail {
                block.f_flag = false;
            }
            log_step(line, "feed rate", result)?;
        }

        if block.s_flag {
            tracing::debug!(line, speed = block.s_number, "spindle speed");
            let result = self.host.convert_speed(block, settings);
            if remove_trail {
                block.s_flag = false;
            }
            log_step(line, "spindle speed", result)?;
        }

        if block.t_flag {
            if let Some(template) = settings.tool_change_command().map(str::to_owned) {
                tracing::debug!(line, tool = block.t_number, "deferred tool select");
                let tag = log_step(
                    line,
                    "tool prepare",
                    handshake::prepare_tool(
                        &mut self.host,
                        block,
                        settings,
                        &template,
                        remove_trail,
                    ),
                )?;
                return Ok(BlockOutcome::Deferred(tag));
            }
            tracing::debug!(line, tool = block.t_number, "tool select");
            log_step(
                line,
                "tool select",
                self.host.convert_tool_select(block, settings),
            )?;
        }

        log_step(line, "m codes", self.host.convert_m(block, settings, remove_trail))?;
        log_step(line, "g codes", self.host.convert_g(block, settings, remove_trail))?;

        if block.stop_code().is_some() {
            tracing::debug!(line, code = ?block.stop_code(), "program stop");
            // Exit ends the program; any other non-OK status is passed straight up.
            let status = log_step(line, "program stop", self.host.convert_stop(block, settings))?;
            if status != Status::Ok {
                return Ok(BlockOutcome::Done(status));
            }
        }

        if settings.awaiting_external() {
            tracing::debug!(
                line,
                probe = settings.probe_flag,
                input = settings.input_flag,
                toolchange = settings.toolchange_flag,
                "block waits on external event"
            );
            return Ok(BlockOutcome::Done(Status::ExecuteFinish));
        }

        Ok(BlockOutcome::Done(Status::Ok))
    }
}

fn log_step<T>(line: i32, step: &'static str, result: InterpResult<T>) -> InterpResult<T> {
    if let Err(err) = &result {
        tracing::warn!(line, step, error = %err, "block step failed");
    }
    result
}

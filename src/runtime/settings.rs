//! Shared interpreter context threaded through every execution step
//!
//! A single [`Settings`] value lives for the whole interpretation session. The
//! host loop owns it; the execution core only mutates fields through an
//! exclusive borrow.

use serde::{Deserialize, Serialize};

use super::InterpConfig;

/// Active feed-rate convention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedMode {
    /// G94: linear units per minute
    #[default]
    UnitsPerMinute,
    /// G95: linear units per spindle revolution
    UnitsPerRevolution,
    /// G93: rate derived from the desired move duration
    InverseTime,
}

/// Completion routine to run when a deferred handler returns.
///
/// Stored in [`Settings::epilog`]; taken and run exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Epilog {
    /// Commit or abort a tool prepare once the tool-change handler returns
    FinishToolPrepare {
        /// Tool number the handler was asked to prepare
        tool: i32,
    },
}

/// Mutable machine/interpreter context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Current sequence (line) number
    pub sequence_number: i32,
    /// Current feed mode
    pub feed_mode: FeedMode,
    /// Set while a probe move awaits its trip
    pub probe_flag: bool,
    /// Set while a digital/analog input read is pending
    pub input_flag: bool,
    /// Set while a tool change is in progress
    pub toolchange_flag: bool,
    /// Handler template for deferred tool selection; `None` selects synchronously
    pub tool_change_command: Option<String>,
    /// Pocket committed by the last successful tool prepare
    pub selected_pocket: i32,
    /// Value passed back out of a deferred handler
    pub return_value: f64,
    /// Pending completion routine for the current deferred handler
    pub epilog: Option<Epilog>,
    /// Source file name, used for diagnostics
    pub filename: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sequence_number: 0,
            feed_mode: FeedMode::default(),
            probe_flag: false,
            input_flag: false,
            toolchange_flag: false,
            tool_change_command: None,
            selected_pocket: -1,
            return_value: 0.0,
            epilog: None,
            filename: String::new(),
        }
    }
}

impl Settings {
    /// Seed a context from configuration
    pub fn from_config(config: &InterpConfig) -> Self {
        Self {
            filename: config.filename.clone(),
            tool_change_command: config
                .tool_change_command
                .clone()
                .filter(|cmd| !cmd.is_empty()),
            ..Self::default()
        }
    }

    /// Configured tool-change handler template, if any
    pub fn tool_change_command(&self) -> Option<&str> {
        self.tool_change_command
            .as_deref()
            .filter(|cmd| !cmd.is_empty())
    }

    /// Whether any external event must resolve before the next block starts
    pub fn awaiting_external(&self) -> bool {
        self.probe_flag || self.input_flag || self.toolchange_flag
    }

    /// Remove the pending completion routine, leaving the slot empty.
    pub fn take_epilog(&mut self) -> Option<Epilog> {
        self.epilog.take()
    }
}

/// Round half away from zero to the nearest integer.
pub fn round_to_int(value: f64) -> i32 {
    value.round() as i32
}

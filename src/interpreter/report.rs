//! Operator-facing error messages.
//!
//! Formats a status together with the file, line and a caller-supplied
//! context, and hands the text to the host's message sink. Reporting never
//! changes control flow: the status passes through untouched.

use crate::interpreter::host::{Canon, Diagnostics};
use crate::runtime::InterpConfig;
use crate::runtime::error::{InterpResult, Status};
use crate::runtime::settings::Settings;

/// Deepest handler frame listed in a traceback.
pub const MAX_TRACEBACK_FRAMES: usize = 5;

/// Formats and emits diagnostics for failed steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorReporter {
    traceback: bool,
}

impl ErrorReporter {
    /// Reporter that optionally appends handler frames to errors.
    pub fn new(traceback: bool) -> Self {
        Self { traceback }
    }

    /// Reporter configured for a session.
    pub fn from_config(config: &InterpConfig) -> Self {
        Self::new(config.traceback)
    }

    /// Emit a message for `result` unless it lets the host carry on, then return it.
    pub fn report<H: Canon + Diagnostics + ?Sized>(
        &self,
        host: &mut H,
        settings: &Settings,
        result: InterpResult<Status>,
        context: &str,
    ) -> InterpResult<Status> {
        for line in self.format(host, settings, &result, context) {
            host.emit_message(&line);
        }
        result
    }

    /// Lines [`report`](Self::report) would emit.
    pub fn format<H: Diagnostics + ?Sized>(
        &self,
        host: &H,
        settings: &Settings,
        result: &InterpResult<Status>,
        context: &str,
    ) -> Vec<String> {
        if matches!(result, Ok(status) if status.is_ok()) {
            return Vec::new();
        }

        let tag = host.status_tag(result);
        let explanation = match result {
            Err(err) => host.error_text(err),
            Ok(_) => None,
        };

        let mut lines = vec![match explanation {
            Some(text) => format!(
                "{}:{}: \"{}\" - {} ({})",
                settings.filename, settings.sequence_number, context, text, tag
            ),
            None => format!(
                "{}:{}: \"{}\" ({})",
                settings.filename, settings.sequence_number, context, tag
            ),
        }];

        if self.traceback && result.is_err() {
            for index in 0..MAX_TRACEBACK_FRAMES {
                match host.stack_frame_name(index) {
                    Some(name) if !name.is_empty() => lines.push(format!("{}: {}", index, name)),
                    _ => break,
                }
            }
        }

        lines
    }
}

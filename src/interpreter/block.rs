//! Parsed program lines as the execution core sees them
//!
//! A [`Block`] is plain data: modal-group slots, word flags and values. The
//! executor reads it and, with trailing removal on, clears what it consumed.

use serde::{Deserialize, Serialize};

/// Number of G-code modal groups.
pub const G_MODE_GROUPS: usize = 16;
/// Number of M-code modal groups.
pub const M_MODE_GROUPS: usize = 11;

/// Motion group (G0, G1, G2, G3, canned cycles).
pub const GM_MOTION: usize = 1;
/// Feed mode group (G93, G94, G95).
pub const GM_FEED_MODE: usize = 5;
/// Spindle mode group (G96, G97).
pub const GM_SPINDLE_MODE: usize = 14;

/// M group holding program stops (M0, M1, M2, M30, M60).
pub const MG_STOP: usize = 4;
/// M group holding tool change (M6).
pub const MG_TOOL_CHANGE: usize = 6;

/// G-codes are stored in tenths, so G93 is 930 and G64.1 would be 641.
pub const G_93: i32 = 930;
/// Units per minute feed.
pub const G_94: i32 = 940;
/// Units per revolution feed.
pub const G_95: i32 = 950;

/// One parsed program line.
///
/// Slots hold `None` when the line did not mention that group or word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Sequence number stamped by the executor
    pub line_number: i32,
    /// Comment text, if the line carried one
    pub comment: Option<String>,
    /// Selected G-code per modal group, in tenths
    pub g_modes: [Option<i32>; G_MODE_GROUPS],
    /// Selected M-code per modal group
    pub m_modes: [Option<i32>; M_MODE_GROUPS],
    /// Whether an F word is present
    pub f_flag: bool,
    /// F word value
    pub f_number: f64,
    /// Whether an S word is present
    pub s_flag: bool,
    /// S word value
    pub s_number: f64,
    /// Whether a T word is present
    pub t_flag: bool,
    /// T word value
    pub t_number: i32,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            line_number: 0,
            comment: None,
            g_modes: [None; G_MODE_GROUPS],
            m_modes: [None; M_MODE_GROUPS],
            f_flag: false,
            f_number: 0.0,
            s_flag: false,
            s_number: 0.0,
            t_flag: false,
            t_number: 0,
        }
    }
}

impl Block {
    /// Empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code for a G modal group.
    ///
    /// # Panics
    ///
    /// Panics if `group` is not below [`G_MODE_GROUPS`].
    pub fn with_g(mut self, group: usize, code: i32) -> Self {
        self.g_modes[group] = Some(code);
        self
    }

    /// Set the code for an M modal group.
    ///
    /// # Panics
    ///
    /// Panics if `group` is not below [`M_MODE_GROUPS`].
    pub fn with_m(mut self, group: usize, code: i32) -> Self {
        self.m_modes[group] = Some(code);
        self
    }

    /// Attach a comment.
    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    /// Attach an F word.
    pub fn with_feed(mut self, rate: f64) -> Self {
        self.f_flag = true;
        self.f_number = rate;
        self
    }

    /// Attach an S word.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.s_flag = true;
        self.s_number = speed;
        self
    }

    /// Attach a T word.
    pub fn with_tool(mut self, tool: i32) -> Self {
        self.t_flag = true;
        self.t_number = tool;
        self
    }

    /// Feed-mode code, if the line selected one.
    pub fn feed_mode(&self) -> Option<i32> {
        self.g_modes[GM_FEED_MODE]
    }

    /// Spindle-mode code, if the line selected one.
    pub fn spindle_mode(&self) -> Option<i32> {
        self.g_modes[GM_SPINDLE_MODE]
    }

    /// Program-stop code, if the line carried one.
    pub fn stop_code(&self) -> Option<i32> {
        self.m_modes[MG_STOP]
    }
}

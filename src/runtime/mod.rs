//! Shared interpreter context, status model, and configuration
//!
//! This module holds the state the execution core mutates ([`Settings`]), the
//! outcome/error vocabulary every step speaks ([`Status`], [`InterpError`]),
//! and the configuration a host uses to seed a session.

use serde::{Deserialize, Serialize};

// Submodules
pub mod error;
pub mod settings;

/// Configuration for an interpretation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpConfig {
    /// Program file name shown in diagnostics
    pub filename: String,

    /// Handler template for deferred tool selection (empty or absent selects synchronously)
    pub tool_change_command: Option<String>,

    /// Append up to five handler frame names to reported errors
    pub traceback: bool,
}

impl Default for InterpConfig {
    fn default() -> Self {
        Self {
            filename: String::new(),
            tool_change_command: None,
            traceback: false,
        }
    }
}

// Re-export commonly used types
pub use error::{ErrorClass, InterpError, InterpResult, MIN_ERROR, Status, is_error_code};
pub use settings::{Epilog, FeedMode, Settings, round_to_int};

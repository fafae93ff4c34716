//! Status and error types for the block execution core
//!
//! Success outcomes are a small closed set ([`Status`]); failures are
//! [`InterpError`] values built with thiserror. Both share one numeric code
//! space so a single threshold ([`MIN_ERROR`]) separates the error family.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Codes strictly above this value belong to the error family.
pub const MIN_ERROR: i32 = 3;

/// Returns true when `code` lies in the error family.
pub fn is_error_code(code: i32) -> bool {
    code > MIN_ERROR
}

/// Successful outcome of a step or of a whole block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Fully done, proceed to the next block
    Ok,
    /// The interpreter must terminate (program end)
    Exit,
    /// All actions issued, but an external event must resolve before the next block
    ExecuteFinish,
}

impl Status {
    /// Numeric status code
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Exit => 1,
            Status::ExecuteFinish => 2,
        }
    }

    /// Short tag used in diagnostics
    pub fn tag(self) -> &'static str {
        match self {
            Status::Ok => "INTERP_OK",
            Status::Exit => "INTERP_EXIT",
            Status::ExecuteFinish => "INTERP_EXECUTE_FINISH",
        }
    }

    /// OK and EXECUTE_FINISH let the host keep going; EXIT does not.
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok | Status::ExecuteFinish)
    }
}

/// Whether an error has a textual explanation or signals a defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Recoverable machine/program condition with an explanation
    Diagnosable,
    /// Invariant violation in the caller; a defect to fix
    Bug,
}

/// Errors raised by the execution core and its collaborators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpError {
    /// Division with a right operand of exactly zero
    #[error("Attempt to divide by zero")]
    DivideByZero,

    /// Negative base with a non-integer exponent
    #[error("Attempt to raise negative to non-integer power")]
    NegativeToNonIntegerPower,

    /// acos argument outside [-1, 1]
    #[error("Argument to acos out of range")]
    AcosOutOfRange,

    /// asin argument outside [-1, 1]
    #[error("Argument to asin out of range")]
    AsinOutOfRange,

    /// ln argument not strictly positive
    #[error("Zero or negative argument to ln")]
    LnOfNonPositive,

    /// sqrt argument negative
    #[error("Negative argument to sqrt")]
    SqrtOfNegative,

    /// Operation code that names no binary/unary operator
    #[error("Bug: unknown operation {code}")]
    UnknownOperation {
        /// Offending operation code
        code: u8,
    },

    /// Pocket lookup could not place the requested tool
    #[error("Requested tool {tool} not found in the tool table")]
    UnknownPocket {
        /// Tool number that was requested
        tool: i32,
    },

    /// Failure reported by a modal-conversion or handler collaborator
    #[error("{message}")]
    Conversion {
        /// Collaborator's own error code (must be above `MIN_ERROR`)
        code: i32,
        /// Explanation supplied by the collaborator
        message: String,
    },
}

impl InterpError {
    /// Numeric error code, always above [`MIN_ERROR`]
    pub fn code(&self) -> i32 {
        match self {
            InterpError::DivideByZero => 10,
            InterpError::NegativeToNonIntegerPower => 11,
            InterpError::AcosOutOfRange => 12,
            InterpError::AsinOutOfRange => 13,
            InterpError::LnOfNonPositive => 14,
            InterpError::SqrtOfNegative => 15,
            InterpError::UnknownPocket { .. } => 16,
            InterpError::UnknownOperation { .. } => 90,
            InterpError::Conversion { code, .. } => (*code).max(MIN_ERROR + 1),
        }
    }

    /// Diagnosable or bug
    pub fn class(&self) -> ErrorClass {
        match self {
            InterpError::UnknownOperation { .. } => ErrorClass::Bug,
            _ => ErrorClass::Diagnosable,
        }
    }

    /// Short tag used in diagnostics
    pub fn tag(&self) -> &'static str {
        match self.class() {
            ErrorClass::Diagnosable => "INTERP_ERROR",
            ErrorClass::Bug => "INTERP_BUG",
        }
    }
}

/// Convenience result alias for the execution core
pub type InterpResult<T> = std::result::Result<T, InterpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes_sit_below_the_error_threshold() {
        for status in [Status::Ok, Status::Exit, Status::ExecuteFinish] {
            assert!(!is_error_code(status.code()));
        }
    }

    #[test]
    fn every_error_code_is_above_the_threshold() {
        let errors = vec![
            InterpError::DivideByZero,
            InterpError::NegativeToNonIntegerPower,
            InterpError::AcosOutOfRange,
            InterpError::AsinOutOfRange,
            InterpError::LnOfNonPositive,
            InterpError::SqrtOfNegative,
            InterpError::UnknownOperation { code: 42 },
            InterpError::UnknownPocket { tool: 7 },
            InterpError::Conversion {
                code: 0,
                message: "bad".into(),
            },
        ];
        for err in errors {
            assert!(is_error_code(err.code()), "{err:?} has code {}", err.code());
        }
    }

    #[test]
    fn unknown_operation_is_a_bug() {
        assert_eq!(
            InterpError::UnknownOperation { code: 3 }.class(),
            ErrorClass::Bug
        );
        assert_eq!(InterpError::DivideByZero.class(), ErrorClass::Diagnosable);
    }

    #[test]
    fn exit_is_not_a_continue_status() {
        assert!(Status::Ok.is_ok());
        assert!(Status::ExecuteFinish.is_ok());
        assert!(!Status::Exit.is_ok());
    }
}

//! Runtime fault types for template execution.

use thiserror::Error;

/// Faults raised while executing a compiled template.
///
/// Nothing here is caught internally — every fault propagates to the caller
/// of the render.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("syntax error in `{expr}`: {message}")]
    Syntax { expr: String, message: String },

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("index {index} out of bounds for list of length {len}")]
    OutOfBounds { index: i64, len: usize },

    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    #[error("malformed loop header `{0}`: expected `collection as item` or `collection as key => item`")]
    BadLoopHeader(String),

    #[error("cannot iterate over {0}")]
    NotIterable(&'static str),
}

/// Result alias for execution operations.
pub type EvalResult<T> = Result<T, EvalError>;

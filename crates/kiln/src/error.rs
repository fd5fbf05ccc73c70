//! The facade error type.

use kiln_eval::EvalError;
use kiln_types::CompileError;
use thiserror::Error;

/// Any failure surfaced by a render.
///
/// No stage retries and nothing is caught internally; every failure
/// propagates here unchanged.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template resolution or cache I/O failure.
    #[error("template I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directive-level compile failure (bad include, mismatched blocks).
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The cache artifact could not be encoded or decoded.
    #[error("cache artifact error: {0}")]
    Artifact(#[from] serde_json::Error),

    /// Runtime fault while executing the compiled template.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

//! Shared types for the kiln template engine.
//!
//! This crate defines the compiled instruction tree, source spans,
//! and the compile error type used across all pipeline stages.

mod error;
mod span;
pub mod ir;

pub use error::{BlockKind, BranchDirective, CompileError, CompileErrorKind};
pub use ir::{Branch, Node, Template};
pub use span::Span;

/// Result type used by the kiln compiler stages.
pub type Result<T> = std::result::Result<T, CompileError>;

//! kiln execution sandbox.
//!
//! Interprets a compiled [`kiln_types::Template`] against a per-render set
//! of variable bindings. Expression strings stored in the tree are parsed
//! and evaluated here, at render time — this crate is the "host execution
//! layer" the compiler defers expressions to.
//!
//! The execution scope is strictly per call: nothing is shared or reused
//! between renders, and the output buffer is owned by the call, so it is
//! released on every exit path including faults.

mod env;
mod error;
mod expr;
mod interp;
mod sink;
mod value;

pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use expr::eval_expr;
pub use interp::{execute, Bindings};
pub use sink::{escape_html, Sink};
pub use value::Value;

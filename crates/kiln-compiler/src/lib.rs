//! kiln tag compiler — translates directive-tag template text into the
//! compiled instruction tree.
//!
//! ```text
//! source text → include expansion → scanner → block builder → Template
//! ```
//!
//! The compiler is deterministic: the same source text always produces the
//! same tree. Its only side effect is include expansion, which reads other
//! templates through the [`Loader`] seam; cyclic includes are not detected
//! and recurse until the stack gives out.

mod builder;
mod include;
mod scanner;

pub use include::{expand_includes, Loader};
pub use scanner::{ScanResult, Scanner, Token, TokenKind};

use kiln_types::{Result, Template};

/// Compile template source into a [`Template`].
///
/// Includes are inlined first (raw, uncompiled text — so included files may
/// contain any directive), then the expanded text is scanned and assembled.
/// Mismatched or unclosed block directives are compile errors.
pub fn compile(source: &str, loader: &dyn Loader) -> Result<Template> {
    let expanded = expand_includes(source, loader)?;
    let scan = Scanner::new(&expanded).scan();
    builder::build(scan)
}

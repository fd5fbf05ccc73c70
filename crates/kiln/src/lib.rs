//! kiln — a minimal directive-tag template engine.
//!
//! Templates compile to a serialized instruction tree, cached on disk keyed
//! by a fingerprint of the template's resolved path, and are interpreted
//! against per-render bindings:
//!
//! ```text
//! source text → tag compiler → cache store (persist-if-changed) → sandbox → String
//! ```
//!
//! ```no_run
//! use kiln::{Engine, Value};
//! use std::collections::BTreeMap;
//!
//! let engine = Engine::new("templates")?;
//! let mut bindings = BTreeMap::new();
//! bindings.insert("name".to_string(), Value::from("Ada"));
//! let page = engine.bake("views.hello", &bindings)?;
//! # let _ = page;
//! # Ok::<(), kiln::RenderError>(())
//! ```

mod error;
mod loader;
mod simple;

pub use error::RenderError;
pub use loader::{FileLoader, DEFAULT_EXTENSION};

pub use kiln_cache::{fingerprint, CacheStore};
pub use kiln_compiler::{compile, Loader};
pub use kiln_eval::{escape_html, execute, Bindings, EvalError, Value};
pub use kiln_types::{CompileError, CompileErrorKind, Node, Template};

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// The template engine: a template root, a file extension, and a cache
/// directory.
///
/// One `Engine` serves any number of renders; nothing is shared between
/// successive [`bake`](Engine::bake) calls. Single-process use is assumed —
/// the cache store takes no cross-process locks.
#[derive(Debug, Clone)]
pub struct Engine {
    loader: FileLoader,
    cache: CacheStore,
}

impl Engine {
    /// Create an engine rooted at `root`, using the default `.tmpl`
    /// extension and the cache directory `<root>/cached/`, created if
    /// absent.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        let cache_dir = root.join("cached");
        fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            loader: FileLoader::new(root, DEFAULT_EXTENSION),
            cache: CacheStore::new(cache_dir),
        })
    }

    /// Use a different template file extension (leading dot included).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.loader.set_extension(extension);
        self
    }

    /// Use a different cache directory, created if absent.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        self.cache = CacheStore::new(dir);
        Ok(self)
    }

    /// Render a template: resolve `name`, compile, persist the artifact if
    /// its fingerprint changed, then execute the cached artifact against
    /// `bindings`.
    ///
    /// No stage retries. Resolution failures, cache write failures,
    /// compile errors, and runtime faults all propagate unchanged.
    pub fn bake(&self, name: &str, bindings: &Bindings) -> Result<String, RenderError> {
        let path = self.loader.resolve(name);
        let source = fs::read_to_string(&path)?;
        let template = compile(&source, &self.loader)?;
        let artifact = template.to_artifact()?;
        let location = self
            .cache
            .ensure_cached(&path.to_string_lossy(), &artifact)?;
        // Execute what is actually on disk, so the cache file stays on the
        // hot path and external tampering is observable.
        let cached = fs::read(&location)?;
        let template = Template::from_artifact(&cached)?;
        Ok(execute(&template, bindings)?)
    }

    /// Lightweight `{{ key }}` substitution, outside the compile/cache
    /// pipeline entirely.
    ///
    /// `text_or_name` is tried as a template name first; if it does not
    /// resolve to a readable file it is treated as the text itself. Unknown
    /// keys keep their literal tag text and no escaping is applied.
    pub fn simple(&self, text_or_name: &str, bindings: &BTreeMap<String, String>) -> String {
        let text = self
            .loader
            .load(text_or_name)
            .unwrap_or_else(|_| text_or_name.to_string());
        simple::substitute(&text, bindings)
    }
}

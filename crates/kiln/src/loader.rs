//! Filesystem template loading.

use kiln_compiler::Loader;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Default template file extension.
pub const DEFAULT_EXTENSION: &str = ".tmpl";

/// Resolves logical template names to files under a root directory.
///
/// A name's dot-separated segments become path segments:
/// `views.user.profile` → `<root>/views/user/profile<extension>`.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
    extension: String,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub(crate) fn set_extension(&mut self, extension: impl Into<String>) {
        self.extension = extension.into();
    }

    /// The filesystem location a logical name resolves to.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}{}", name.replace('.', "/"), self.extension))
    }
}

impl Loader for FileLoader {
    fn load(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(name))
    }
}

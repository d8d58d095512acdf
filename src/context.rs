use std::path::PathBuf;

/// Context passed throughout the application containing global configuration
#[derive(Clone)]
pub struct Context {
    /// Enable verbose diagnostics on stderr
    pub verbose: bool,

    /// Canonicalized project root; the traversal boundary for this run
    pub root_dir: PathBuf,
}

impl Context {
    pub fn new(root_dir: PathBuf, verbose: bool) -> Self {
        Self { verbose, root_dir }
    }
}

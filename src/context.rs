use std::path::PathBuf;

/// Context passed throughout the application containing run-wide settings
#[derive(Clone, Debug)]
pub struct Context {
    /// Report every archive entry as it is planned or written
    pub verbose: bool,

    /// Directory all layout paths are resolved against
    pub root: PathBuf,
}

impl Context {
    pub fn new(root: PathBuf, verbose: bool) -> Self {
        Self { verbose, root }
    }
}

//! Execution context carrying the operator's command-line choices.

use std::path::PathBuf;

/// Execution context for one uninstall run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Filesystem root every managed path is resolved against (default: /)
    pub root: PathBuf,
    /// If true, log mutations without performing them
    pub dry_run: bool,
    /// If true, print commands and removals as they happen
    pub verbose: bool,
    /// If true, refuse to run on hosts outside the compatibility table
    pub check_os: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/"),
            dry_run: false,
            verbose: false,
            check_os: false,
        }
    }
}

impl Context {
    /// Create a context whose managed paths live under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Set dry run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set verbose mode.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable the OS support gate.
    pub fn check_os(mut self, check_os: bool) -> Self {
        self.check_os = check_os;
        self
    }
}

//! Uninstall error types.

use thiserror::Error;

/// Errors that stop an uninstall run.
///
/// Every variant terminates the process with exit status 1. Failures of
/// individual teardown steps are not errors; they are reported as warnings
/// and the run continues.
#[derive(Error, Debug)]
pub enum UninstallError {
    #[error("this tool must be executed with root privileges (sudo)")]
    NotRoot,

    #[error("{tool} is required in order for this tool to work")]
    MissingTool { tool: String },

    #[error("unsupported OS: {id} {version}")]
    UnsupportedOs { id: String, version: String },

    #[error("Nothing to uninstall!")]
    NothingSelected,

    #[error("Uninstallation aborted.")]
    Aborted,

    #[error("database command failed: {cmd}\nstderr: {stderr}")]
    Database { cmd: String, stderr: String },

    #[error("standard input closed while waiting for an answer")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl UninstallError {
    /// True for failures detected before anything was touched.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotRoot
                | Self::MissingTool { .. }
                | Self::UnsupportedOs { .. }
                | Self::NothingSelected
                | Self::Aborted
        )
    }
}

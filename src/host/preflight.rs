//! Checks that must pass before anything else runs.

use crate::core::context::Context;
use crate::core::error::UninstallError;

/// HTTP client the surrounding installer tooling relies on.
pub const HTTP_CLIENT: &str = "curl";

/// Check if we're running as root
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Abort unless running as root with the HTTP client on `PATH`.
///
/// The root check is skipped in dry-run mode, which never mutates the host.
pub fn preflight(ctx: &Context) -> Result<(), UninstallError> {
    if !ctx.dry_run && !is_root() {
        return Err(UninstallError::NotRoot);
    }
    require_tool(HTTP_CLIENT)
}

/// Fail with [`UninstallError::MissingTool`] if `tool` is not on `PATH`.
pub fn require_tool(tool: &str) -> Result<(), UninstallError> {
    match which::which(tool) {
        Ok(path) => {
            tracing::debug!(tool, path = %path.display(), "found required tool");
            Ok(())
        }
        Err(_) => Err(UninstallError::MissingTool {
            tool: tool.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_reported_by_name() {
        let err = require_tool("definitely-not-a-real-binary-xyz").unwrap_err();
        match err {
            UninstallError::MissingTool { tool } => {
                assert_eq!(tool, "definitely-not-a-real-binary-xyz")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sh_is_found() {
        assert!(require_tool("sh").is_ok());
    }
}

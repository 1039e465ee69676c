//! Idempotent filesystem removal
//!
//! Removing a path that is already gone is a successful no-op.

use std::io;
use std::path::Path;

use super::context::Context;

/// What [`remove_path`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The path existed and was deleted (or would be, in dry-run).
    Removed,
    /// Nothing was at the path.
    Absent,
}

/// Delete a file, symlink or directory tree if it exists.
///
/// Symlinks are unlinked, never followed.
pub fn remove_path(ctx: &Context, path: &Path) -> io::Result<Removal> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Removal::Absent),
        Err(e) => return Err(e),
    };

    if ctx.verbose || ctx.dry_run {
        eprintln!(
            "[{}] rm {}",
            if ctx.dry_run { "dry-run" } else { "exec" },
            path.display()
        );
    }

    if ctx.dry_run {
        return Ok(Removal::Removed);
    }

    let result = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(Removal::Removed),
        // Raced with something else removing it.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Removal::Absent),
        Err(e) => Err(e),
    }
}

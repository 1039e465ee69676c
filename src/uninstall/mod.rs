//! Uninstall workflow
//!
//! Detection, selection, confirmation and ordered teardown. Nothing is
//! removed until the operator has selected a component and confirmed the
//! summary.

pub mod cron;
pub mod database;
pub mod layout;
pub mod panel;
pub mod selection;
pub mod wings;

use std::path::PathBuf;

use crate::core::context::Context;
use crate::core::error::UninstallError;
use crate::core::fsops::{remove_path, Removal};
use crate::core::output;
use crate::core::prompt::Prompt;
use crate::core::runner::{run_mutation, Cmd, CommandRunner};
use crate::host::{self, HostEnvironment};

use layout::Layout;

pub use database::{Choice, DatabaseTarget};
pub use selection::ComponentSelection;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct Report {
    pub host: HostEnvironment,
    pub selection: ComponentSelection,
    /// Paths that existed and were removed, in removal order
    pub removed: Vec<PathBuf>,
    /// What database teardown resolved to, if the panel was removed
    pub database: Option<DatabaseTarget>,
    /// Steps that failed and were skipped
    pub warnings: usize,
}

/// Drives one uninstall run.
pub struct Workflow<'a> {
    ctx: &'a Context,
    runner: &'a dyn CommandRunner,
}

impl<'a> Workflow<'a> {
    pub fn new(ctx: &'a Context, runner: &'a dyn CommandRunner) -> Self {
        Self { ctx, runner }
    }

    /// Run the whole workflow after preflight has passed.
    pub fn run(&self, prompt: &mut dyn Prompt) -> Result<Report, UninstallError> {
        let host = host::detect(self.ctx, self.runner);
        output::info(&format!("Detected OS: {}", host));

        if self.ctx.check_os {
            host::ensure_supported(&host)?;
        }

        let selection = selection::select(self.ctx, prompt)?;
        selection::summarize(&host, &selection);

        if !prompt.confirm("Continue with uninstallation?")? {
            return Err(UninstallError::Aborted);
        }

        self.teardown(host, selection, prompt)
    }

    /// Remove the selected components. Panel first, then Wings.
    ///
    /// The database server is stopped only after the panel database and
    /// user are dropped.
    ///
    /// Callers must have obtained the operator's confirmation.
    pub(crate) fn teardown(
        &self,
        host: HostEnvironment,
        selection: ComponentSelection,
        prompt: &mut dyn Prompt,
    ) -> Result<Report, UninstallError> {
        let mut td = Teardown::new(self.ctx, self.runner);
        let mut database = None;

        if selection.remove_panel {
            panel::remove_files(&mut td, &host);
            panel::remove_services(&mut td, &host);
            cron::remove_schedule(&mut td);
            database = Some(database::teardown(&mut td, prompt)?);
            panel::stop_database(&mut td);
        }

        if selection.remove_wings {
            wings::remove(&mut td);
        }

        let (removed, warnings) = td.finish();
        if warnings == 0 {
            output::success("Uninstallation complete");
        } else {
            output::success(&format!(
                "Uninstallation complete ({} step(s) skipped, see warnings above)",
                warnings
            ));
        }

        Ok(Report {
            host,
            selection,
            removed,
            database,
            warnings,
        })
    }
}

/// Best-effort mutation helpers shared by the teardown steps.
///
/// A failing step is reported and skipped; the next step always runs.
pub struct Teardown<'a> {
    ctx: &'a Context,
    runner: &'a dyn CommandRunner,
    removed: Vec<PathBuf>,
    warnings: usize,
}

impl<'a> Teardown<'a> {
    pub fn new(ctx: &'a Context, runner: &'a dyn CommandRunner) -> Self {
        Self {
            ctx,
            runner,
            removed: Vec::new(),
            warnings: 0,
        }
    }

    pub fn ctx(&self) -> &'a Context {
        self.ctx
    }

    pub fn runner(&self) -> &'a dyn CommandRunner {
        self.runner
    }

    /// Remove a managed path if it exists.
    pub fn remove(&mut self, absolute: &str) {
        let path = Layout::of(self.ctx).resolve(absolute);
        match remove_path(self.ctx, &path) {
            Ok(Removal::Removed) => {
                output::detail(&format!("removed {}", path.display()));
                self.removed.push(path);
            }
            Ok(Removal::Absent) => {
                tracing::debug!(path = %path.display(), "already absent");
            }
            Err(e) => self.warn(&format!("could not remove {}: {}", path.display(), e)),
        }
    }

    /// `systemctl disable --now <service>`
    pub fn disable_service(&mut self, service: &str) -> bool {
        self.exec(Cmd::new("systemctl").args(["disable", "--now", service]))
    }

    /// Run a mutating command. Returns whether it succeeded.
    ///
    /// A non-zero exit usually means the unit or file is already gone, so it
    /// is only noted. A command that cannot be started at all is a warning.
    pub fn exec(&mut self, cmd: Cmd) -> bool {
        output::sub_action(&cmd.to_string());
        match run_mutation(self.ctx, self.runner, &cmd) {
            Ok(out) if out.success() => true,
            Ok(out) => {
                tracing::debug!(command = %cmd, code = ?out.code, stderr = %out.stderr.trim(), "command failed");
                output::skip(&format!("{} exited with {:?}, continuing", cmd, out.code));
                false
            }
            Err(e) => {
                self.warn(&format!("{} could not be started: {}", cmd, e));
                false
            }
        }
    }

    pub fn warn(&mut self, message: &str) {
        output::warning(message);
        self.warnings += 1;
    }

    fn finish(self) -> (Vec<PathBuf>, usize) {
        (self.removed, self.warnings)
    }
}

//! Interactive uninstaller for the Pterodactyl panel and Wings daemon
//!
//! A run goes through a fixed pipeline:
//!
//! 1. Preflight: root privileges and `curl` on `PATH` ([`host::preflight`])
//! 2. OS detection ([`host::detect`]), optionally gated by the
//!    compatibility table ([`host::support`])
//! 3. Presence detection and per-component selection
//!    ([`uninstall::selection`])
//! 4. Summary and a final confirmation
//! 5. Ordered teardown: panel files, panel services, the panel's cron
//!    entry and the panel database ([`uninstall::database`]), then Wings
//!
//! Nothing is removed unless the operator selected the component and
//! confirmed the summary. Individual teardown steps are best-effort:
//! a path that is already gone or a unit that no longer exists does not
//! stop the run.
//!
//! # Example
//!
//! ```no_run
//! use ptero_uninstall::{Context, SystemRunner, TerminalPrompt, Workflow};
//!
//! let ctx = Context::default().dry_run(true);
//! let runner = SystemRunner;
//! let mut prompt = TerminalPrompt::new();
//! let report = Workflow::new(&ctx, &runner).run(&mut prompt)?;
//! println!("removed {} path(s)", report.removed.len());
//! # Ok::<(), ptero_uninstall::UninstallError>(())
//! ```

pub mod core;
pub mod host;
pub mod uninstall;

#[doc(hidden)]
pub mod test_support;

pub use crate::core::context::Context;
pub use crate::core::error::UninstallError;
pub use crate::core::output;
pub use crate::core::prompt::{Prompt, TerminalPrompt};
pub use crate::core::runner::{CommandRunner, SystemRunner};
pub use host::HostEnvironment;
pub use uninstall::{ComponentSelection, Report, Workflow};

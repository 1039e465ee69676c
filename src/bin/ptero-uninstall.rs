//! ptero-uninstall - remove the Pterodactyl panel and/or Wings from this host
//!
//! Usage:
//!   ptero-uninstall                Interactive uninstall
//!   ptero-uninstall --dry-run      Walk through every prompt, change nothing
//!   ptero-uninstall --check-os     Refuse to run on unsupported distributions

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use ptero_uninstall::host::preflight;
use ptero_uninstall::{output, Context, SystemRunner, TerminalPrompt, Workflow};

#[derive(Parser)]
#[command(name = "ptero-uninstall")]
#[command(about = "Uninstall the Pterodactyl panel and Wings daemon")]
#[command(version)]
struct Cli {
    /// Print every change instead of making it
    #[arg(long)]
    dry_run: bool,

    /// Print each command and removal as it happens
    #[arg(short, long)]
    verbose: bool,

    /// Abort on distributions outside the supported table
    #[arg(long)]
    check_os: bool,

    /// Resolve managed paths under this directory
    #[arg(long, hide = true, default_value = "/")]
    root: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Context::with_root(cli.root)
        .dry_run(cli.dry_run)
        .verbose(cli.verbose)
        .check_os(cli.check_os);

    preflight::preflight(&ctx)?;

    output::rule();
    output::action(&format!("ptero-uninstall v{}", env!("CARGO_PKG_VERSION")));
    if ctx.dry_run {
        output::info("Dry run: nothing will be changed");
    }
    output::rule();

    let runner = SystemRunner;
    let mut prompt = TerminalPrompt::new();
    let report = Workflow::new(&ctx, &runner).run(&mut prompt)?;

    output::info(&format!(
        "{} path(s) removed from {}",
        report.removed.len(),
        report.host
    ));
    Ok(())
}

/// Diagnostics go to stderr. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

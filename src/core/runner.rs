//! External command execution
//!
//! Everything this tool does outside the filesystem (service manager,
//! scheduled tasks, database client, release probes) goes through the
//! [`CommandRunner`] trait, so the teardown sequence can be recorded in tests.

use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

use super::context::Context;

/// An external command: program, arguments, extra environment and stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cmd {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub stdin: Option<String>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child. Values never appear in
    /// the rendered command line.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Feed `input` to the child's stdin.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands.
pub trait CommandRunner {
    /// Run `cmd` to completion and capture its output.
    ///
    /// `Err` means the program could not be started at all; a non-zero exit
    /// is an `Ok` with a failing [`CommandOutput`].
    fn run(&self, cmd: &Cmd) -> std::io::Result<CommandOutput>;
}

/// Runs commands on the host with `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &Cmd) -> std::io::Result<CommandOutput> {
        tracing::debug!(command = %cmd, "spawning");

        let mut command = Command::new(&cmd.program);
        command
            .args(&cmd.args)
            .envs(cmd.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if cmd.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = command.spawn()?;
        if let Some(input) = &cmd.stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(input.as_bytes())?;
            }
        }
        let output = child.wait_with_output()?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(command = %cmd, code = ?result.code, "finished");
        Ok(result)
    }
}

/// Run a command that changes host state, honoring dry-run.
///
/// In dry-run mode the command is printed and reported as successful
/// without being started.
pub fn run_mutation(
    ctx: &Context,
    runner: &dyn CommandRunner,
    cmd: &Cmd,
) -> std::io::Result<CommandOutput> {
    if ctx.verbose || ctx.dry_run {
        eprintln!("[{}] {}", if ctx.dry_run { "dry-run" } else { "exec" }, cmd);
    }

    if ctx.dry_run {
        return Ok(CommandOutput::ok(""));
    }

    runner.run(cmd)
}

/// Shell-quote a value for display.
pub fn shell_quote(s: impl fmt::Display) -> String {
    let s = s.to_string();
    if !s.is_empty()
        && s.chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '=' | ':'))
    {
        s
    } else {
        format!("'{}'", s.replace('\'', "'\"'\"'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRunner;

    #[test]
    fn test_display_quotes_arguments_and_hides_env() {
        let cmd = Cmd::new("mysql")
            .args(["-u", "root", "-e", "FLUSH PRIVILEGES;"])
            .env("MYSQL_PWD", "hunter2");
        let shown = cmd.to_string();
        assert_eq!(shown, "mysql -u root -e 'FLUSH PRIVILEGES;'");
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("pteroq"), "pteroq");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("it's"), "'it'\"'\"'s'");
    }

    #[test]
    fn test_dry_run_does_not_reach_runner() {
        let ctx = Context::default().dry_run(true);
        let runner = MockRunner::new();
        let out = run_mutation(&ctx, &runner, &Cmd::new("systemctl").arg("stop")).unwrap();
        assert!(out.success());
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_system_runner_captures_stdout_and_stdin() {
        let out = SystemRunner
            .run(&Cmd::new("cat").stdin("hello\n"))
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "hello\n");
    }

    #[test]
    fn test_system_runner_missing_program_is_err() {
        assert!(SystemRunner.run(&Cmd::new("definitely-not-a-real-binary-xyz")).is_err());
    }
}

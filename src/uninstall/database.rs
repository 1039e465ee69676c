//! Panel database and database user teardown.
//!
//! Credentials are asked for on every run and only passed to the `mysql`
//! client through its environment. Client failures are fatal: there is no
//! retry and no attempt to validate credentials up front.

use crate::core::context::Context;
use crate::core::error::UninstallError;
use crate::core::output;
use crate::core::prompt::Prompt;
use crate::core::runner::{run_mutation, Cmd, CommandRunner};

use super::Teardown;

/// Database name the installer creates by default.
pub const DEFAULT_DATABASE: &str = "panel";
/// Database user the installer creates by default.
pub const DEFAULT_USER: &str = "pterodactyl";
/// Operator answer meaning "do not delete anything".
pub const SKIP: &str = "none";
/// Host the panel's database user is scoped to.
pub const USER_HOST: &str = "127.0.0.1";

const SYSTEM_SCHEMAS: &[&str] = &["information_schema", "performance_schema", "mysql", "sys"];
const ADMIN_USERS: &[&str] = &["root", "mysql", "mariadb.sys", "debian-sys-maint"];

/// Operator's decision for one database object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Named(String),
    /// The operator entered [`SKIP`].
    Skip,
}

/// What database teardown resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseTarget {
    pub database: Choice,
    pub user: Choice,
}

/// Database admin credentials for this run only.
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Thin wrapper over the `mysql` command-line client.
pub struct MysqlClient<'a> {
    runner: &'a dyn CommandRunner,
    creds: Credentials,
}

impl<'a> MysqlClient<'a> {
    pub fn new(runner: &'a dyn CommandRunner, creds: Credentials) -> Self {
        Self { runner, creds }
    }

    fn command(&self, sql: &str) -> Cmd {
        let cmd = Cmd::new("mysql").args(["-u", self.creds.user.as_str(), "-N", "-B", "-e", sql]);
        if self.creds.password.is_empty() {
            cmd
        } else {
            cmd.env("MYSQL_PWD", self.creds.password.as_str())
        }
    }

    /// Run a read-only statement and return its non-empty output rows.
    pub fn query(&self, sql: &str) -> Result<Vec<String>, UninstallError> {
        let cmd = self.command(sql);
        let out = self.runner.run(&cmd)?;
        if !out.success() {
            return Err(UninstallError::Database {
                cmd: cmd.to_string(),
                stderr: out.stderr.trim().to_string(),
            });
        }
        Ok(out
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    /// Run a statement that changes the server, honoring dry-run.
    pub fn execute(&self, ctx: &Context, sql: &str) -> Result<(), UninstallError> {
        let cmd = self.command(sql);
        output::sub_action(sql);
        let out = run_mutation(ctx, self.runner, &cmd)?;
        if !out.success() {
            return Err(UninstallError::Database {
                cmd: cmd.to_string(),
                stderr: out.stderr.trim().to_string(),
            });
        }
        Ok(())
    }

    /// User schemas, without the server's own.
    pub fn schemas(&self) -> Result<Vec<String>, UninstallError> {
        let rows = self.query("SELECT schema_name FROM information_schema.schemata;")?;
        Ok(candidates(rows, SYSTEM_SCHEMAS))
    }

    /// Account names, without administrative ones.
    pub fn users(&self) -> Result<Vec<String>, UninstallError> {
        let rows = self.query("SELECT user FROM mysql.user;")?;
        Ok(candidates(rows, ADMIN_USERS))
    }
}

/// Names that can be safely quoted into a DROP statement.
pub fn is_safe_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-'))
}

fn candidates(rows: Vec<String>, excluded: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in rows {
        if excluded.contains(&row.as_str()) || names.contains(&row) {
            continue;
        }
        if !is_safe_identifier(&row) {
            tracing::debug!(name = %row, "ignoring name with unexpected characters");
            continue;
        }
        names.push(row);
    }
    names
}

/// Ask for the admin account to connect with.
pub fn prompt_credentials(prompt: &mut dyn Prompt) -> Result<Credentials, UninstallError> {
    let user = prompt.line("Database admin user (default: root): ")?;
    let user = match user.trim() {
        "" => "root".to_string(),
        u => u.to_string(),
    };
    let password = prompt.secret(&format!(
        "Password for {} (leave empty for socket authentication): ",
        user
    ))?;
    Ok(Credentials::new(user, password))
}

/// Resolve which `kind` ("database" or "user") to delete.
///
/// Offers `conventional` first when it exists. Otherwise keeps asking until
/// the answer is one of `candidates` or [`SKIP`].
pub fn choose(
    prompt: &mut dyn Prompt,
    kind: &str,
    candidates: &[String],
    conventional: &str,
) -> Result<Choice, UninstallError> {
    if candidates.iter().any(|c| c == conventional) {
        let question = format!(
            "A {} called {} has been detected. Is it the panel {}?",
            kind, conventional, kind
        );
        if prompt.confirm(&question)? {
            return Ok(Choice::Named(conventional.to_string()));
        }
    }

    output::info(&format!("Existing {}s:", kind));
    if candidates.is_empty() {
        output::detail("(none found)");
    }
    for name in candidates {
        output::list_item(name);
    }

    loop {
        let answer = prompt.line(&format!(
            "Choose the panel {} (type '{}' to skip): ",
            kind, SKIP
        ))?;
        let answer = answer.trim();

        if answer.eq_ignore_ascii_case(SKIP) {
            return Ok(Choice::Skip);
        }
        if let Some(name) = candidates.iter().find(|c| c.as_str() == answer) {
            return Ok(Choice::Named(name.clone()));
        }
        output::warning(&format!("'{}' is not an existing {}", answer, kind));
    }
}

/// Drop the panel database and user, then flush privileges.
pub fn teardown(td: &mut Teardown<'_>, prompt: &mut dyn Prompt) -> Result<DatabaseTarget, UninstallError> {
    output::action("Removing database");
    let creds = prompt_credentials(prompt)?;
    let client = MysqlClient::new(td.runner(), creds);
    let ctx = td.ctx();

    let schemas = client.schemas()?;
    output::warning("Be careful! The selected database will be deleted!");
    let database = choose(prompt, "database", &schemas, DEFAULT_DATABASE)?;
    match &database {
        Choice::Named(name) => client.execute(ctx, &format!("DROP DATABASE `{}`;", name))?,
        Choice::Skip => output::skip("keeping database"),
    }

    output::action("Removing database user");
    let users = client.users()?;
    output::warning("Be careful! The selected user will be deleted!");
    let user = choose(prompt, "user", &users, DEFAULT_USER)?;
    match &user {
        Choice::Named(name) => {
            client.execute(ctx, &format!("DROP USER '{}'@'{}';", name, USER_HOST))?
        }
        Choice::Skip => output::skip("keeping database user"),
    }

    client.execute(ctx, "FLUSH PRIVILEGES;")?;

    Ok(DatabaseTarget { database, user })
}

//! Distro detection
//!
//! Sources are tried in a fixed order and the first one that names a
//! distribution wins:
//!
//! 1. `/etc/os-release`
//! 2. `lsb_release -si` / `lsb_release -sr`
//! 3. `/etc/lsb-release`
//! 4. `/etc/debian_version`
//! 5. `/etc/SuSe-release`
//! 6. `/etc/redhat-release`
//! 7. `uname -s` / `uname -r`, then the compile-time OS name
//!
//! The chain always produces a non-empty distribution id.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::core::context::Context;
use crate::core::runner::{Cmd, CommandRunner};

/// Major version reported when the version string has no leading number.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Identity of the host operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    /// Lower-cased distribution id, e.g. "ubuntu"
    pub distribution_id: String,
    /// Full version string as reported, e.g. "20.04"
    pub distribution_version: String,
    /// Leading numeric token of the version, e.g. "20"
    pub major_version: String,
}

impl HostEnvironment {
    pub fn new(id: impl AsRef<str>, version: impl Into<String>) -> Self {
        let distribution_version = version.into();
        Self {
            distribution_id: id.as_ref().trim().to_lowercase(),
            major_version: major_version(&distribution_version),
            distribution_version,
        }
    }

    /// Teardown layout family of this host.
    pub fn family(&self) -> DistroFamily {
        DistroFamily::of(&self.distribution_id)
    }
}

impl fmt::Display for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.distribution_id, self.distribution_version)
    }
}

/// Grouping of distributions that share nginx layout and service names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistroFamily {
    /// nginx sites-available/sites-enabled, `redis-server`
    Debian,
    /// nginx conf.d, `redis`, plus `php-fpm`
    Rhel,
}

impl DistroFamily {
    pub fn of(distribution_id: &str) -> Self {
        match distribution_id {
            "centos" => DistroFamily::Rhel,
            _ => DistroFamily::Debian,
        }
    }

    /// Name of the in-memory cache service.
    pub fn cache_service(&self) -> &'static str {
        match self {
            DistroFamily::Debian => "redis-server",
            DistroFamily::Rhel => "redis",
        }
    }
}

/// Leading numeric token of a version string ("20.04" -> "20").
pub fn major_version(version: &str) -> String {
    let digits: String = version
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        UNKNOWN_VERSION.to_string()
    } else {
        digits
    }
}

/// Detect the host OS. Never fails.
pub fn detect(ctx: &Context, runner: &dyn CommandRunner) -> HostEnvironment {
    let root = ctx.root.as_path();

    let (id, version) = from_os_release(root)
        .or_else(|| from_lsb_release_cmd(runner))
        .or_else(|| from_lsb_release_file(root))
        .or_else(|| from_debian_version(root))
        .or_else(|| from_release_banner(root, "etc/SuSe-release", Some("suse")))
        .or_else(|| from_release_banner(root, "etc/redhat-release", None))
        .unwrap_or_else(|| from_kernel(runner));

    let env = HostEnvironment::new(id, version);
    tracing::debug!(
        id = %env.distribution_id,
        version = %env.distribution_version,
        major = %env.major_version,
        "detected host"
    );
    env
}

fn read(root: &Path, rel: &str) -> Option<String> {
    std::fs::read_to_string(root.join(rel)).ok()
}

/// Accept a candidate only if it names a distribution.
fn named(id: String, version: String) -> Option<(String, String)> {
    if id.trim().is_empty() {
        None
    } else {
        Some((id, version))
    }
}

fn from_os_release(root: &Path) -> Option<(String, String)> {
    let vars = parse_env_file(&read(root, "etc/os-release")?);
    named(
        vars.get("ID").cloned().unwrap_or_default(),
        vars.get("VERSION_ID").cloned().unwrap_or_default(),
    )
}

fn from_lsb_release_cmd(runner: &dyn CommandRunner) -> Option<(String, String)> {
    let id = command_line(runner, Cmd::new("lsb_release").arg("-si"))?;
    let version = command_line(runner, Cmd::new("lsb_release").arg("-sr")).unwrap_or_default();
    named(id, version)
}

fn from_lsb_release_file(root: &Path) -> Option<(String, String)> {
    let vars = parse_env_file(&read(root, "etc/lsb-release")?);
    named(
        vars.get("DISTRIB_ID").cloned().unwrap_or_default(),
        vars.get("DISTRIB_RELEASE").cloned().unwrap_or_default(),
    )
}

fn from_debian_version(root: &Path) -> Option<(String, String)> {
    let version = read(root, "etc/debian_version")?;
    named("debian".to_string(), version.trim().to_string())
}

/// Free-form release files such as "CentOS Linux release 7.9.2009 (Core)".
///
/// The id is `fixed_id` if given, otherwise the first word of the banner.
fn from_release_banner(
    root: &Path,
    rel: &str,
    fixed_id: Option<&str>,
) -> Option<(String, String)> {
    let banner = read(root, rel)?;
    let id = match fixed_id {
        Some(id) => id.to_string(),
        None => banner.split_whitespace().next()?.to_string(),
    };
    let version = banner
        .split_whitespace()
        .find(|word| word.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(UNKNOWN_VERSION)
        .to_string();
    named(id, version)
}

fn from_kernel(runner: &dyn CommandRunner) -> (String, String) {
    let id = command_line(runner, Cmd::new("uname").arg("-s"))
        .unwrap_or_else(|| std::env::consts::OS.to_string());
    let version = command_line(runner, Cmd::new("uname").arg("-r"))
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string());
    (id, version)
}

/// First line of a successful command's stdout, if non-empty.
fn command_line(runner: &dyn CommandRunner, cmd: Cmd) -> Option<String> {
    let output = runner.run(&cmd).ok()?;
    if !output.success() {
        return None;
    }
    let line = output.stdout.lines().next()?.trim().to_string();
    if line.is_empty() { None } else { Some(line) }
}

/// Parse KEY=value files (`os-release`, `lsb-release`).
fn parse_env_file(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'').to_string();
            vars.insert(key.trim().to_string(), value);
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runner::CommandOutput;
    use crate::test_support::MockRunner;
    use tempfile::TempDir;

    fn host_root() -> (TempDir, Context) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("etc")).unwrap();
        let ctx = Context::with_root(dir.path());
        (dir, ctx)
    }

    fn write(dir: &TempDir, rel: &str, content: &str) {
        std::fs::write(dir.path().join(rel), content).unwrap();
    }

    #[test]
    fn test_major_version() {
        assert_eq!(major_version("20.04"), "20");
        assert_eq!(major_version("10"), "10");
        assert_eq!(major_version("7.9.2009"), "7");
        assert_eq!(major_version("bookworm/sid"), UNKNOWN_VERSION);
        assert_eq!(major_version(""), UNKNOWN_VERSION);
    }

    #[test]
    fn test_os_release_wins() {
        let (dir, ctx) = host_root();
        write(
            &dir,
            "etc/os-release",
            "NAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\nVERSION_ID=\"20.04\"\n",
        );
        write(&dir, "etc/debian_version", "bullseye/sid\n");

        let runner = MockRunner::new();
        let env = detect(&ctx, &runner);
        assert_eq!(env, HostEnvironment::new("ubuntu", "20.04"));
        assert_eq!(env.major_version, "20");
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_id_is_lowercased() {
        let (dir, ctx) = host_root();
        write(&dir, "etc/os-release", "ID=CentOS\nVERSION_ID='8'\n");
        let env = detect(&ctx, &MockRunner::new());
        assert_eq!(env.distribution_id, "centos");
        assert_eq!(env.family(), DistroFamily::Rhel);
    }

    #[test]
    fn test_lsb_release_command_before_files() {
        let (dir, ctx) = host_root();
        write(&dir, "etc/debian_version", "10.13\n");

        let runner = MockRunner::new();
        runner.respond("lsb_release -si", CommandOutput::ok("Debian\n"));
        runner.respond("lsb_release -sr", CommandOutput::ok("10\n"));

        let env = detect(&ctx, &runner);
        assert_eq!(env.distribution_id, "debian");
        assert_eq!(env.major_version, "10");
    }

    #[test]
    fn test_lsb_release_file() {
        let (dir, ctx) = host_root();
        write(
            &dir,
            "etc/lsb-release",
            "DISTRIB_ID=Ubuntu\nDISTRIB_RELEASE=18.04\nDISTRIB_CODENAME=bionic\n",
        );
        let env = detect(&ctx, &MockRunner::new());
        assert_eq!(env, HostEnvironment::new("ubuntu", "18.04"));
    }

    #[test]
    fn test_debian_version_file() {
        let (dir, ctx) = host_root();
        write(&dir, "etc/debian_version", "9.13\n");
        let env = detect(&ctx, &MockRunner::new());
        assert_eq!(env.distribution_id, "debian");
        assert_eq!(env.major_version, "9");
    }

    #[test]
    fn test_redhat_release_banner() {
        let (dir, ctx) = host_root();
        write(&dir, "etc/redhat-release", "CentOS Linux release 7.9.2009 (Core)\n");
        let env = detect(&ctx, &MockRunner::new());
        assert_eq!(env.distribution_id, "centos");
        assert_eq!(env.distribution_version, "7.9.2009");
        assert_eq!(env.major_version, "7");
    }

    #[test]
    fn test_suse_release_banner() {
        let (dir, ctx) = host_root();
        write(&dir, "etc/SuSe-release", "SUSE Linux Enterprise Server 12 (x86_64)\n");
        let env = detect(&ctx, &MockRunner::new());
        assert_eq!(env.distribution_id, "suse");
        assert_eq!(env.major_version, "12");
    }

    #[test]
    fn test_empty_os_release_id_falls_through() {
        let (dir, ctx) = host_root();
        write(&dir, "etc/os-release", "NAME=Mystery\n");
        write(&dir, "etc/debian_version", "10.1\n");
        let env = detect(&ctx, &MockRunner::new());
        assert_eq!(env.distribution_id, "debian");
    }

    #[test]
    fn test_kernel_fallback() {
        let (_dir, ctx) = host_root();
        let runner = MockRunner::new();
        runner.respond("uname -s", CommandOutput::ok("Linux\n"));
        runner.respond("uname -r", CommandOutput::ok("5.15.0-91-generic\n"));

        let env = detect(&ctx, &runner);
        assert_eq!(env.distribution_id, "linux");
        assert_eq!(env.major_version, "5");
    }

    #[test]
    fn test_total_even_without_uname() {
        let (_dir, ctx) = host_root();
        let runner = MockRunner::new();
        runner.respond("uname", CommandOutput::failed(127, "not found"));
        runner.respond("uname", CommandOutput::failed(127, "not found"));

        let env = detect(&ctx, &runner);
        assert!(!env.distribution_id.is_empty());
        assert!(!env.major_version.is_empty());
    }

    #[test]
    fn test_family_service_names() {
        assert_eq!(DistroFamily::of("ubuntu").cache_service(), "redis-server");
        assert_eq!(DistroFamily::of("debian").cache_service(), "redis-server");
        assert_eq!(DistroFamily::of("centos").cache_service(), "redis");
    }
}

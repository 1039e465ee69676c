//! Colored output for ptero-uninstall
//!
//! Uses owo-colors for terminal colors. Status goes to stdout, warnings and
//! errors to stderr.

use owo_colors::OwoColorize;

/// Print an action header (blue, bold)
/// Example: "==> Removing panel files"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a sub-action (cyan arrow)
/// Example: "  -> systemctl disable --now pteroq"
pub fn sub_action(message: &str) {
    println!("  {} {}", "->".cyan(), message);
}

/// Print a detail line (dimmed)
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print a success message (green)
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Print a skip message (dimmed)
/// Example: "==> no crontab installed, skipping"
pub fn skip(message: &str) {
    println!("{} {}", "==>".dimmed(), message.dimmed());
}

/// Print one selection flag of the pre-teardown summary.
pub fn summary_flag(label: &str, enabled: bool) {
    let value = if enabled {
        "true".green().to_string()
    } else {
        "false".dimmed().to_string()
    };
    println!("  {:<16} {}", label, value);
}

/// Print a candidate in a list the operator picks from.
pub fn list_item(name: &str) {
    println!("  {} {}", "-".cyan(), name);
}

/// Print a horizontal rule.
pub fn rule() {
    println!("{}", "-".repeat(70).dimmed());
}

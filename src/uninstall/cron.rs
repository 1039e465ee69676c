//! Removal of the panel's scheduler entry from root's crontab.

use crate::core::output;
use crate::core::runner::Cmd;

use super::Teardown;

/// Line the installer adds to run the panel scheduler every minute.
pub const SCHEDULE_LINE: &str =
    "* * * * * php /var/www/pterodactyl/artisan schedule:run >> /dev/null 2>&1";

/// Drop every line exactly equal to [`SCHEDULE_LINE`]; keep everything else.
///
/// Returns `None` if no line matched.
pub fn strip_schedule(crontab: &str) -> Option<String> {
    let mut kept = Vec::new();
    let mut matched = false;

    for line in crontab.lines() {
        if line.trim_end_matches('\r') == SCHEDULE_LINE {
            matched = true;
        } else {
            kept.push(line);
        }
    }

    if !matched {
        return None;
    }

    let mut out = kept.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    Some(out)
}

/// Remove the scheduler entry, rewriting the crontab only if it changes.
pub fn remove_schedule(td: &mut Teardown<'_>) {
    output::action("Removing cron jobs");

    let listing = match td.runner().run(&Cmd::new("crontab").arg("-l")) {
        Ok(out) if out.success() => out.stdout,
        Ok(_) => {
            output::skip("no crontab installed, skipping");
            return;
        }
        Err(e) => {
            td.warn(&format!("could not read crontab: {}", e));
            return;
        }
    };

    match strip_schedule(&listing) {
        Some(remaining) => {
            td.exec(Cmd::new("crontab").arg("-").stdin(remaining));
        }
        None => output::skip("panel schedule not in crontab, skipping"),
    }
}

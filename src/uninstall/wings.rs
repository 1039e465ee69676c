//! Wings daemon teardown.

use crate::core::output;

use super::layout::{WINGS_BIN, WINGS_CONFIG_DIR, WINGS_DATA_DIR};
use super::Teardown;

/// Remove the daemon's config directory, binary and data directory.
pub fn remove(td: &mut Teardown<'_>) {
    output::action("Removing Wings files");
    td.remove(WINGS_CONFIG_DIR);
    td.remove(WINGS_BIN);
    td.remove(WINGS_DATA_DIR);
}

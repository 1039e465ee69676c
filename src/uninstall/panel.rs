//! Panel file and service teardown.

use crate::core::output;
use crate::core::runner::Cmd;
use crate::host::{DistroFamily, HostEnvironment};

use super::layout::{
    COMPOSER_BIN, NGINX_CONF_D, NGINX_SITE_AVAILABLE, NGINX_SITE_ENABLED, PANEL_DIR,
    PHP_FPM_POOL, PTEROQ_UNIT,
};
use super::Teardown;

/// Queue worker unit installed alongside the panel.
pub const QUEUE_SERVICE: &str = "pteroq";
/// Database server backing the panel.
pub const DATABASE_SERVICE: &str = "mariadb";
/// PHP FastCGI manager, only set up separately on RHEL-family hosts.
pub const PHP_FPM_SERVICE: &str = "php-fpm";
pub const WEB_SERVER: &str = "nginx";

/// Remove the panel tree, composer and the nginx site.
pub fn remove_files(td: &mut Teardown<'_>, host: &HostEnvironment) {
    output::action("Removing panel files");
    td.remove(PANEL_DIR);
    td.remove(COMPOSER_BIN);

    match host.family() {
        DistroFamily::Rhel => td.remove(NGINX_CONF_D),
        DistroFamily::Debian => {
            td.remove(NGINX_SITE_ENABLED);
            td.remove(NGINX_SITE_AVAILABLE);
        }
    }

    td.exec(Cmd::new("systemctl").args(["restart", WEB_SERVER]));
}

/// Stop and disable the panel's services and drop their unit/pool files.
///
/// The database server keeps running; see [`stop_database`].
pub fn remove_services(td: &mut Teardown<'_>, host: &HostEnvironment) {
    output::action("Removing panel services");
    let family = host.family();

    td.disable_service(QUEUE_SERVICE);
    td.remove(PTEROQ_UNIT);
    td.disable_service(family.cache_service());

    if family == DistroFamily::Rhel {
        td.disable_service(PHP_FPM_SERVICE);
        td.remove(PHP_FPM_POOL);
    }

    td.exec(Cmd::new("systemctl").arg("daemon-reload"));
}

/// Stop and disable the database server.
///
/// Must run after database teardown, which needs the server up.
pub fn stop_database(td: &mut Teardown<'_>) {
    td.disable_service(DATABASE_SERVICE);
}

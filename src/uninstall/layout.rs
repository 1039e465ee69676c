//! Filesystem paths owned by the panel and the Wings daemon.
//!
//! The absolute paths must match what the installer creates. They are
//! resolved under a root directory so a run can target a staged tree.

use std::path::{Path, PathBuf};

use crate::core::context::Context;

pub const PANEL_DIR: &str = "/var/www/pterodactyl";
pub const COMPOSER_BIN: &str = "/usr/local/bin/composer";
pub const NGINX_SITE_ENABLED: &str = "/etc/nginx/sites-enabled/pterodactyl.conf";
pub const NGINX_SITE_AVAILABLE: &str = "/etc/nginx/sites-available/pterodactyl.conf";
pub const NGINX_CONF_D: &str = "/etc/nginx/conf.d/pterodactyl.conf";
pub const PTEROQ_UNIT: &str = "/etc/systemd/system/pteroq.service";
pub const PHP_FPM_POOL: &str = "/etc/php-fpm.d/www-pterodactyl.conf";

pub const WINGS_CONFIG_DIR: &str = "/etc/pterodactyl";
pub const WINGS_BIN: &str = "/usr/local/bin/wings";
pub const WINGS_DATA_DIR: &str = "/var/lib/pterodactyl";

/// Managed paths resolved under a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Managed paths for a run, rooted at `ctx.root`.
    pub fn of(ctx: &Context) -> Self {
        Self::new(&ctx.root)
    }

    /// Resolve an absolute managed path under the root.
    pub fn resolve(&self, absolute: &str) -> PathBuf {
        self.root.join(absolute.trim_start_matches('/'))
    }

    pub fn panel_dir(&self) -> PathBuf {
        self.resolve(PANEL_DIR)
    }

    pub fn wings_config_dir(&self) -> PathBuf {
        self.resolve(WINGS_CONFIG_DIR)
    }
}

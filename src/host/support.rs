//! OS compatibility table.

use super::detect::HostEnvironment;
use crate::core::error::UninstallError;

/// Distributions and major versions the panel installer supports.
pub const SUPPORTED: &[(&str, &[&str])] = &[
    ("ubuntu", &["18", "20"]),
    ("debian", &["9", "10"]),
    ("centos", &["7", "8"]),
];

/// Look up `(distribution, major)` in [`SUPPORTED`].
pub fn is_supported(env: &HostEnvironment) -> bool {
    SUPPORTED.iter().any(|(id, majors)| {
        *id == env.distribution_id && majors.contains(&env.major_version.as_str())
    })
}

/// Fail with [`UninstallError::UnsupportedOs`] outside the table.
pub fn ensure_supported(env: &HostEnvironment) -> Result<(), UninstallError> {
    if is_supported(env) {
        return Ok(());
    }
    Err(UninstallError::UnsupportedOs {
        id: env.distribution_id.clone(),
        version: env.distribution_version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_is_supported() {
        for (id, majors) in SUPPORTED {
            for major in *majors {
                let env = HostEnvironment::new(*id, format!("{}.04", major));
                assert!(is_supported(&env), "{} {} should be supported", id, major);
                assert!(ensure_supported(&env).is_ok());
            }
        }
    }

    #[test]
    fn test_unlisted_pairs_are_rejected() {
        for (id, version) in [
            ("ubuntu", "22.04"),
            ("ubuntu", "16.04"),
            ("debian", "11"),
            ("centos", "9"),
            ("fedora", "20"),
            ("arch", "unknown"),
        ] {
            let env = HostEnvironment::new(id, version);
            assert!(!is_supported(&env), "{} {} should be unsupported", id, version);
            assert!(matches!(
                ensure_supported(&env),
                Err(UninstallError::UnsupportedOs { .. })
            ));
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Where `settings.toml` and `state.cbor` live.
//!
//! A directory is picked from the first source that yields one: the
//! explicit override (from `--config-dir`/`--data-dir` or a test), the
//! `BIZDESK_CONFIG_DIR`/`BIZDESK_DATA_DIR` environment variable, then the
//! platform directory from `dirs` with a `Bizdesk` subfolder.

use std::path::PathBuf;

/// Subfolder created under the platform directories.
const APP_NAME: &str = "Bizdesk";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "BIZDESK_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "BIZDESK_CONFIG_DIR";

/// The two directories the application writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    /// Holds `settings.toml`.
    Config,
    /// Holds `state.cbor`.
    Data,
}

impl AppDir {
    /// Environment variable that relocates this directory.
    #[must_use]
    pub fn env_var(self) -> &'static str {
        match self {
            AppDir::Config => ENV_CONFIG_DIR,
            AppDir::Data => ENV_DATA_DIR,
        }
    }

    fn platform_base(self) -> Option<PathBuf> {
        match self {
            AppDir::Config => dirs::config_dir(),
            AppDir::Data => dirs::data_dir(),
        }
    }

    /// Resolves the directory, reading the process environment.
    #[must_use]
    pub fn resolve(self, override_dir: Option<PathBuf>) -> Option<PathBuf> {
        self.resolve_with(override_dir, |var| std::env::var(var).ok())
    }

    /// Resolves the directory with a caller-supplied environment lookup.
    ///
    /// An empty variable counts as unset.
    pub fn resolve_with<F>(self, override_dir: Option<PathBuf>, lookup: F) -> Option<PathBuf>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if override_dir.is_some() {
            return override_dir;
        }
        if let Some(value) = lookup(self.env_var()).filter(|value| !value.is_empty()) {
            return Some(PathBuf::from(value));
        }
        self.platform_base().map(|base| base.join(APP_NAME))
    }
}

/// Returns the data directory (session state lives here).
#[must_use]
pub fn get_app_data_dir(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Data.resolve(override_dir)
}

/// Returns the config directory (`settings.toml` lives here).
#[must_use]
pub fn get_app_config_dir(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Config.resolve(override_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn override_beats_environment() {
        let dir = AppDir::Data.resolve_with(Some(PathBuf::from("/flag/data")), |_| {
            Some("/env/data".to_string())
        });
        assert_eq!(dir, Some(PathBuf::from("/flag/data")));
    }

    #[test]
    fn environment_is_read_per_directory() {
        let lookup = |var: &str| match var {
            ENV_CONFIG_DIR => Some("/env/config".to_string()),
            ENV_DATA_DIR => Some("/env/data".to_string()),
            _ => None,
        };
        assert_eq!(
            AppDir::Config.resolve_with(None, lookup),
            Some(PathBuf::from("/env/config"))
        );
        assert_eq!(
            AppDir::Data.resolve_with(None, lookup),
            Some(PathBuf::from("/env/data"))
        );
    }

    #[test]
    fn empty_variable_falls_back_to_platform_dir() {
        let from_empty = AppDir::Config.resolve_with(None, |_| Some(String::new()));
        assert_eq!(from_empty, AppDir::Config.resolve_with(None, no_env));
    }

    #[test]
    fn platform_dirs_end_with_app_name() {
        for dir in [AppDir::Config, AppDir::Data] {
            if let Some(path) = dir.resolve_with(None, no_env) {
                assert!(path.ends_with(APP_NAME));
            }
        }
    }

    #[test]
    fn public_helpers_honor_override() {
        let dir = PathBuf::from("/tmp/bizdesk-test");
        assert_eq!(get_app_data_dir(Some(dir.clone())), Some(dir.clone()));
        assert_eq!(get_app_config_dir(Some(dir.clone())), Some(dir));
    }
}

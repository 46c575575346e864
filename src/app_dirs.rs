//! Per-user application directories for configuration, data and cache.
//!
//! Paths follow the platform convention:
//! - `xdg`: [XDG Base Directory Specification](https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html),
//!   honoring `XDG_DATA_HOME`, `XDG_CONFIG_HOME` and `XDG_CACHE_HOME`
//! - `mac`: `~/Library/{Application Support,Preferences,Caches}/<app>`
//! - `windows`: `%LOCALAPPDATA%` and `%APPDATA%`, falling back to `~/AppData`
//!
//! Meant for workstation use, not servers.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Which convention was used to compute the paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    Xdg,
    Mac,
    Windows,
}

impl Convention {
    /// Convention of the platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Convention::Mac
        } else if cfg!(windows) {
            Convention::Windows
        } else {
            Convention::Xdg
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Convention::Xdg => "xdg",
            Convention::Mac => "mac",
            Convention::Windows => "windows",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppDirs {
    /// User data
    pub data: PathBuf,
    /// User configuration
    pub config: PathBuf,
    /// Non-essential data
    pub cache: PathBuf,
    pub convention: Convention,
}

impl AppDirs {
    /// Resolve directories for `app_name` using the platform convention.
    ///
    /// Returns `None` when the home directory cannot be determined.
    pub fn for_app(app_name: &str) -> Option<Self> {
        Self::with_convention(app_name, Convention::current())
    }

    pub fn with_convention(app_name: &str, convention: Convention) -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::resolve(app_name, convention, &home, |key| {
            std::env::var(key).ok()
        }))
    }

    /// Default settings file inside the config directory.
    pub fn settings_file(&self) -> PathBuf {
        self.config.join("settings.toml")
    }

    fn resolve(
        app_name: &str,
        convention: Convention,
        home: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        // Empty variables count as unset
        let env_dir = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        match convention {
            Convention::Mac => {
                let library = home.join("Library");
                Self {
                    data: library.join("Application Support").join(app_name),
                    config: library.join("Preferences").join(app_name),
                    cache: library.join("Caches").join(app_name),
                    convention,
                }
            }
            Convention::Windows => {
                let roaming =
                    env_dir("APPDATA").unwrap_or_else(|| home.join("AppData").join("Roaming"));
                let local =
                    env_dir("LOCALAPPDATA").unwrap_or_else(|| home.join("AppData").join("Local"));
                Self {
                    data: local.join(app_name).join("Data"),
                    config: roaming.join(app_name),
                    cache: local.join(app_name).join("Cache"),
                    convention,
                }
            }
            Convention::Xdg => {
                let data =
                    env_dir("XDG_DATA_HOME").unwrap_or_else(|| home.join(".local").join("share"));
                let config = env_dir("XDG_CONFIG_HOME").unwrap_or_else(|| home.join(".config"));
                let cache = env_dir("XDG_CACHE_HOME").unwrap_or_else(|| home.join(".cache"));
                Self {
                    data: data.join(app_name),
                    config: config.join(app_name),
                    cache: cache.join(app_name),
                    convention,
                }
            }
        }
    }
}

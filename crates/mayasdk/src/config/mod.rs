//! Locator configuration.
//!
//! Values come from, highest precedence first: explicit builder calls, the
//! environment, an optional settings file, and finally the platform defaults.

pub mod ini;

use std::path::PathBuf;

use thiserror::Error;

use crate::platform::Platform;
use crate::version::SdkVersion;

pub use ini::IniFile;

/// Devkit version to locate.
pub const ENV_VERSION: &str = "MAYA_VERSION";
/// Directory containing one or more `maya<version>` installs.
pub const ENV_INSTALL_BASE: &str = "MAYA_INSTALL_BASE_PATH";
/// Direct path to a Maya install, probed after the configured location.
pub const ENV_LOCATION: &str = "MAYA_LOCATION";
/// Path to a settings file overriding the per-user default.
pub const ENV_CONFIG: &str = "MAYASDK_CONFIG";

/// Every environment variable the locator reads.
pub const WATCHED_ENV_VARS: &[&str] = &[ENV_VERSION, ENV_INSTALL_BASE, ENV_LOCATION, ENV_CONFIG];

const SETTINGS_SECTION: &str = "Maya";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Inputs to the devkit locator.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub platform: Platform,
    pub version: Option<SdkVersion>,
    /// Root containing `maya<version>` directories; platform default when unset.
    pub install_base: Option<PathBuf>,
    /// Install probed after the configured location (usually `$MAYA_LOCATION`).
    pub location_override: Option<PathBuf>,
}

impl LocatorConfig {
    /// Empty configuration for `platform`; every value falls back to defaults.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            version: None,
            install_base: None,
            location_override: None,
        }
    }

    /// Configuration from the process environment.
    ///
    /// In a build script the platform follows Cargo's `TARGET`, otherwise the host.
    pub fn from_env() -> Result<Self, ConfigError> {
        let platform = std::env::var("TARGET")
            .map(|t| Platform::from_target(&t))
            .unwrap_or_else(|_| Platform::host());
        Self::from_lookup(platform, |key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary variable lookup, then the settings file.
    pub fn from_lookup<F>(platform: Platform, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(platform);
        config.version = non_empty(ENV_VERSION).and_then(|v| SdkVersion::parse(&v));
        config.install_base = non_empty(ENV_INSTALL_BASE).map(PathBuf::from);
        config.location_override = non_empty(ENV_LOCATION).map(PathBuf::from);

        let settings_path = match non_empty(ENV_CONFIG) {
            Some(path) => Some(PathBuf::from(path)),
            None => default_settings_path().filter(|p| p.is_file()),
        };

        if let Some(path) = settings_path {
            tracing::debug!("Reading devkit settings from {}", path.display());
            config = config.merge_settings(&IniFile::read(&path)?);
        }

        Ok(config)
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = SdkVersion::parse(&version.into());
        self
    }

    pub fn with_install_base(mut self, path: impl Into<PathBuf>) -> Self {
        self.install_base = Some(path.into());
        self
    }

    pub fn with_location_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.location_override = Some(path.into());
        self
    }

    /// Fill values still unset from the `[Maya]` section of a settings file.
    pub fn merge_settings(mut self, ini: &IniFile) -> Self {
        let get = |key: &str| {
            ini.get(SETTINGS_SECTION, key)
                .filter(|v| !v.trim().is_empty())
        };

        if self.version.is_none() {
            self.version = get("version").and_then(SdkVersion::parse);
        }
        if self.install_base.is_none() {
            self.install_base = get("installBase").map(PathBuf::from);
        }
        if self.location_override.is_none() {
            self.location_override = get("location").map(PathBuf::from);
        }
        self
    }

    pub fn install_base(&self) -> PathBuf {
        self.install_base
            .clone()
            .unwrap_or_else(|| self.platform.default_install_base())
    }

    /// `<install base>/maya<version>[suffix]`, or `None` while the version is unset.
    pub fn maya_location(&self) -> Option<PathBuf> {
        let version = self.version.as_ref()?;
        Some(
            self.install_base()
                .join(self.platform.location_dir_name(version)),
        )
    }
}

/// Per-user settings file (`~/.config/mayasdk/settings.ini`).
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mayasdk").join("settings.ini"))
}

//! Configuration for menu-locale.
//!
//! Sources, lowest precedence first:
//! - Defaults
//! - User config: `~/.config/menu-locale/config.yaml`
//! - Project config: `.menu-locale.yaml` in the current directory
//! - An explicit `--config` file
//! - Environment variables: `MENU_LOCALE_*`
//! - Command-line flags (applied by the caller)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::{CacheSettings, UpdatePolicy};
use crate::error::{Error, Result};
use crate::identifiers::IdentifierSet;
use crate::ipc::DEFAULT_ADDRESS;
use crate::locales::{
    CANDIDATE_LANGUAGES, DEFAULT_LANGUAGE, DEFAULT_LOCALES_DIR, RESOURCE_FILES, normalize_language,
};

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = ".menu-locale.yaml";

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Language passed to `init`.
    #[serde(default = "default_language")]
    pub language: String,

    /// Locale resources.
    #[serde(default)]
    pub locales: LocalesConfig,

    /// IPC settings.
    #[serde(default)]
    pub ipc: IpcConfig,

    /// How overlapping `init` batches are applied.
    #[serde(default)]
    pub policy: UpdatePolicy,
}

/// Where resources live and which are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalesConfig {
    /// Directory with one subdirectory per language.
    #[serde(default = "default_locales_dir")]
    pub dir: PathBuf,

    /// Candidate languages in preference order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,

    /// Resource file names read per language.
    #[serde(default = "default_files")]
    pub files: Vec<String>,

    /// Identifier override; the menu identifier set when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<Vec<String>>,
}

/// IPC settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpcConfig {
    /// Coordinator address.
    #[serde(default = "default_address")]
    pub address: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_locales_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOCALES_DIR)
}

fn default_candidates() -> Vec<String> {
    CANDIDATE_LANGUAGES.iter().map(ToString::to_string).collect()
}

fn default_files() -> Vec<String> {
    RESOURCE_FILES.iter().map(ToString::to_string).collect()
}

fn default_address() -> String {
    DEFAULT_ADDRESS.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            locales: LocalesConfig::default(),
            ipc: IpcConfig::default(),
            policy: UpdatePolicy::default(),
        }
    }
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            dir: default_locales_dir(),
            candidates: default_candidates(),
            files: default_files(),
            identifiers: None,
        }
    }
}

impl Default for IpcConfig {
    fn default() -> Self {
        Self { address: default_address() }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::user_config_path()
            && path.exists()
        {
            config.merge(Self::load_from_file(&path)?);
        }

        let project_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if project_path.exists() {
            config.merge(Self::load_from_file(&project_path)?);
        }

        if let Some(path) = explicit {
            config.merge(Self::load_from_file(path)?);
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let mut config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            Error::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;
        config.language = normalize_language(&config.language);
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence where it
    /// differs from the defaults).
    fn merge(&mut self, other: Self) {
        if other.language != default_language() {
            self.language = other.language;
        }
        if other.locales.dir != default_locales_dir() {
            self.locales.dir = other.locales.dir;
        }
        if other.locales.candidates != default_candidates() {
            self.locales.candidates = other.locales.candidates;
        }
        if other.locales.files != default_files() {
            self.locales.files = other.locales.files;
        }
        if other.locales.identifiers.is_some() {
            self.locales.identifiers = other.locales.identifiers;
        }
        if other.ipc.address != default_address() {
            self.ipc.address = other.ipc.address;
        }
        if other.policy != UpdatePolicy::default() {
            self.policy = other.policy;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(language) = std::env::var("MENU_LOCALE_LANGUAGE")
            && !language.is_empty()
        {
            self.language = normalize_language(&language);
        }
        if let Ok(dir) = std::env::var("MENU_LOCALE_LOCALES_DIR")
            && !dir.is_empty()
        {
            self.locales.dir = PathBuf::from(dir);
        }
        if let Ok(address) = std::env::var("MENU_LOCALE_ADDRESS")
            && !address.is_empty()
        {
            self.ipc.address = address;
        }
    }

    /// Settings for a [`TranslationCache`](crate::cache::TranslationCache).
    pub fn cache_settings(&self) -> CacheSettings {
        let identifiers = self
            .locales
            .identifiers
            .as_ref()
            .map_or_else(IdentifierSet::menu, |ids| IdentifierSet::new(ids.iter().cloned()));

        CacheSettings::builder()
            .locales_dir(self.locales.dir.clone())
            .candidate_languages(self.locales.candidates.clone())
            .resource_files(self.locales.files.clone())
            .default_language(DEFAULT_LANGUAGE)
            .identifiers(identifiers)
            .policy(self.policy)
            .build()
    }

    /// Get the path to the user config file.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.yaml"))
    }

    /// Get the path to the user config directory.
    ///
    /// - If `XDG_CONFIG_HOME` is set, uses `$XDG_CONFIG_HOME/menu-locale`
    /// - Linux/macOS: Falls back to `~/.config/menu-locale`
    /// - Windows: Falls back to `%APPDATA%\menu-locale`
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(PathBuf::from(xdg_config).join("menu-locale"));
        }

        #[cfg(windows)]
        {
            dirs::config_dir().map(|p| p.join("menu-locale"))
        }

        #[cfg(not(windows))]
        {
            dirs::home_dir().map(|p| p.join(".config").join("menu-locale"))
        }
    }
}

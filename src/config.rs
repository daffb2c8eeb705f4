//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/genreguide/genreguide.toml`
//! 3. Local config: `<dir>/.genreguide.toml` (working directory by default)
//! 4. Environment variables: `GENREGUIDE_<SECTION>__<KEY>`

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// How a parsed expression is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tree
    #[default]
    Tree,
    /// Nested-array JSON, as stored by the catalog
    Json,
    /// Flattened tokens
    Flat,
    /// Canonical expression text with explicit parentheses
    Text,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Default format for `parse`
    pub format: OutputFormat,
    /// Colored terminal output (NO_COLOR still wins)
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Tree,
            color: true,
        }
    }
}

/// Catalog pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogSettings {
    /// Rewrite ambiguous leading subgenres using the track's genre column
    pub qualify: bool,
    /// Stop at the first record that fails to parse
    pub fail_fast: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            qualify: true,
            fail_fast: false,
        }
    }
}

/// Raw output settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputSettings {
    pub format: Option<OutputFormat>,
    pub color: Option<bool>,
}

/// Raw catalog settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCatalogSettings {
    pub qualify: Option<bool>,
    pub fail_fast: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub output: RawOutputSettings,
    pub catalog: RawCatalogSettings,
}

/// Unified configuration for genreguide.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub catalog: CatalogSettings,
}

/// Get the XDG config directory for genreguide.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "genreguide").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("genreguide.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".genreguide.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            output: OutputSettings {
                format: overlay.output.format.unwrap_or(self.output.format),
                color: overlay.output.color.unwrap_or(self.output.color),
            },
            catalog: CatalogSettings {
                qualify: overlay.catalog.qualify.unwrap_or(self.catalog.qualify),
                fail_fast: overlay.catalog.fail_fast.unwrap_or(self.catalog.fail_fast),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory holding `.genreguide.toml` (skipped when `None`)
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        let local = local_dir.map(local_config_path);
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load settings from explicit file locations; missing files are skipped.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. and 3. Files, global first so the local file overrides it
        for path in [global, local].into_iter().flatten() {
            if path.exists() {
                debug!("loading config {}", path.display());
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables as explicit overrides
        Self::apply_env_overrides(current)
    }

    /// Apply GENREGUIDE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GENREGUIDE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<OutputFormat>("output.format") {
            settings.output.format = val;
        }
        if let Ok(val) = config.get_bool("output.color") {
            settings.output.color = val;
        }
        if let Ok(val) = config.get_bool("catalog.qualify") {
            settings.catalog.qualify = val;
        }
        if let Ok(val) = config.get_bool("catalog.fail_fast") {
            settings.catalog.fail_fast = val;
        }

        Ok(settings)
    }

    /// Render the merged settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

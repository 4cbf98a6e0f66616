//! `formkit.toml` settings.
//!
//! Settings are read from `--config` when given, otherwise from the user's
//! config directory. A missing default file means built-in defaults.
//!
//! ```toml
//! [diff]
//! excluded_keys = ["updatedAt", "__typename"]
//! line_collection = "lines"
//!
//! [normalize]
//! disabled_rules = ["channels"]
//!
//! [[normalize.extra_rules]]
//! source_key = "taxCategory"
//! target_key = "taxCategoryId"
//! shape = "single-id"
//!
//! [output]
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use formkit_diff::DiffOptions;
use formkit_normalize::{EntityNormalizer, NormalizationRule};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "formkit.toml";

/// Root of `formkit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub diff: DiffOptions,
    pub normalize: NormalizeSettings,
    pub output: OutputSettings,
}

/// Adjustments to the built-in normalization table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeSettings {
    /// Rules appended after the built-in table.
    pub extra_rules: Vec<NormalizationRule>,
    /// Source keys whose rules are skipped.
    pub disabled_rules: Vec<String>,
}

impl NormalizeSettings {
    pub fn normalizer(&self) -> EntityNormalizer {
        let mut normalizer = self
            .extra_rules
            .iter()
            .cloned()
            .fold(EntityNormalizer::default(), EntityNormalizer::with_rule);
        for source_key in &self.disabled_rules {
            normalizer.disable_rule(source_key);
        }
        normalizer
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Settings {
    /// Load from `explicit` if given (it must exist), else from the default
    /// location if a file is there, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(settings)
    }

    /// Default config file location in the user's config directory.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "formkit", "formkit")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

//! TOML configuration (`typedframes-checker.toml`).
//!
//! Mirrors the teacher's config-as-struct-with-defaults pattern: every
//! field has a sensible default so an absent file, or a file missing a
//! section, still produces a usable `Config`.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub rules: RulesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// If false, suppress `untracked-dataframe` warnings.
    pub strict_ingest: bool,
    /// Drop all warning-severity diagnostics before return.
    pub no_warnings: bool,
    /// Skip cross-file resolution; all imported symbols resolve to `Unknown`.
    pub use_index: bool,
    /// Which dialect's reserved-name table to prefer when a class's base
    /// list is ambiguous between dialect A and dialect B conventions.
    /// Ambient addition — silent in spec.md, supplements it.
    pub default_dialect_hint: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strict_ingest: false,
            no_warnings: false,
            use_index: true,
            default_dialect_hint: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Github,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Diagnostic codes to drop before returning, e.g. `["untracked-dataframe"]`.
    pub disabled: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_index_and_is_not_strict() {
        let cfg = Config::default();
        assert!(cfg.analysis.use_index);
        assert!(!cfg.analysis.strict_ingest);
        assert!(!cfg.analysis.no_warnings);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("[analysis]\nstrict_ingest = true\n").unwrap();
        assert!(cfg.analysis.strict_ingest);
        assert!(cfg.analysis.use_index);
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }

    #[test]
    fn rules_disabled_defaults_empty() {
        let cfg = Config::default();
        assert!(cfg.rules.disabled.is_empty());
    }
}

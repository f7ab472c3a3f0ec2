//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{DrillError, Result};

/// Full kfd configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub scenario: ScenarioConfig,
    pub paths: PathsConfig,
}

/// Names and defaults that shape the baseline document set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Namespace every manifest lands in.
    pub namespace: String,
    /// Name shared by the workload, service, and pod label value.
    pub app_name: String,
    /// Name of the persistent volume claim.
    pub claim_name: String,
    /// Difficulty used when the CLI does not pass one.
    pub default_difficulty: String,
}

/// Filesystem paths used by kfd.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
    /// Directory the faulty manifests and brief are rendered into.
    pub rendered_dir: PathBuf,
    pub jsonl_log: PathBuf,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            namespace: "kbox".to_string(),
            app_name: "app".to_string(),
            claim_name: "app-pvc".to_string(),
            default_difficulty: "easy".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!("[KFD-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths");
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        let cfg = home_dir.join(".config").join("kfd").join("config.toml");
        let data = home_dir.join(".local").join("share").join("kfd");
        Self {
            config_file: cfg,
            rendered_dir: PathBuf::from("challenges").join("rendered"),
            jsonl_log: data.join("activity.jsonl"),
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from the default path;
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| DrillError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(DrillError::InvalidConfig {
                details: format!("config file not found: {}", path_buf.display()),
            });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        set_env_string("KFD_NAMESPACE", &mut self.scenario.namespace);
        set_env_string("KFD_APP_NAME", &mut self.scenario.app_name);
        set_env_string("KFD_CLAIM_NAME", &mut self.scenario.claim_name);
        set_env_string(
            "KFD_DEFAULT_DIFFICULTY",
            &mut self.scenario.default_difficulty,
        );
        set_env_path("KFD_RENDERED_DIR", &mut self.paths.rendered_dir);
        set_env_path("KFD_JSONL_LOG", &mut self.paths.jsonl_log);
    }

    /// Validate cross-field invariants the catalog depends on.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("scenario.namespace", &self.scenario.namespace),
            ("scenario.app_name", &self.scenario.app_name),
            ("scenario.claim_name", &self.scenario.claim_name),
        ] {
            if value.trim().is_empty() {
                return Err(DrillError::InvalidConfig {
                    details: format!("{field} must not be empty"),
                });
            }
            if !is_dns_label_like(value) {
                return Err(DrillError::InvalidConfig {
                    details: format!(
                        "{field} must be a lowercase DNS-label-like name, got {value:?}"
                    ),
                });
            }
        }
        crate::scenario::select::Difficulty::parse(&self.scenario.default_difficulty).ok_or_else(
            || DrillError::InvalidConfig {
                details: format!(
                    "scenario.default_difficulty must be easy|medium|hard, got {:?}",
                    self.scenario.default_difficulty
                ),
            },
        )?;
        Ok(())
    }
}

fn set_env_string(key: &str, target: &mut String) {
    if let Ok(raw) = env::var(key) {
        if !raw.trim().is_empty() {
            *target = raw;
        }
    }
}

fn set_env_path(key: &str, target: &mut PathBuf) {
    if let Some(raw) = env::var_os(key) {
        if !raw.is_empty() {
            *target = PathBuf::from(raw);
        }
    }
}

/// Loose check for the RFC 1123 label shape Kubernetes object names require.
fn is_dns_label_like(value: &str) -> bool {
    value.len() <= 63
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !value.starts_with('-')
        && !value.ends_with('-')
}

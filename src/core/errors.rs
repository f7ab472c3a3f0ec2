//! KFD-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, DrillError>;

/// Top-level error type for kube_fault_drill.
#[derive(Debug, Error)]
pub enum DrillError {
    #[error("[KFD-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[KFD-1002] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error(
        "[KFD-2001] catalog drift for fault '{fault}': {document} is missing '{pointer}' \
         guaranteed by the baseline contract"
    )]
    CatalogDrift {
        fault: &'static str,
        document: &'static str,
        pointer: &'static str,
    },

    #[error("[KFD-2002] selection requested {requested} faults but the catalog holds {available}")]
    SelectionConstraint { requested: usize, available: usize },

    #[error("[KFD-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[KFD-3001] rendered scenario at {dir} is missing required manifest '{manifest}'")]
    MissingDocument { dir: PathBuf, manifest: &'static str },

    #[error("[KFD-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DrillError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "KFD-1001",
            Self::ConfigParse { .. } => "KFD-1002",
            Self::CatalogDrift { .. } => "KFD-2001",
            Self::SelectionConstraint { .. } => "KFD-2002",
            Self::Serialization { .. } => "KFD-2101",
            Self::MissingDocument { .. } => "KFD-3001",
            Self::Io { .. } => "KFD-3002",
        }
    }

    /// Whether the failure points at operator input rather than internal drift.
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::ConfigParse { .. }
                | Self::SelectionConstraint { .. }
                | Self::MissingDocument { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for DrillError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for DrillError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Serialization {
            context: "serde_yaml",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for DrillError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

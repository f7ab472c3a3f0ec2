//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use kube_fault_drill::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{DrillError, Result};

// Catalog
pub use crate::catalog::{CATALOG, FaultId, FaultSpec};

// Manifest model
pub use crate::manifest::{DocKind, DocumentSet, ManifestDoc, baseline_set};

// Scenario engines
pub use crate::scenario::diagnose::{DiagnosisReport, Finding, diagnose};
pub use crate::scenario::inject::{GeneratedScenario, generate, inject_faults};
pub use crate::scenario::select::{Difficulty, ScenarioSelection, select_faults};

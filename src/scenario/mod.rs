//! Scenario pipeline: selection → injection → rendering, and the dual
//! diagnosis path back from rendered manifests to a remediation report.

pub mod diagnose;
pub mod inject;
pub mod render;
pub mod report;
pub mod select;

pub use diagnose::{DiagnosisReport, Finding, diagnose};
pub use inject::{GeneratedScenario, generate, inject_faults};
pub use select::{Difficulty, ScenarioSelection, select_faults};

//! The fault catalog: one fixed table pairing every injector with the
//! detector and remediation that recognize exactly what it broke.
//!
//! The pairing lives in a single record literal per fault so the
//! injector/detector correspondence is visible at the definition site,
//! not reconstructed from parallel maps.

pub mod faults;

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::manifest::DocumentSet;

pub use faults::CATALOG;

/// Stable identifiers for every cataloged misconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultId {
    SvcSelectorMismatch,
    TargetportMismatch,
    BadReadinessProbe,
    DefaultDenyNp,
    EnvMissingKey,
    ClaimrefMismatch,
    PvcUnknownSc,
}

impl FaultId {
    /// The wire/report identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SvcSelectorMismatch => "svc_selector_mismatch",
            Self::TargetportMismatch => "targetport_mismatch",
            Self::BadReadinessProbe => "bad_readiness_probe",
            Self::DefaultDenyNp => "default_deny_np",
            Self::EnvMissingKey => "env_missing_key",
            Self::ClaimrefMismatch => "claimref_mismatch",
            Self::PvcUnknownSc => "pvc_unknown_sc",
        }
    }

    /// Parse a report identifier back into a `FaultId`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        CATALOG
            .iter()
            .map(|spec| spec.id)
            .find(|id| id.as_str() == raw)
    }
}

impl std::fmt::Display for FaultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog record: identifier, injector, detector, and remediation.
///
/// Contract: `(spec.detect)(inject(baseline), baseline)` is `true` and
/// `(spec.detect)(baseline, baseline)` is `false` for every entry.
/// Detectors are independent; entries touch disjoint document fields.
pub struct FaultSpec {
    /// Stable identifier.
    pub id: FaultId,
    /// One-line spoiler-safe description for catalog listings.
    pub summary: &'static str,
    /// Mutates a copy of the baseline in place. Total on a well-formed
    /// baseline; a missing contractual field is fatal catalog drift.
    pub inject: fn(&mut DocumentSet) -> Result<()>,
    /// Pure structural predicate over (observed, baseline). Absent optional
    /// structure resolves to `false`, never an error.
    pub detect: fn(observed: &DocumentSet, baseline: &DocumentSet) -> bool,
    /// One-line issue description, interpolating observed values.
    pub issue: fn(observed: &DocumentSet) -> String,
    /// Ordered remediation steps, ready for the Markdown report.
    pub remedy: &'static [&'static str],
}

/// Resolve an identifier to its catalog record.
#[must_use]
pub fn spec_for(id: FaultId) -> &'static FaultSpec {
    // CATALOG covers every FaultId variant; see catalog_covers_every_id test.
    CATALOG
        .iter()
        .find(|spec| spec.id == id)
        .unwrap_or_else(|| unreachable!("catalog entry for {id}"))
}

/// All identifiers in declaration order.
#[must_use]
pub fn all_ids() -> Vec<FaultId> {
    CATALOG.iter().map(|spec| spec.id).collect()
}

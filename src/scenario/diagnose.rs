//! Diagnosis engine: re-derive which faults a document set carries.

use serde::Serialize;

use crate::catalog::{CATALOG, FaultId};
use crate::manifest::DocumentSet;

/// One detected fault with its rendered issue and fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub id: FaultId,
    pub issue: String,
    pub remedy: &'static [&'static str],
}

/// Every fault whose detector fired, in catalog declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisReport {
    pub findings: Vec<Finding>,
}

impl DiagnosisReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<FaultId> {
        self.findings.iter().map(|f| f.id).collect()
    }
}

/// Evaluate every catalog detector against `observed`.
///
/// Pure: no side effects, no randomness, order fixed by the catalog. The
/// baseline is consulted only by differential detectors (storage class).
/// Absent optional structure resolves inside each detector to "not present";
/// the report is always complete across the catalog, never partial.
#[must_use]
pub fn diagnose(observed: &DocumentSet, baseline: &DocumentSet) -> DiagnosisReport {
    let findings = CATALOG
        .iter()
        .filter(|spec| (spec.detect)(observed, baseline))
        .map(|spec| Finding {
            id: spec.id,
            issue: (spec.issue)(observed),
            remedy: spec.remedy,
        })
        .collect();
    DiagnosisReport { findings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::all_ids;
    use crate::core::config::ScenarioConfig;
    use crate::manifest::baseline_set;
    use crate::scenario::inject::inject_faults;

    fn baseline() -> DocumentSet {
        baseline_set(&ScenarioConfig::default())
    }

    #[test]
    fn clean_baseline_diagnoses_clean() {
        let clean = baseline();
        let report = diagnose(&clean, &clean);
        assert!(report.is_clean(), "unexpected findings: {:?}", report.ids());
    }

    #[test]
    fn report_order_follows_catalog_not_injection() {
        let clean = baseline();
        // Inject in reverse catalog order.
        let mut reversed = all_ids();
        reversed.reverse();
        let faulty = inject_faults(&clean, &reversed).unwrap();
        let report = diagnose(&faulty, &clean);
        assert_eq!(report.ids(), all_ids(), "report must be catalog-ordered");
    }

    #[test]
    fn diagnosis_is_pure() {
        let clean = baseline();
        let faulty = inject_faults(&clean, &[FaultId::TargetportMismatch]).unwrap();
        let first = diagnose(&faulty, &clean);
        let second = diagnose(&faulty, &clean);
        assert_eq!(first, second);
    }

    #[test]
    fn pairwise_injections_report_exactly_the_pair() {
        let clean = baseline();
        let ids = all_ids();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                let faulty = inject_faults(&clean, &[a, b]).unwrap();
                let mut expected = vec![a, b];
                expected.sort();
                let mut got = diagnose(&faulty, &clean).ids();
                got.sort();
                assert_eq!(got, expected, "pair ({a}, {b})");
            }
        }
    }

    #[test]
    fn findings_carry_issue_and_remedy() {
        let clean = baseline();
        let faulty = inject_faults(&clean, &[FaultId::ClaimrefMismatch]).unwrap();
        let report = diagnose(&faulty, &clean);
        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.id, FaultId::ClaimrefMismatch);
        assert!(finding.issue.contains("app-pvcc"), "{}", finding.issue);
        assert!(!finding.remedy.is_empty());
    }

    #[test]
    fn missing_network_policy_is_not_a_finding() {
        let clean = baseline();
        assert!(clean.network_policy.is_none());
        let report = diagnose(&clean, &clean);
        assert!(!report.ids().contains(&FaultId::DefaultDenyNp));
    }

    #[test]
    fn report_serializes_with_stable_identifiers() {
        let clean = baseline();
        let faulty = inject_faults(&clean, &[FaultId::DefaultDenyNp]).unwrap();
        let report = diagnose(&faulty, &clean);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"default_deny_np\""), "{json}");
    }
}

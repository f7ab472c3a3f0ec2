//! Markdown rendering for the remediation report and the trainee brief.

use std::fmt::Write as _;

use chrono::{SecondsFormat, Utc};

use crate::scenario::diagnose::DiagnosisReport;
use crate::scenario::select::ScenarioSelection;

/// Render the answers report the reveal command prints.
///
/// `seed` and `difficulty` are display strings so a reveal over manifests of
/// unknown provenance can render `?`.
#[must_use]
pub fn render_answers(seed: &str, difficulty: &str, report: &DiagnosisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Drill Answers (seed {seed}, difficulty {difficulty})");
    out.push('\n');

    if report.is_clean() {
        out.push_str("_No faults detected (did you generate a drill first?)_\n");
        return out;
    }

    out.push_str("## Detected Faults & Fixes\n\n");
    for finding in &report.findings {
        let _ = writeln!(out, "### {}", finding.id);
        let _ = writeln!(out, "- **Issue:** {}", finding.issue);
        out.push_str("- **Fix:**\n");
        for line in finding.remedy {
            let _ = writeln!(out, "  {line}");
        }
        out.push('\n');
    }

    out.push_str("## Quick Verification\n");
    out.push_str("```bash\n");
    out.push_str("kubectl -n kbox get pods,svc,pvc,netpol\n");
    out.push_str("kubectl -n kbox run probe --rm -it --image=busybox:1.36 --restart=Never \\\n");
    out.push_str("  -- wget -qO- --timeout=3 http://app/health\n");
    out.push_str("```\n");
    out
}

/// Render the spoiler-free brief written next to the manifests.
#[must_use]
pub fn render_brief(selection: &ScenarioSelection, manifests: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Troubleshooting Drill (seed {}, difficulty {})",
        selection.seed, selection.difficulty
    );
    let _ = writeln!(
        out,
        "\nGenerated {}.\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(
        out,
        "{} fault(s) hide in these manifests:\n",
        selection.chosen.len()
    );
    for name in manifests {
        let _ = writeln!(out, "- `{name}`");
    }
    out.push_str(
        "\nApply them, figure out why the app is unreachable, and fix it:\n\n\
         ```bash\nkubectl apply -f .\n```\n\n\
         Check your work with `kfd reveal` only after you are done.\n",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FaultId;
    use crate::core::config::ScenarioConfig;
    use crate::manifest::baseline_set;
    use crate::scenario::diagnose::diagnose;
    use crate::scenario::inject::inject_faults;
    use crate::scenario::select::Difficulty;

    #[test]
    fn answers_report_lists_each_finding_once() {
        let clean = baseline_set(&ScenarioConfig::default());
        let faulty = inject_faults(
            &clean,
            &[FaultId::SvcSelectorMismatch, FaultId::DefaultDenyNp],
        )
        .unwrap();
        let report = diagnose(&faulty, &clean);
        let text = render_answers("7", "medium", &report);
        assert_eq!(text.matches("### svc_selector_mismatch").count(), 1);
        assert_eq!(text.matches("### default_deny_np").count(), 1);
        assert!(text.contains("## Quick Verification"));
    }

    #[test]
    fn clean_report_renders_placeholder() {
        let clean = baseline_set(&ScenarioConfig::default());
        let report = diagnose(&clean, &clean);
        let text = render_answers("1", "easy", &report);
        assert!(text.contains("_No faults detected"));
        assert!(!text.contains("## Detected Faults"));
    }

    #[test]
    fn brief_never_names_the_chosen_faults() {
        let selection = crate::scenario::select::select_faults(42, Difficulty::Hard).unwrap();
        let text = render_brief(&selection, &["ns.yaml", "app-deploy.yaml"]);
        for id in &selection.chosen {
            assert!(
                !text.contains(id.as_str()),
                "brief leaked fault id {id}: {text}"
            );
        }
        assert!(text.contains("3 fault(s)"));
        assert!(text.contains("`ns.yaml`"));
    }
}

//! Injection engine: clean baseline in, faulty document set out.

use crate::catalog::{FaultId, spec_for};
use crate::core::config::ScenarioConfig;
use crate::core::errors::Result;
use crate::manifest::{DocumentSet, baseline_set};
use crate::scenario::select::{Difficulty, ScenarioSelection, select_faults};

/// A fully generated drill: the selection that produced it plus the faulty
/// documents ready for rendering.
#[derive(Debug, Clone)]
pub struct GeneratedScenario {
    pub selection: ScenarioSelection,
    pub documents: DocumentSet,
}

/// Apply the chosen injectors, in order, to a copy of `baseline`.
///
/// The baseline is never mutated. An injector failing to find a field the
/// baseline contract guarantees is fatal catalog drift, not a skip.
pub fn inject_faults(baseline: &DocumentSet, chosen: &[FaultId]) -> Result<DocumentSet> {
    let mut faulty = baseline.clone();
    for &id in chosen {
        (spec_for(id).inject)(&mut faulty)?;
    }
    Ok(faulty)
}

/// Select and inject in one step: the whole generation pipeline short of
/// rendering to disk.
pub fn generate(
    scenario: &ScenarioConfig,
    seed: u64,
    difficulty: Difficulty,
) -> Result<GeneratedScenario> {
    let selection = select_faults(seed, difficulty)?;
    let baseline = baseline_set(scenario);
    let documents = inject_faults(&baseline, &selection.chosen)?;
    Ok(GeneratedScenario {
        selection,
        documents,
    })
}

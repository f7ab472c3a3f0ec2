//! Seeded fault selection: which catalog entries a drill gets.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::catalog::{CATALOG, FaultId};
use crate::core::errors::{DrillError, Result};

/// Drill difficulty, mapping to the number of injected faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// How many faults this tier injects.
    #[must_use]
    pub const fn fault_count(self) -> usize {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse the CLI/config spelling.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The deterministic outcome of one selection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioSelection {
    pub seed: u64,
    pub difficulty: Difficulty,
    /// Chosen identifiers, in injection order. Never contains duplicates.
    pub chosen: Vec<FaultId>,
}

/// Choose `difficulty.fault_count()` distinct faults for `seed`.
///
/// Identical `(seed, difficulty)` pairs always yield the identical list in
/// the identical order; that order is the injection order.
pub fn select_faults(seed: u64, difficulty: Difficulty) -> Result<ScenarioSelection> {
    let chosen = sample_ids(seed, difficulty.fault_count())?;
    Ok(ScenarioSelection {
        seed,
        difficulty,
        chosen,
    })
}

/// Sample `count` distinct catalog identifiers without replacement.
///
/// Exposed separately so the boundary constraint (`count` beyond the catalog
/// size) stays checkable even though no `Difficulty` tier can reach it.
pub fn sample_ids(seed: u64, count: usize) -> Result<Vec<FaultId>> {
    if count > CATALOG.len() {
        return Err(DrillError::SelectionConstraint {
            requested: count,
            available: CATALOG.len(),
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    // index::sample returns indices in sampled order, which fixes the
    // injection sequence for a given seed.
    let ids = index::sample(&mut rng, CATALOG.len(), count)
        .into_iter()
        .map(|i| CATALOG[i].id)
        .collect();
    Ok(ids)
}

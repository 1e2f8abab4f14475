#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::model::{Matrix, ResourceVector, Units};
use crate::need::compute_need;
use crate::safety::{SafetyVerdict, is_safe};

const SAMPLE_ALLOCATION: [[Units; 4]; 5] = [
    [1, 2, 0, 2],
    [0, 1, 1, 2],
    [1, 2, 4, 0],
    [1, 2, 0, 1],
    [1, 0, 0, 1],
];

const SAMPLE_MAXIMUM: [[Units; 4]; 5] = [
    [4, 3, 1, 6],
    [2, 4, 2, 4],
    [3, 6, 5, 1],
    [2, 6, 2, 3],
    [3, 1, 1, 2],
];

const SAMPLE_CANDIDATES: [[Units; 4]; 4] = [[2, 2, 2, 3], [4, 4, 1, 1], [3, 0, 1, 4], [1, 5, 2, 2]];

/// A fixed system snapshot plus the available vectors to test against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub allocation: Matrix,
    pub maximum: Matrix,
    #[serde(default)]
    pub candidates: Vec<ResourceVector>,
}

impl Scenario {
    /// Five processes over four resource types, tested against four candidates.
    pub fn sample() -> Self {
        Self {
            allocation: sample_matrix(&SAMPLE_ALLOCATION),
            maximum: sample_matrix(&SAMPLE_MAXIMUM),
            candidates: SAMPLE_CANDIDATES.into_iter().map(ResourceVector::from).collect(),
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::sample()
    }
}

fn sample_matrix<const P: usize, const R: usize>(rows: &[[Units; R]; P]) -> Matrix {
    let mut matrix = Matrix::zeros(P, R);
    for (process, units) in rows.iter().enumerate() {
        if let Some(row) = matrix.row_mut(process) {
            row.copy_from_slice(units);
        }
    }
    matrix
}

/// Outcome of checking one candidate available vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub available: ResourceVector,
    pub outcome: Result<SafetyVerdict>,
}

/// Scenario-scoped state: allocation, maximum, and the need derived from them.
///
/// Built once, then shared read-only by every trial.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    allocation: Matrix,
    maximum: Matrix,
    need: Matrix,
}

impl ScenarioRunner {
    pub fn prepare(scenario: &Scenario) -> Result<Self> {
        let need = compute_need(&scenario.maximum, &scenario.allocation)?;
        Ok(Self {
            allocation: scenario.allocation.clone(),
            maximum: scenario.maximum.clone(),
            need,
        })
    }

    pub fn allocation(&self) -> &Matrix {
        &self.allocation
    }

    pub fn maximum(&self) -> &Matrix {
        &self.maximum
    }

    pub fn need(&self) -> &Matrix {
        &self.need
    }

    pub fn check(&self, available: &ResourceVector) -> Result<SafetyVerdict> {
        is_safe(&self.allocation, &self.need, available)
    }

    fn run_trial(&self, available: &ResourceVector) -> Trial {
        let outcome = self.check(available);
        match &outcome {
            Ok(SafetyVerdict::Safe { sequence }) => {
                info!(available = ?available.as_slice(), ?sequence, "safe");
            }
            Ok(SafetyVerdict::Unsafe { blocked }) => {
                info!(available = ?available.as_slice(), ?blocked, "unsafe");
            }
            Err(err) => {
                warn!(available = ?available.as_slice(), error = %err, "invalid trial");
            }
        }
        Trial {
            available: available.clone(),
            outcome,
        }
    }

    /// Checks every candidate independently. Results keep input order; an
    /// invalid candidate yields an error trial without affecting the others.
    pub fn run_trials(&self, candidates: &[ResourceVector]) -> Vec<Trial> {
        #[cfg(not(target_arch = "wasm32"))]
        let trials = candidates
            .par_iter()
            .map(|available| self.run_trial(available))
            .collect();
        #[cfg(target_arch = "wasm32")]
        let trials = candidates
            .iter()
            .map(|available| self.run_trial(available))
            .collect();

        trials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BankerError;

    #[test]
    fn sample_prepares_and_derives_need() {
        let runner = ScenarioRunner::prepare(&Scenario::default()).unwrap();
        assert_eq!(runner.need().row(0), Some(&[3, 1, 1, 4][..]));
        assert_eq!(runner.need().row(4), Some(&[2, 1, 1, 1][..]));
        assert_eq!(runner.allocation().shape(), (5, 4));
        assert_eq!(runner.maximum().get(2, 1), Some(6));
    }

    #[test]
    fn trials_keep_input_order_and_isolate_errors() {
        let scenario = Scenario::default();
        let runner = ScenarioRunner::prepare(&scenario).unwrap();

        let mut candidates = scenario.candidates.clone();
        candidates.insert(1, ResourceVector::from([1, 1]));
        let trials = runner.run_trials(&candidates);

        let verdicts: Vec<Option<bool>> = trials
            .iter()
            .map(|trial| trial.outcome.as_ref().ok().map(SafetyVerdict::is_safe))
            .collect();
        assert_eq!(
            verdicts,
            vec![Some(true), None, Some(true), Some(false), Some(true)]
        );
        assert_eq!(trials[1].available, ResourceVector::from([1, 1]));
        assert_eq!(
            trials[1].outcome,
            Err(BankerError::VectorLength {
                expected: 4,
                found: 2
            })
        );
    }

    #[test]
    fn prepare_rejects_over_allocated_scenarios() {
        let mut scenario = Scenario::default();
        scenario.maximum = Matrix::zeros(5, 4);
        assert!(matches!(
            ScenarioRunner::prepare(&scenario),
            Err(BankerError::NegativeNeed { .. })
        ));
    }
}

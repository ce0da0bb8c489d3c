//! Isolation forest scorer. Refits on every call.

use tracing::debug;

use riskscope_core::{Result, RiskError};
use riskscope_rules::ModelParams;

use crate::algorithms::isolation_forest::{IsolationForest, IsolationForestParams};
use crate::pipeline::features::FeatureMatrix;

use super::{AnomalyScorer, RawScores};

pub struct ForestScorer {
    params: ModelParams,
}

impl ForestScorer {
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }
}

impl AnomalyScorer for ForestScorer {
    fn name(&self) -> &'static str {
        "iforest"
    }

    /// Raw score is the forest's decision function: negative for outliers.
    fn score(&self, matrix: &FeatureMatrix) -> Result<RawScores> {
        let min = self.params.min_samples.max(2);
        if matrix.len() < min {
            return Err(RiskError::InsufficientData {
                rows: matrix.len(),
                min,
            });
        }

        let forest = IsolationForest::fit(
            &matrix.rows,
            &IsolationForestParams {
                n_estimators: self.params.n_estimators.max(1),
                max_samples: self.params.max_samples,
                contamination: self.params.contamination,
                seed: self.params.seed,
            },
        );

        let values: Vec<f64> = matrix
            .rows
            .iter()
            .map(|row| forest.decision_function(row))
            .collect();
        let outliers = values.iter().map(|&v| v < 0.0).collect();

        debug!(
            rows = matrix.len(),
            sample_size = forest.sample_size(),
            offset = forest.offset(),
            seed = self.params.seed,
            "isolation forest fitted"
        );

        Ok(RawScores { values, outliers })
    }
}

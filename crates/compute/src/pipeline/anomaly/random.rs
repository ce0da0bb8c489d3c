//! Randomized scorer for harness runs. Bypasses the model entirely.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use riskscope_core::Result;
use riskscope_rules::RandomParams;

use crate::pipeline::features::FeatureMatrix;

use super::{AnomalyScorer, RawScores};

pub struct RandomScorer {
    params: RandomParams,
}

impl RandomScorer {
    pub fn new(params: RandomParams) -> Self {
        Self { params }
    }
}

impl AnomalyScorer for RandomScorer {
    fn name(&self) -> &'static str {
        "random"
    }

    /// Integers drawn uniformly from `[low, high)`; never flags outliers.
    fn score(&self, matrix: &FeatureMatrix) -> Result<RawScores> {
        let mut rng = match self.params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (low, high) = (self.params.low, self.params.high.max(self.params.low + 1));

        let values = (0..matrix.len())
            .map(|_| rng.gen_range(low..high) as f64)
            .collect();

        Ok(RawScores {
            values,
            outliers: vec![false; matrix.len()],
        })
    }
}

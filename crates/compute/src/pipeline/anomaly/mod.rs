//! Anomaly scoring: raw per-record anomaly measures.
//!
//! Two interchangeable strategies behind [`AnomalyScorer`]:
//! - [`forest`]: isolation forest fitted on the current batch
//! - [`random`]: uniform random measures for harness runs
//!
//! Sign convention for every scorer: lower raw values are more anomalous.

pub mod forest;
pub mod random;

use riskscope_core::Result;
use riskscope_rules::{ScoringConfigSpec, ScoringMode};

use super::features::FeatureMatrix;

pub use forest::ForestScorer;
pub use random::RandomScorer;

/// Raw scores for one batch, index-aligned with the feature matrix rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScores {
    /// Lower is more anomalous.
    pub values: Vec<f64>,
    /// Per-record outlier label from the scorer's own threshold.
    pub outliers: Vec<bool>,
}

impl RawScores {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Trait abstracting how raw anomaly measures are produced.
///
/// Implementations hold no state between calls; a model fitted inside
/// [`AnomalyScorer::score`] is dropped when the call returns.
pub trait AnomalyScorer: Send + Sync {
    /// Short identifier used in logs ("iforest", "random").
    fn name(&self) -> &'static str;

    /// Produce exactly one raw score per matrix row.
    fn score(&self, matrix: &FeatureMatrix) -> Result<RawScores>;
}

/// Build the scorer strategy for `mode`.
///
/// `seed` overrides the configured seed of whichever scorer is selected.
pub fn build_scorer(
    mode: ScoringMode,
    config: &ScoringConfigSpec,
    seed: Option<u64>,
) -> Box<dyn AnomalyScorer> {
    match mode {
        ScoringMode::IsolationForest => {
            let mut params = config.model.clone();
            if let Some(seed) = seed {
                params.seed = seed;
            }
            Box::new(ForestScorer::new(params))
        }
        ScoringMode::Random => {
            let mut params = config.random.clone();
            if seed.is_some() {
                params.seed = seed;
            }
            Box::new(RandomScorer::new(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_scorer_by_mode() {
        let config = ScoringConfigSpec::default();
        assert_eq!(build_scorer(ScoringMode::IsolationForest, &config, None).name(), "iforest");
        assert_eq!(build_scorer(ScoringMode::Random, &config, None).name(), "random");
    }

    #[test]
    fn seed_override_reaches_random_scorer() {
        let config = ScoringConfigSpec::default();
        let matrix = FeatureMatrix {
            columns: vec!["x".into()],
            ids: (0..20).map(|i| i.to_string()).collect(),
            rows: (0..20).map(|i| vec![i as f64]).collect(),
        };
        let a = build_scorer(ScoringMode::Random, &config, Some(9)).score(&matrix).unwrap();
        let b = build_scorer(ScoringMode::Random, &config, Some(9)).score(&matrix).unwrap();
        assert_eq!(a, b);
    }
}

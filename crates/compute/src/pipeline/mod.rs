//! Risk scoring pipeline orchestrator.
//!
//! Wires the stages together for one batch:
//!
//! - **Scores**: features → anomaly scorer → normalizer → status
//! - **Explanations**: raw record → reasons → recommended actions
//!
//! Both branches fan in to one [`RiskResult`] per record, in input order.

pub mod anomaly;
pub mod features;
pub mod normalize;
pub mod reasons;
pub mod recommend;
pub mod status;

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use riskscope_core::{Dataset, Result, RiskError};
use riskscope_rules::{CompiledScoringConfig, ScoringMode};

use self::anomaly::build_scorer;
use self::features::extract_default_features;
use self::normalize::normalize;
use self::reasons::{derive_reasons, Reason};
use self::recommend::{recommend, Action};
use self::status::{classify, RiskStatus};

/// Scored, explained result for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub score: i64,
    pub status: RiskStatus,
    /// Flagged by the scorer's own outlier threshold.
    pub outlier: bool,
    pub reasons: Vec<Reason>,
    pub recommendations: Vec<Action>,
}

/// Per-request overrides.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Scorer to use instead of the configured one.
    pub mode: Option<ScoringMode>,
    /// Seed to use instead of the configured one.
    pub seed: Option<u64>,
}

/// Counts for one scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassSummary {
    pub records: usize,
    pub outliers: usize,
    pub by_status: BTreeMap<String, usize>,
}

/// Summarize a pass's results.
pub fn summarize(results: &[RiskResult]) -> PassSummary {
    let mut by_status: BTreeMap<String, usize> = RiskStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    for r in results {
        *by_status.entry(r.status.as_str().to_string()).or_default() += 1;
    }
    PassSummary {
        records: results.len(),
        outliers: results.iter().filter(|r| r.outlier).count(),
        by_status,
    }
}

/// Stateless scoring pipeline. Every [`run`](RiskPipeline::run) builds and
/// fits its own scorer, so one pipeline can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct RiskPipeline {
    config: CompiledScoringConfig,
}

impl RiskPipeline {
    pub fn new(config: CompiledScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompiledScoringConfig {
        &self.config
    }

    /// Score and explain every record of `dataset`.
    ///
    /// All-or-nothing: on error no results are returned. Schema problems are
    /// reported before any scoring work begins.
    pub fn run(&self, dataset: &Dataset, options: &RunOptions) -> Result<Vec<RiskResult>> {
        let start = Instant::now();
        let mode = options.mode.unwrap_or(self.config.mode);

        let range = self.config.normalization;
        if range.lo >= range.hi {
            return Err(RiskError::Other(format!(
                "normalization range must satisfy lo({}) < hi({})",
                range.lo, range.hi
            )));
        }

        let matrix = extract_default_features(dataset)?;

        let scorer = build_scorer(mode, &self.config, options.seed);
        let raw = scorer.score(&matrix)?;
        if raw.len() != matrix.len() {
            return Err(RiskError::Other(format!(
                "scorer '{}' returned {} scores for {} records",
                scorer.name(),
                raw.len(),
                matrix.len()
            )));
        }
        debug!(scorer = scorer.name(), count = raw.len(), "raw scores computed");

        let scores = normalize(&raw.values, range);

        let results: Vec<RiskResult> = dataset
            .records
            .iter()
            .zip(scores)
            .zip(raw.outliers)
            .map(|((record, score), outlier)| {
                let reasons = derive_reasons(record);
                let recommendations = recommend(&reasons, self.config.dedupe_actions);
                RiskResult {
                    id: record.id.clone(),
                    ip: record.ip.clone(),
                    score,
                    status: classify(score, &self.config.status),
                    outlier,
                    reasons,
                    recommendations,
                }
            })
            .collect();

        let summary = summarize(&results);
        info!(
            mode = %mode,
            records = summary.records,
            outliers = summary.outliers,
            by_status = ?summary.by_status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "scoring pass complete"
        );

        Ok(results)
    }
}

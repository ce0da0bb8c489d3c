//! ScoringConfig rule kind: scorer mode, isolation forest parameters,
//! normalization range, status thresholds and recommendation options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use riskscope_core::RiskError;

use crate::loader::RuleError;
use crate::metadata::CommonMetadata;

pub const API_VERSION: &str = "v1";
pub const KIND: &str = "ScoringConfig";

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level ScoringConfig rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfigRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    #[serde(default)]
    pub spec: ScoringConfigSpec,
}

impl Default for ScoringConfigRule {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: CommonMetadata {
                id: "scoring-default".to_string(),
                name: "Default risk scoring".to_string(),
                description: None,
                tags: None,
                enabled: true,
            },
            spec: ScoringConfigSpec::default(),
        }
    }
}

impl ScoringConfigRule {
    pub fn from_yaml(yaml: &str) -> Result<Self, RuleError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Compile the YAML config. The `spec` section is already typed, so this is a clone.
    pub fn compile(&self) -> CompiledScoringConfig {
        self.spec.clone()
    }
}

/// Specification section of a ScoringConfig rule. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfigSpec {
    /// Scorer used when a request does not select one.
    pub mode: ScoringMode,
    pub model: ModelParams,
    pub random: RandomParams,
    pub normalization: NormalizationRange,
    pub status: StatusThresholds,
    /// Collapse repeated recommended actions for a single record.
    pub dedupe_actions: bool,
}

/// Scoring config as consumed by the pipeline.
pub type CompiledScoringConfig = ScoringConfigSpec;

/// Which anomaly scorer produces the raw measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoringMode {
    #[default]
    #[serde(rename = "iforest", alias = "isolation_forest")]
    IsolationForest,
    /// Uniform random measures. Harness/testing only.
    #[serde(rename = "random")]
    Random,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::IsolationForest => "iforest",
            ScoringMode::Random => "random",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMode {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iforest" | "isolation_forest" => Ok(ScoringMode::IsolationForest),
            "random" => Ok(ScoringMode::Random),
            _ => Err(RiskError::UnknownMode(s.to_string())),
        }
    }
}

/// Isolation forest fitting parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModelParams {
    /// Number of random partitioning trees.
    pub n_estimators: usize,
    /// Sub-sample size per tree (capped at the batch size).
    pub max_samples: usize,
    /// Expected outlier fraction; sets the decision offset.
    pub contamination: f64,
    pub seed: u64,
    /// Smallest batch the forest will be fitted on.
    pub min_samples: usize,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_samples: 256,
            contamination: 0.2,
            seed: 42,
            min_samples: 2,
        }
    }
}

/// Randomized scorer parameters. Draws from `[low, high)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RandomParams {
    pub low: i64,
    pub high: i64,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RandomParams {
    fn default() -> Self {
        Self {
            low: 0,
            high: 100,
            seed: None,
        }
    }
}

/// Closed integer range normalized scores are mapped onto.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizationRange {
    pub lo: i64,
    pub hi: i64,
}

impl Default for NormalizationRange {
    fn default() -> Self {
        Self { lo: 5, hi: 55 }
    }
}

impl NormalizationRange {
    /// Score assigned to every record when the batch has no spread.
    pub fn midpoint(&self) -> i64 {
        (self.lo + self.hi) / 2
    }
}

/// Status banding style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusScheme {
    /// normal / risk / high risk / suspicious
    #[default]
    Graded,
    /// normal / suspicious
    Binary,
}

/// Status band boundaries. A score strictly above a boundary enters that band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StatusThresholds {
    pub scheme: StatusScheme,
    pub suspicious: i64,
    pub high_risk: i64,
    pub risk: i64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            scheme: StatusScheme::Graded,
            suspicious: 50,
            high_risk: 40,
            risk: 25,
        }
    }
}

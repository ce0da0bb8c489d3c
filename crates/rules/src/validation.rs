//! ScoringConfig validation with structured errors.
//!
//! Returns a [`ValidationResult`] with errors (block load) and warnings (advisory).

use serde::{Deserialize, Serialize};

use crate::scoring_config::{ScoringConfigRule, StatusScheme, API_VERSION, KIND};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON-path-like location, e.g. `"spec.normalization"`.
    pub path: String,
    pub message: String,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a parsed [`ScoringConfigRule`], collecting every violation.
pub fn validate_scoring_config(rule: &ScoringConfigRule) -> ValidationResult {
    let mut result = ValidationResult::new();

    if rule.api_version != API_VERSION {
        result.error(
            "apiVersion",
            format!("apiVersion must be '{}', got '{}'", API_VERSION, rule.api_version),
        );
    }
    if rule.kind != KIND {
        result.error("kind", format!("kind must be '{}', got '{}'", KIND, rule.kind));
    }
    if !is_kebab_case(&rule.metadata.id) {
        result.error(
            "metadata.id",
            format!(
                "id must be kebab-case (lowercase alphanumeric + hyphens), got '{}'",
                rule.metadata.id
            ),
        );
    }

    let spec = &rule.spec;

    let m = &spec.model;
    if m.n_estimators == 0 {
        result.error("spec.model.n_estimators", "n_estimators must be at least 1");
    }
    if m.max_samples < 2 {
        result.error(
            "spec.model.max_samples",
            format!("max_samples must be at least 2, got {}", m.max_samples),
        );
    }
    if m.min_samples < 2 {
        result.error(
            "spec.model.min_samples",
            format!("min_samples must be at least 2, got {}", m.min_samples),
        );
    }
    if !(m.contamination > 0.0 && m.contamination <= 0.5) {
        result.error(
            "spec.model.contamination",
            format!("contamination must be in (0, 0.5], got {}", m.contamination),
        );
    }

    let r = &spec.random;
    if r.low >= r.high {
        result.error(
            "spec.random",
            format!("random range must satisfy low({}) < high({})", r.low, r.high),
        );
    }

    let n = &spec.normalization;
    if n.lo >= n.hi {
        result.error(
            "spec.normalization",
            format!("normalization range must satisfy lo({}) < hi({})", n.lo, n.hi),
        );
    }

    let t = &spec.status;
    if t.scheme == StatusScheme::Graded && !(t.risk < t.high_risk && t.high_risk < t.suspicious) {
        result.error(
            "spec.status",
            format!(
                "thresholds must be ascending: risk({}) < high_risk({}) < suspicious({})",
                t.risk, t.high_risk, t.suspicious
            ),
        );
    }
    if n.lo < n.hi && t.suspicious >= n.hi {
        result.warn(
            "spec.status.suspicious",
            format!(
                "suspicious threshold {} is not below hi({}); no record can be suspicious",
                t.suspicious, n.hi
            ),
        );
    }

    result
}

/// Check that a string is kebab-case: lowercase alphanumeric segments separated by single hyphens.
pub(crate) fn is_kebab_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let mut prev_was_hyphen = true; // treat start as "after separator" to require leading alnum
    for ch in s.chars() {
        if ch == '-' {
            if prev_was_hyphen {
                return false;
            }
            prev_was_hyphen = true;
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            prev_was_hyphen = false;
        } else {
            return false;
        }
    }
    !prev_was_hyphen
}

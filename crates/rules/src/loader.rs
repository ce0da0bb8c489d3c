//! Filesystem loading of the ScoringConfig document.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::scoring_config::ScoringConfigRule;
use crate::validation::validate_scoring_config;

/// Errors that can occur while loading rule documents.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Rule validation error (one message per violated constraint).
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Load and validate a ScoringConfig document.
///
/// A missing file is not an error: the built-in defaults are returned.
/// Validation warnings are logged; validation errors fail the load.
pub fn load_scoring_config(path: &Path) -> Result<ScoringConfigRule> {
    if !path.exists() {
        info!(path = %path.display(), "no scoring config found, using defaults");
        return Ok(ScoringConfigRule::default());
    }

    let yaml = fs::read_to_string(path)?;
    let rule = ScoringConfigRule::from_yaml(&yaml)?;

    let result = validate_scoring_config(&rule);
    for w in &result.warnings {
        warn!(path = %path.display(), field = %w.path, "{}", w.message);
    }
    if !result.valid {
        return Err(RuleError::Validation(
            result
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.path, e.message))
                .collect(),
        ));
    }

    info!(
        path = %path.display(),
        id = %rule.metadata.id,
        mode = %rule.spec.mode,
        "scoring config loaded"
    );
    Ok(rule)
}

//! Risk scoring configuration documents.
//!
//! This crate provides:
//! - The YAML `ScoringConfig` document with serde deserialization and defaults
//! - A filesystem loader that falls back to defaults when no file exists
//! - Structured validation with errors and advisory warnings

pub mod loader;
pub mod metadata;
pub mod scoring_config;
pub mod validation;

pub use loader::{load_scoring_config, RuleError};
pub use scoring_config::{
    CompiledScoringConfig, ModelParams, NormalizationRange, RandomParams, ScoringConfigRule,
    ScoringConfigSpec, ScoringMode, StatusScheme, StatusThresholds,
};

//! Application state initialization.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use riskscope_compute::RiskPipeline;
use riskscope_core::Dataset;
use riskscope_rules::load_scoring_config;

use crate::state::AppState;

/// Load the scoring config and the dataset. Any failure here is fatal.
pub fn build_app_state(config: &riskscope_core::Config) -> anyhow::Result<Arc<AppState>> {
    let scoring_path = &config.data.scoring_config_path;
    let rule = load_scoring_config(scoring_path)
        .with_context(|| format!("failed to load scoring config {}", scoring_path.display()))?;
    let pipeline = RiskPipeline::new(rule.compile());
    info!(
        id = %rule.metadata.id,
        mode = %pipeline.config().mode,
        "scoring config ready"
    );

    let data_path = &config.data.dataset_path;
    let dataset = Dataset::from_csv_path(data_path)
        .with_context(|| format!("failed to load dataset {}", data_path.display()))?;

    Ok(Arc::new(AppState::new(dataset, pipeline)))
}

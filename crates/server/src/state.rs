use std::sync::Arc;

use riskscope_compute::RiskPipeline;
use riskscope_core::Dataset;

/// Shared, read-only server state. Requests never mutate it, so no locks.
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub pipeline: RiskPipeline,
}

impl AppState {
    pub fn new(dataset: Dataset, pipeline: RiskPipeline) -> Self {
        Self {
            dataset: Arc::new(dataset),
            pipeline,
        }
    }
}

pub mod algorithms;
pub mod pipeline;

pub use pipeline::anomaly::{AnomalyScorer, RawScores};
pub use pipeline::reasons::Reason;
pub use pipeline::recommend::Action;
pub use pipeline::status::RiskStatus;
pub use pipeline::{summarize, PassSummary, RiskPipeline, RiskResult, RunOptions};

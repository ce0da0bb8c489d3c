//! Batch risk scoring endpoint.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{error, warn};

use riskscope_compute::{RiskResult, RunOptions};
use riskscope_rules::ScoringMode;

use super::{error_response, risk_error_response, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RiskQueryParams {
    /// "iforest" or "random"; the configured mode when absent or empty.
    pub model: Option<String>,
    pub seed: Option<u64>,
}

/// Score every user in the loaded dataset.
///
/// Each request fits its own model on the blocking pool over the shared
/// dataset.
pub async fn risk_scores(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RiskQueryParams>, QueryRejection>,
) -> Result<Json<Vec<RiskResult>>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        warn!(error = %rejection, "rejected risk score query");
        error_response(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let mode = params
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::parse::<ScoringMode>)
        .transpose()
        .map_err(|e| {
            warn!(error = %e, "rejected risk score request");
            risk_error_response(&e)
        })?;

    let options = RunOptions {
        mode,
        seed: params.seed,
    };
    let outcome = tokio::task::spawn_blocking(move || {
        state.pipeline.run(&state.dataset, &options)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "scoring task failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "scoring task failed")
    })?;

    match outcome {
        Ok(results) => Ok(Json(results)),
        Err(e) => {
            if e.is_client_error() {
                warn!(error = %e, "risk scoring rejected");
            } else {
                error!(error = %e, "risk scoring failed");
            }
            Err(risk_error_response(&e))
        }
    }
}

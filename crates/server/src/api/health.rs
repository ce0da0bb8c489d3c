use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use riskscope_core::schema::SCHEMA_VERSION;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub schema_version: u32,
    pub records: usize,
    pub mode: &'static str,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        schema_version: SCHEMA_VERSION,
        records: state.dataset.len(),
        mode: state.pipeline.config().mode.as_str(),
    })
}

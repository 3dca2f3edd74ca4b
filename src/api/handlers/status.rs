use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::ApiState;
use crate::config::RaffleInfo;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub slots: usize,
    pub uptime_secs: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaffleResponse {
    #[serde(flatten)]
    pub info: RaffleInfo,
    pub unit_price: u64,
}

pub async fn health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        slots: state.ledger.read(|l| l.slots().len()).await,
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

pub async fn raffle(State(state): State<Arc<ApiState>>) -> Json<RaffleResponse> {
    Json(RaffleResponse {
        info: state.raffle.clone(),
        unit_price: state.ledger.read(|l| l.unit_price()).await,
    })
}

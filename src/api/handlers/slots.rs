use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::state::ApiState;
use crate::ledger::{Slot, SlotPatch, SlotStatus};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateRequest {
    pub numbers: HashSet<u32>,
    pub patch: SlotPatch,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateResponse {
    pub updated: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOptionsQuery {
    /// Comma-separated slot numbers, e.g. `3,17,42`.
    pub numbers: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOptionsResponse {
    pub options: Vec<SlotStatus>,
}

fn parse_numbers(raw: &str) -> Result<HashSet<u32>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| {
            n.parse::<u32>()
                .map_err(|_| ApiError::Validation(format!("`{n}` is not a slot number")))
        })
        .collect()
}

pub async fn list(State(state): State<Arc<ApiState>>) -> Json<Vec<Slot>> {
    Json(state.ledger.read(|l| l.slots().to_vec()).await)
}

pub async fn get_one(
    State(state): State<Arc<ApiState>>,
    Path(number): Path<u32>,
) -> Result<Json<Slot>, ApiError> {
    state
        .ledger
        .read(|l| l.slot(number).cloned())
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("slot {number} does not exist")))
}

pub async fn update_one(
    State(state): State<Arc<ApiState>>,
    Path(number): Path<u32>,
    Json(patch): Json<SlotPatch>,
) -> Result<Json<Slot>, ApiError> {
    if !state.ledger.update_slot(number, &patch).await? {
        return Err(ApiError::NotFound(format!("slot {number} does not exist")));
    }
    tracing::info!(number, status = ?patch.status, "slot_updated");
    get_one(State(state), Path(number)).await
}

pub async fn update_many(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<BulkUpdateRequest>,
) -> Result<Json<BulkUpdateResponse>, ApiError> {
    if req.numbers.is_empty() {
        return Err(ApiError::Validation("numbers must not be empty".into()));
    }
    let updated = state.ledger.update_slots(&req.numbers, &req.patch).await?;
    tracing::info!(requested = req.numbers.len(), updated, status = ?req.patch.status, "slots_updated");
    Ok(Json(BulkUpdateResponse { updated }))
}

pub async fn bulk_options(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BulkOptionsQuery>,
) -> Result<Json<BulkOptionsResponse>, ApiError> {
    let numbers = parse_numbers(&query.numbers)?;
    if numbers.is_empty() {
        return Err(ApiError::Validation("numbers must not be empty".into()));
    }
    let options = state.ledger.read(|l| l.bulk_options(&numbers)).await;
    Ok(Json(BulkOptionsResponse { options }))
}

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::state::ApiState;
use crate::messages::{self, CustomerMessage};
use crate::stats::customers::{self, CustomerFilter};
use crate::stats::types::Customer;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub old_name: String,
    pub new_name: String,
    #[serde(default)]
    pub new_phone: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuery {
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedSlots {
    pub updated: usize,
}

pub async fn list(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<CustomerFilter>,
) -> Json<Vec<Customer>> {
    let all = state
        .ledger
        .read(|l| customers::directory(l.slots(), l.unit_price()))
        .await;
    Json(filter.apply(all))
}

pub async fn names(State(state): State<Arc<ApiState>>) -> Json<Vec<String>> {
    Json(state.ledger.customer_names().await)
}

pub async fn rename(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<AffectedSlots>, ApiError> {
    let updated = state
        .ledger
        .rename_customer(&req.old_name, &req.new_name, req.new_phone.as_deref())
        .await?;
    tracing::info!(old = %req.old_name, new = %req.new_name, updated, "customer_renamed");
    Ok(Json(AffectedSlots { updated }))
}

pub async fn mark_paid(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<MarkPaidRequest>,
) -> Result<Json<AffectedSlots>, ApiError> {
    let updated = state.ledger.mark_customer_paid(&req.name).await?;
    tracing::info!(name = %req.name, updated, "customer_marked_paid");
    Ok(Json(AffectedSlots { updated }))
}

pub async fn message(
    State(state): State<Arc<ApiState>>,
    Query(MessageQuery { name }): Query<MessageQuery>,
) -> Result<Json<CustomerMessage>, ApiError> {
    let customer = state
        .ledger
        .read(|l| {
            customers::directory(l.slots(), l.unit_price())
                .into_iter()
                .find(|c| c.name == name)
        })
        .await;
    let customer = customer.ok_or_else(|| ApiError::NotFound(format!("no customer named {name}")))?;
    Ok(Json(messages::message_for(&customer, &state.raffle)))
}

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use time::OffsetDateTime;

use crate::api::state::ApiState;
use crate::ledger::audit::AuditIssue;
use crate::stats::types::{ActivityResponse, Statistics};
use crate::stats::{activity, summary as summaries};

pub async fn summary(State(state): State<Arc<ApiState>>) -> Json<Statistics> {
    Json(
        state
            .ledger
            .read(|l| summaries::compute(l.slots(), l.unit_price()))
            .await,
    )
}

pub async fn activity(State(state): State<Arc<ApiState>>) -> Json<ActivityResponse> {
    let now = OffsetDateTime::now_utc();
    let response = state
        .ledger
        .read(|l| {
            let slots = l.slots();
            ActivityResponse {
                breakdown: summaries::status_breakdown(slots),
                daily: activity::daily(slots, l.unit_price(), now),
                weekly: activity::weekly(slots, l.unit_price(), now),
                summary: summaries::data_summary(slots),
            }
        })
        .await;
    Json(response)
}

pub async fn audit(State(state): State<Arc<ApiState>>) -> Json<Vec<AuditIssue>> {
    Json(state.ledger.read(|l| l.audit()).await)
}

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;

use crate::api::error::ApiError;
use crate::api::state::ApiState;
use crate::backup;
use crate::ledger::audit::AuditIssue;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub imported: usize,
    pub issues: Vec<AuditIssue>,
}

pub async fn export(State(state): State<Arc<ApiState>>) -> Result<impl IntoResponse, ApiError> {
    let now = OffsetDateTime::now_utc();
    let body = state
        .ledger
        .read(|l| backup::export(l.slots(), now))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let disposition = format!("attachment; filename=\"{}\"", backup::export_filename(now));
    tracing::info!("backup_exported");
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Body is the raw backup file. A malformed file is rejected before the
/// ledger is touched.
pub async fn import(
    State(state): State<Arc<ApiState>>,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    let slots = match backup::parse_import(&body) {
        Ok(slots) => slots,
        Err(e) => {
            metrics::counter!(crate::metrics::IMPORTS_TOTAL, "outcome" => "rejected").increment(1);
            tracing::warn!(error = %e, "backup_import_rejected");
            return Err(ApiError::Validation(e.to_string()));
        }
    };
    let imported = slots.len();
    let issues = state.ledger.replace_all(slots).await?;
    metrics::counter!(crate::metrics::IMPORTS_TOTAL, "outcome" => "accepted").increment(1);
    if !issues.is_empty() {
        tracing::warn!(count = issues.len(), "imported_slots_have_integrity_issues");
    }
    tracing::info!(imported, "backup_imported");
    Ok(Json(ImportResponse { imported, issues }))
}

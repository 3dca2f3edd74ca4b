use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::state::ApiState;
use crate::auth::AdminUser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Uuid,
    pub user: AdminUser,
}

/// Inserted into request extensions by `require_admin`.
#[derive(Clone)]
pub struct AdminSession {
    pub token: Uuid,
    pub user: AdminUser,
}

pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(user) = state.verifier.verify(&req.email, &req.password) else {
        metrics::counter!(crate::metrics::LOGINS_TOTAL, "outcome" => "rejected").increment(1);
        tracing::warn!("admin_login_rejected");
        return Err(ApiError::Unauthorized);
    };
    metrics::counter!(crate::metrics::LOGINS_TOTAL, "outcome" => "accepted").increment(1);
    let token = state.sessions.open(user.clone()).await;
    tracing::info!(email = %user.email, "admin_logged_in");
    Ok(Json(LoginResponse { token, user }))
}

pub async fn logout(
    State(state): State<Arc<ApiState>>,
    Extension(session): Extension<AdminSession>,
) -> StatusCode {
    state.sessions.close(&session.token).await;
    tracing::info!(email = %session.user.email, "admin_logged_out");
    StatusCode::NO_CONTENT
}

pub async fn session(Extension(session): Extension<AdminSession>) -> Json<AdminUser> {
    Json(session.user)
}

pub async fn require_admin(
    State(state): State<Arc<ApiState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .ok_or(ApiError::Unauthorized)?;
    let user = state
        .sessions
        .get(&token)
        .await
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(AdminSession { token, user });
    Ok(next.run(req).await)
}

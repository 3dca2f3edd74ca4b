use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::state::ApiState;

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn render(State(state): State<Arc<ApiState>>) -> Response {
    let body = state.prometheus.render();
    ([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], body).into_response()
}

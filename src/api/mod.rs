pub mod error;
pub mod handlers;
pub mod state;


use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;

use state::ApiState;

pub fn router(state: Arc<ApiState>) -> Router {
    let admin = Router::new()
        .route("/session", get(handlers::auth::session))
        .route("/logout", post(handlers::auth::logout))
        .route("/slots/bulk", post(handlers::slots::update_many))
        .route("/slots/bulk/options", get(handlers::slots::bulk_options))
        .route("/slots/{number}", patch(handlers::slots::update_one))
        .route("/customers/rename", post(handlers::customers::rename))
        .route("/customers/paid", post(handlers::customers::mark_paid))
        .route("/customers/message", get(handlers::customers::message))
        .route("/stats/activity", get(handlers::stats::activity))
        .route("/audit", get(handlers::stats::audit))
        .route("/backup/export", get(handlers::backup::export))
        .route("/backup/import", post(handlers::backup::import))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::auth::require_admin,
        ));

    Router::new()
        .route("/api/health", get(handlers::status::health))
        .route("/api/raffle", get(handlers::status::raffle))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/slots", get(handlers::slots::list))
        .route("/api/slots/{number}", get(handlers::slots::get_one))
        .route("/api/stats", get(handlers::stats::summary))
        .route("/api/customers", get(handlers::customers::list))
        .route("/api/customers/names", get(handlers::customers::names))
        .route("/metrics", get(handlers::metrics::render))
        .nest("/api/admin", admin)
        .with_state(state)
}

pub async fn serve(state: Arc<ApiState>, port: u16) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!(port, "api_listening");
    axum::serve(listener, app).await?;
    Ok(())
}

mod api;
mod auth;
mod backup;
mod config;
mod healthcheck;
mod ledger;
mod messages;
mod metrics;
mod service;
mod stats;
mod storage;

use std::sync::Arc;

use config::Config;
use service::LedgerService;
use storage::SlotStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let prometheus_handle = metrics::init()?;
    let cfg = Config::from_env()?;
    tracing::info!(
        backend = ?cfg.store_backend,
        unit_price = cfg.unit_price,
        "rifa_ledger_starting"
    );

    healthcheck::wait_for_store(&cfg).await?;

    let store = SlotStore::open(&cfg).await?;
    let ledger = LedgerService::open(store, cfg.unit_price).await?;

    let api_state = Arc::new(api::state::ApiState {
        ledger,
        verifier: Arc::new(auth::StaticCredentials::new(cfg.admin.clone())),
        sessions: auth::SessionStore::new(),
        raffle: cfg.raffle.clone(),
        start_time: std::time::Instant::now(),
        prometheus: prometheus_handle,
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("rifa_ledger_shutdown");
        }
        result = api::serve(api_state, cfg.api_port) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "api_server_failed");
                return Err(e);
            }
        }
    }

    tracing::info!("rifa_ledger_stopped");
    Ok(())
}

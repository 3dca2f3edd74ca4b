use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::{Config, StoreBackend};

const CHECK_INTERVAL: Duration = Duration::from_secs(2);
const TIMEOUT: Duration = Duration::from_secs(60);

/// Blocks until the configured slot store is reachable.
///
/// File and memory backends need no check. Redis is polled every 2 seconds
/// and startup fails after 60 seconds.
pub async fn wait_for_store(cfg: &Config) -> Result<()> {
    match cfg.store_backend {
        StoreBackend::File | StoreBackend::Memory => Ok(()),
        StoreBackend::Redis => wait_for_redis_store(&cfg.redis_url).await,
    }
}

async fn ping_redis(url: &str) -> Result<()> {
    let client = redis::Client::open(url)?;
    let mut conn = client.get_multiplexed_tokio_connection().await?;
    redis::cmd("PING").query_async::<String>(&mut conn).await?;
    Ok(())
}

async fn wait_for_redis_store(url: &str) -> Result<()> {
    let deadline = tokio::time::Instant::now() + TIMEOUT;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let Err(e) = ping_redis(url).await else {
            tracing::info!(attempts, "slot_store_ready");
            return Ok(());
        };
        if tokio::time::Instant::now() >= deadline {
            return Err(e).with_context(|| {
                format!("Redis slot store at {url} not reachable after {attempts} attempts")
            });
        }
        tracing::warn!(attempts, error = %e, "waiting_for_slot_store");
        tokio::time::sleep(CHECK_INTERVAL).await;
    }
}

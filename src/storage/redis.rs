use anyhow::{Context, Result};

#[derive(Clone)]
pub struct RedisStore {
    conn: redis::aio::MultiplexedConnection,
    key: String,
}

impl RedisStore {
    pub async fn connect(redis_url: &str, key: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .context("connecting to Redis slot store")?;
        tracing::info!(key, "redis_slot_store_connected");
        Ok(Self {
            conn,
            key: key.to_string(),
        })
    }

    pub async fn load(&self) -> Result<Option<String>> {
        let blob: Option<String> = redis::cmd("GET")
            .arg(&self.key)
            .query_async(&mut self.conn.clone())
            .await?;
        Ok(blob)
    }

    pub async fn save(&self, blob: String) -> Result<()> {
        redis::cmd("SET")
            .arg(&self.key)
            .arg(blob)
            .query_async::<()>(&mut self.conn.clone())
            .await?;
        tracing::debug!(key = %self.key, "redis_slot_blob_written");
        Ok(())
    }
}

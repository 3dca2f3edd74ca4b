pub mod file;
pub mod memory;
pub mod redis;

use anyhow::{Context, Result};

use crate::backup;
use crate::config::{Config, StoreBackend};
use crate::ledger::{Ledger, Slot};

/// Fixed key the slot collection is stored under.
pub const STORE_KEY: &str = "rifa-puestos";

/// Where the serialized slot collection lives. One blob, rewritten whole
/// on every mutation.
#[derive(Clone)]
pub enum SlotStore {
    File(file::FileStore),
    Redis(redis::RedisStore),
    Memory(memory::MemoryStore),
}

impl SlotStore {
    pub async fn open(cfg: &Config) -> Result<Self> {
        match cfg.store_backend {
            StoreBackend::File => Ok(Self::File(file::FileStore::new(&cfg.data_dir, STORE_KEY))),
            StoreBackend::Redis => {
                let store = redis::RedisStore::connect(&cfg.redis_url, STORE_KEY).await?;
                Ok(Self::Redis(store))
            }
            StoreBackend::Memory => {
                tracing::warn!("slot_store_in_memory_only");
                Ok(Self::Memory(memory::MemoryStore::new()))
            }
        }
    }

    pub async fn load_blob(&self) -> Result<Option<String>> {
        match self {
            Self::File(s) => s.load().await,
            Self::Redis(s) => s.load().await,
            Self::Memory(s) => s.load(),
        }
    }

    pub async fn save_blob(&self, blob: String) -> Result<()> {
        match self {
            Self::File(s) => s.save(&blob).await,
            Self::Redis(s) => s.save(blob).await,
            Self::Memory(s) => s.save(blob),
        }
    }

    pub async fn save(&self, slots: &[Slot]) -> Result<()> {
        let blob = serde_json::to_string(slots)?;
        self.save_blob(blob).await
    }

    /// Reads the persisted collection, or a fresh ledger of available slots
    /// when nothing has been stored yet.
    pub async fn load_ledger(&self, unit_price: u64) -> Result<Ledger> {
        let Some(blob) = self.load_blob().await? else {
            tracing::info!(key = STORE_KEY, "slot_store_empty_using_defaults");
            return Ok(Ledger::new(unit_price));
        };
        let mut slots: Vec<Slot> =
            serde_json::from_str(&blob).context("stored slot collection is not valid JSON")?;
        slots.sort_by_key(|s| s.number);
        backup::check_numbering(&slots).context("stored slot collection is inconsistent")?;
        tracing::info!(key = STORE_KEY, "slot_store_loaded");
        Ok(Ledger::from_slots(slots, unit_price))
    }
}

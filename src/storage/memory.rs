use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

/// In-process blob, selected with `STORE_BACKEND=memory` and used by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Arc<Mutex<Option<String>>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    #[cfg(test)]
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn load(&self) -> Result<Option<String>> {
        let guard = match self.blob.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(guard.clone())
    }

    pub fn save(&self, blob: String) -> Result<()> {
        if self.fail_writes {
            bail!("memory store is read-only");
        }
        let mut guard = match self.blob.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(blob);
        Ok(())
    }
}

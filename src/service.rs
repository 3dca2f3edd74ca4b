use std::collections::HashSet;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::ledger::audit::AuditIssue;
use crate::ledger::{Ledger, Slot, SlotPatch};
use crate::stats::{customers, summary};
use crate::storage::SlotStore;

/// Owns the ledger and writes it through to the slot store.
///
/// Every mutation runs on a copy of the ledger; the copy is persisted and
/// only then swapped in, so a failed write leaves both the store and the
/// in-memory state as they were. Mutations are serialized by the write lock.
pub struct LedgerService {
    ledger: RwLock<Ledger>,
    store: SlotStore,
}

impl LedgerService {
    pub async fn open(store: SlotStore, unit_price: u64) -> Result<Self> {
        let ledger = store.load_ledger(unit_price).await?;
        let issues = ledger.audit();
        if !issues.is_empty() {
            tracing::warn!(count = issues.len(), "stored_slots_have_integrity_issues");
        }
        crate::metrics::record_statistics(&summary::compute(ledger.slots(), unit_price));
        Ok(Self {
            ledger: RwLock::new(ledger),
            store,
        })
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Ledger {
        self.ledger.read().await.clone()
    }

    pub async fn read<T>(&self, f: impl FnOnce(&Ledger) -> T) -> T {
        f(&*self.ledger.read().await)
    }

    async fn mutate<T>(&self, op: &'static str, f: impl FnOnce(&mut Ledger) -> T) -> Result<T> {
        let mut current = self.ledger.write().await;
        let mut next = current.clone();
        let out = f(&mut next);

        if next == *current {
            tracing::debug!(op, "ledger_mutation_noop");
            return Ok(out);
        }

        if let Err(e) = self.store.save(next.slots()).await {
            metrics::counter!(crate::metrics::PERSIST_FAILURES_TOTAL).increment(1);
            tracing::error!(op, error = %e, "ledger_persist_failed");
            return Err(e);
        }

        *current = next;
        metrics::counter!(crate::metrics::MUTATIONS_TOTAL, "op" => op).increment(1);
        crate::metrics::record_statistics(&summary::compute(current.slots(), current.unit_price()));
        tracing::info!(op, "ledger_mutated");
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Write surface
    // -----------------------------------------------------------------------

    pub async fn update_slot(&self, number: u32, patch: &SlotPatch) -> Result<bool> {
        self.mutate("update_slot", |l| l.update_slot(number, patch)).await
    }

    pub async fn update_slots(&self, numbers: &HashSet<u32>, patch: &SlotPatch) -> Result<usize> {
        self.mutate("update_slots", |l| l.update_slots(numbers, patch)).await
    }

    pub async fn rename_customer(
        &self,
        old_name: &str,
        new_name: &str,
        new_phone: Option<&str>,
    ) -> Result<usize> {
        self.mutate("rename_customer", |l| l.rename_customer(old_name, new_name, new_phone))
            .await
    }

    pub async fn mark_customer_paid(&self, name: &str) -> Result<usize> {
        self.mutate("mark_customer_paid", |l| l.mark_customer_paid(name)).await
    }

    /// Replaces the whole collection. `slots` must already have passed
    /// `backup::parse_import`. Returns the integrity issues of the new data.
    pub async fn replace_all(&self, slots: Vec<Slot>) -> Result<Vec<AuditIssue>> {
        self.mutate("replace_all", |l| {
            l.replace_all(slots);
            l.audit()
        })
        .await
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    pub async fn customer_names(&self) -> Vec<String> {
        self.read(|l| customers::names(l.slots())).await
    }
}

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::stats::types::Statistics;

// ---------------------------------------------------------------------------
// Metric name constants
// ---------------------------------------------------------------------------

pub const SLOTS: &str = "rifa_slots";
pub const MONEY_COLLECTED: &str = "rifa_money_collected";
pub const MONEY_PENDING: &str = "rifa_money_pending";
pub const MUTATIONS_TOTAL: &str = "rifa_ledger_mutations_total";
pub const IMPORTS_TOTAL: &str = "rifa_imports_total";
pub const PERSIST_FAILURES_TOTAL: &str = "rifa_persist_failures_total";
pub const LOGINS_TOTAL: &str = "rifa_logins_total";

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

pub fn init() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

/// A handle that renders but is not installed globally, for tests.
#[cfg(test)]
pub fn detached() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

fn describe_metrics() {
    metrics::describe_gauge!(SLOTS, "Slots per status");
    metrics::describe_gauge!(MONEY_COLLECTED, "Money collected from paid slots");
    metrics::describe_gauge!(MONEY_PENDING, "Money owed on sold, unpaid slots");
    metrics::describe_counter!(MUTATIONS_TOTAL, "Ledger mutations by operation");
    metrics::describe_counter!(IMPORTS_TOTAL, "Backup imports by outcome");
    metrics::describe_counter!(PERSIST_FAILURES_TOTAL, "Failed writes of the slot collection");
    metrics::describe_counter!(LOGINS_TOTAL, "Admin login attempts by outcome");
}

pub fn record_statistics(stats: &Statistics) {
    metrics::gauge!(SLOTS, "status" => "available").set(stats.available_slots as f64);
    metrics::gauge!(SLOTS, "status" => "sold").set((stats.sold_slots - stats.paid_slots) as f64);
    metrics::gauge!(SLOTS, "status" => "paid").set(stats.paid_slots as f64);
    metrics::gauge!(MONEY_COLLECTED).set(stats.money_collected as f64);
    metrics::gauge!(MONEY_PENDING).set(stats.money_pending as f64);
}

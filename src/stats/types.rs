use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_slots: u64,
    /// Sold and paid slots together.
    pub sold_slots: u64,
    pub paid_slots: u64,
    pub available_slots: u64,
    pub money_collected: u64,
    pub money_pending: u64,
    pub money_total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub phone: Option<String>,
    /// In ledger scan order, i.e. ascending.
    pub slot_numbers: Vec<u32>,
    pub slot_count: u64,
    pub amount_paid: u64,
    pub amount_pending: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub available: u64,
    pub sold: u64,
    pub paid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSummary {
    pub total_slots: u64,
    pub slots_with_data: u64,
    pub distinct_customers: u64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_activity_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    pub sold: u64,
    pub paid: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyActivity {
    pub label: String,
    pub sold: u64,
    pub paid: u64,
    pub revenue: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub breakdown: StatusBreakdown,
    pub daily: Vec<DailyActivity>,
    pub weekly: Vec<WeeklyActivity>,
    pub summary: DataSummary,
}

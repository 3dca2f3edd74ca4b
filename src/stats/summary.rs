use std::collections::HashSet;

use crate::ledger::{Slot, SlotStatus};

use super::types::{DataSummary, Statistics, StatusBreakdown};

pub fn compute(slots: &[Slot], unit_price: u64) -> Statistics {
    let breakdown = status_breakdown(slots);
    let sold_slots = breakdown.sold + breakdown.paid;

    Statistics {
        total_slots: slots.len() as u64,
        sold_slots,
        paid_slots: breakdown.paid,
        available_slots: breakdown.available,
        money_collected: breakdown.paid.saturating_mul(unit_price),
        money_pending: breakdown.sold.saturating_mul(unit_price),
        money_total: sold_slots.saturating_mul(unit_price),
    }
}

pub fn status_breakdown(slots: &[Slot]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown {
        available: 0,
        sold: 0,
        paid: 0,
    };
    for slot in slots {
        match slot.status {
            SlotStatus::Available => breakdown.available += 1,
            SlotStatus::Sold => breakdown.sold += 1,
            SlotStatus::Paid => breakdown.paid += 1,
        }
    }
    breakdown
}

pub fn data_summary(slots: &[Slot]) -> DataSummary {
    let slots_with_data = slots
        .iter()
        .filter(|s| s.customer_name.is_some() || s.status != SlotStatus::Available)
        .count();
    let distinct_customers: HashSet<&str> =
        slots.iter().filter_map(|s| s.customer_name.as_deref()).collect();
    let last_activity_at = slots
        .iter()
        .flat_map(|s| [s.sold_at, s.paid_at])
        .flatten()
        .max();

    DataSummary {
        total_slots: slots.len() as u64,
        slots_with_data: slots_with_data as u64,
        distinct_customers: distinct_customers.len() as u64,
        last_activity_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Ledger, SlotPatch, SLOT_COUNT};
    use time::macros::datetime;

    #[test]
    fn test_compute_fresh_ledger() {
        let ledger = Ledger::new(5000);
        let stats = compute(ledger.slots(), ledger.unit_price());
        assert_eq!(stats.total_slots, 100);
        assert_eq!(stats.available_slots, 100);
        assert_eq!(stats.sold_slots, 0);
        assert_eq!(stats.money_total, 0);
    }

    #[test]
    fn test_compute_three_paid_two_sold() {
        let mut ledger = Ledger::new(5000);
        let now = datetime!(2024-08-01 10:00 UTC);
        for n in 1..=5 {
            ledger.update_slot_at(n, &SlotPatch::sell_to("Ana", None), now);
        }
        for n in 1..=3 {
            ledger.update_slot_at(n, &SlotPatch::status(SlotStatus::Paid), now);
        }

        let stats = compute(ledger.slots(), ledger.unit_price());
        assert_eq!(stats.sold_slots, 5);
        assert_eq!(stats.paid_slots, 3);
        assert_eq!(stats.available_slots, 95);
        assert_eq!(stats.money_collected, 15_000);
        assert_eq!(stats.money_pending, 10_000);
        assert_eq!(stats.money_total, 25_000);
    }

    #[test]
    fn test_compute_saturates_on_huge_unit_price() {
        let mut ledger = Ledger::new(200_000_000_000_000_000);
        let numbers: HashSet<u32> = (1..=SLOT_COUNT).collect();
        ledger.update_slots_at(
            &numbers,
            &SlotPatch::sell_to("Ana", None),
            datetime!(2024-08-01 10:00 UTC),
        );

        let stats = compute(ledger.slots(), ledger.unit_price());
        assert_eq!(stats.sold_slots, 100);
        assert_eq!(stats.money_pending, u64::MAX);
        assert_eq!(stats.money_total, u64::MAX);
        assert_eq!(stats.money_collected, 0);
    }

    #[test]
    fn test_data_summary() {
        let mut ledger = Ledger::new(5000);
        let t1 = datetime!(2024-08-01 10:00 UTC);
        let t2 = datetime!(2024-08-05 09:00 UTC);
        ledger.update_slot_at(1, &SlotPatch::sell_to("Ana", None), t1);
        ledger.update_slot_at(2, &SlotPatch::sell_to("Luis", None), t1);
        ledger.update_slot_at(3, &SlotPatch::sell_to("Ana", None), t1);
        ledger.update_slot_at(3, &SlotPatch::status(SlotStatus::Paid), t2);

        let summary = data_summary(ledger.slots());
        assert_eq!(summary.total_slots, 100);
        assert_eq!(summary.slots_with_data, 3);
        assert_eq!(summary.distinct_customers, 2);
        assert_eq!(summary.last_activity_at, Some(t2));
    }

    #[test]
    fn test_data_summary_empty_ledger_has_no_activity() {
        let summary = data_summary(Ledger::new(5000).slots());
        assert_eq!(summary.slots_with_data, 0);
        assert!(summary.last_activity_at.is_none());
    }
}

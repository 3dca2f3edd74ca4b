use serde::Serialize;

use super::{Ledger, Slot, SlotStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    AvailableWithCustomer,
    AvailableWithTimestamps,
    TakenWithoutCustomer,
    PaidWithoutSoldAt,
    SoldWithPaidAt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditIssue {
    pub number: u32,
    pub kind: IssueKind,
}

impl Ledger {
    /// Lists slots whose fields contradict their status. Writes are not
    /// validated, so imports and manual edits can leave these behind.
    pub fn audit(&self) -> Vec<AuditIssue> {
        self.slots().iter().flat_map(slot_issues).collect()
    }
}

fn slot_issues(slot: &Slot) -> Vec<AuditIssue> {
    let mut kinds = Vec::new();
    match slot.status {
        SlotStatus::Available => {
            if slot.customer_name.is_some() || slot.customer_phone.is_some() {
                kinds.push(IssueKind::AvailableWithCustomer);
            }
            if slot.sold_at.is_some() || slot.paid_at.is_some() {
                kinds.push(IssueKind::AvailableWithTimestamps);
            }
        }
        SlotStatus::Sold => {
            if slot.customer_name.is_none() {
                kinds.push(IssueKind::TakenWithoutCustomer);
            }
            if slot.paid_at.is_some() {
                kinds.push(IssueKind::SoldWithPaidAt);
            }
        }
        SlotStatus::Paid => {
            if slot.customer_name.is_none() {
                kinds.push(IssueKind::TakenWithoutCustomer);
            }
            if slot.sold_at.is_none() {
                kinds.push(IssueKind::PaidWithoutSoldAt);
            }
        }
    }
    kinds
        .into_iter()
        .map(|kind| AuditIssue { number: slot.number, kind })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SlotPatch;
    use time::macros::datetime;

    #[test]
    fn test_paid_without_sale_is_backfilled_but_nameless() {
        let mut ledger = Ledger::new(5000);
        let now = datetime!(2024-08-01 10:00 UTC);
        ledger.update_slot_at(1, &SlotPatch::sell_to("Ana", None), now);
        ledger.update_slot_at(1, &SlotPatch::status(SlotStatus::Paid), now);
        ledger.update_slot_at(2, &SlotPatch::status(SlotStatus::Paid), now);
        assert!(ledger.audit().iter().all(|i| i.kind != IssueKind::PaidWithoutSoldAt));
        assert_eq!(
            ledger.audit(),
            vec![AuditIssue { number: 2, kind: IssueKind::TakenWithoutCustomer }]
        );
    }

    #[test]
    fn test_reports_inconsistent_imported_slots() {
        let mut slots: Vec<Slot> = (1..=3).map(Slot::available).collect();
        slots[0].customer_name = Some("Ana".into());
        slots[1].status = SlotStatus::Paid;
        slots[1].customer_name = Some("Luis".into());
        slots[2].status = SlotStatus::Sold;
        slots[2].customer_name = Some("Eva".into());
        slots[2].paid_at = Some(datetime!(2024-08-01 10:00 UTC));
        let ledger = Ledger::from_slots(slots, 5000);

        assert_eq!(
            ledger.audit(),
            vec![
                AuditIssue { number: 1, kind: IssueKind::AvailableWithCustomer },
                AuditIssue { number: 2, kind: IssueKind::PaidWithoutSoldAt },
                AuditIssue { number: 3, kind: IssueKind::SoldWithPaidAt },
            ]
        );
    }
}

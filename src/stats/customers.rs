use std::collections::BTreeMap;

use serde::Deserialize;

use crate::ledger::{Slot, SlotStatus};

use super::types::Customer;

/// Groups sold and paid slots by exact customer name, ordered by name
/// (byte-wise, so case-sensitive). The phone comes from the first slot
/// scanned for that name.
pub fn directory(slots: &[Slot], unit_price: u64) -> Vec<Customer> {
    let mut by_name: BTreeMap<&str, Customer> = BTreeMap::new();

    for slot in slots.iter().filter(|s| s.status.is_taken()) {
        let Some(name) = slot.customer_name.as_deref() else {
            continue;
        };
        let customer = by_name.entry(name).or_insert_with(|| Customer {
            name: name.to_string(),
            phone: slot.customer_phone.clone(),
            slot_numbers: Vec::new(),
            slot_count: 0,
            amount_paid: 0,
            amount_pending: 0,
        });

        customer.slot_numbers.push(slot.number);
        customer.slot_count += 1;
        if slot.status == SlotStatus::Paid {
            customer.amount_paid = customer.amount_paid.saturating_add(unit_price);
        } else {
            customer.amount_pending = customer.amount_pending.saturating_add(unit_price);
        }
    }

    by_name.into_values().collect()
}

/// Distinct customer names, sorted. Used for autocomplete.
pub fn names(slots: &[Slot]) -> Vec<String> {
    directory(slots, 0).into_iter().map(|c| c.name).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    #[default]
    All,
    Pending,
    Paid,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilter {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub standing: Standing,
}

impl CustomerFilter {
    pub fn matches(&self, customer: &Customer) -> bool {
        let name_matches = match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => customer.name.to_lowercase().contains(&q.to_lowercase()),
            _ => true,
        };
        let standing_matches = match self.standing {
            Standing::All => true,
            Standing::Pending => customer.amount_pending > 0,
            Standing::Paid => customer.amount_pending == 0,
        };
        name_matches && standing_matches
    }

    pub fn apply(&self, customers: Vec<Customer>) -> Vec<Customer> {
        customers.into_iter().filter(|c| self.matches(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Ledger, SlotPatch};
    use time::macros::datetime;
    use time::OffsetDateTime;

    const NOW: OffsetDateTime = datetime!(2024-08-01 10:00 UTC);

    fn ledger_with_ana() -> Ledger {
        let mut ledger = Ledger::new(5000);
        for n in 1..=3 {
            ledger.update_slot_at(n, &SlotPatch::sell_to("Ana", Some("3001234567".into())), NOW);
        }
        ledger.update_slot_at(2, &SlotPatch::status(SlotStatus::Paid), NOW);
        ledger
    }

    #[test]
    fn test_directory_groups_by_name() {
        let ledger = ledger_with_ana();
        let customers = directory(ledger.slots(), ledger.unit_price());
        assert_eq!(customers.len(), 1);
        let ana = &customers[0];
        assert_eq!(ana.name, "Ana");
        assert_eq!(ana.phone.as_deref(), Some("3001234567"));
        assert_eq!(ana.slot_numbers, vec![1, 2, 3]);
        assert_eq!(ana.slot_count, 3);
        assert_eq!(ana.amount_paid, 5000);
        assert_eq!(ana.amount_pending, 10_000);
    }

    #[test]
    fn test_directory_sorted_case_sensitive() {
        let mut ledger = Ledger::new(5000);
        ledger.update_slot_at(1, &SlotPatch::sell_to("beto", None), NOW);
        ledger.update_slot_at(2, &SlotPatch::sell_to("Carla", None), NOW);
        ledger.update_slot_at(3, &SlotPatch::sell_to("Ana", None), NOW);
        ledger.update_slot_at(4, &SlotPatch::sell_to("ana", None), NOW);

        let names: Vec<_> = directory(ledger.slots(), 5000).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Ana", "Carla", "ana", "beto"]);
    }

    #[test]
    fn test_directory_phone_from_first_slot() {
        let mut ledger = Ledger::new(5000);
        ledger.update_slot_at(8, &SlotPatch::sell_to("Ana", Some("111".into())), NOW);
        ledger.update_slot_at(5, &SlotPatch::sell_to("Ana", Some("222".into())), NOW);
        let customers = directory(ledger.slots(), 5000);
        assert_eq!(customers[0].phone.as_deref(), Some("222"));
        assert_eq!(customers[0].slot_numbers, vec![5, 8]);
    }

    #[test]
    fn test_directory_skips_available_and_nameless_slots() {
        let mut slots: Vec<Slot> = (1..=3).map(Slot::available).collect();
        slots[0].customer_name = Some("Fantasma".into());
        slots[1].status = SlotStatus::Sold;
        assert!(directory(&slots, 5000).is_empty());
    }

    #[test]
    fn test_rename_replaces_directory_entry() {
        let mut ledger = ledger_with_ana();
        let before = directory(ledger.slots(), 5000).remove(0);
        ledger.rename_customer("Ana", "Ana María", Some("3001234567"));

        let customers = directory(ledger.slots(), 5000);
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "Ana María");
        assert_eq!(customers[0].slot_numbers, before.slot_numbers);
        assert_eq!(customers[0].amount_paid, before.amount_paid);
        assert_eq!(customers[0].amount_pending, before.amount_pending);
    }

    #[test]
    fn test_names_are_distinct_and_sorted() {
        let mut ledger = ledger_with_ana();
        ledger.update_slot_at(10, &SlotPatch::sell_to("Luis", None), NOW);
        ledger.update_slot_at(11, &SlotPatch::sell_to("Beatriz", None), NOW);
        assert_eq!(names(ledger.slots()), vec!["Ana", "Beatriz", "Luis"]);
    }

    #[test]
    fn test_filter_by_query_and_standing() {
        let mut ledger = ledger_with_ana();
        ledger.update_slot_at(10, &SlotPatch::sell_to("Luis", None), NOW);
        ledger.update_slot_at(10, &SlotPatch::status(SlotStatus::Paid), NOW);
        let customers = directory(ledger.slots(), 5000);

        let pending = CustomerFilter { query: None, standing: Standing::Pending };
        assert_eq!(pending.apply(customers.clone()).len(), 1);
        assert_eq!(pending.apply(customers.clone())[0].name, "Ana");

        let paid = CustomerFilter { query: None, standing: Standing::Paid };
        assert_eq!(paid.apply(customers.clone())[0].name, "Luis");

        let search = CustomerFilter { query: Some("LU".into()), standing: Standing::All };
        let found = search.apply(customers);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Luis");
    }
}

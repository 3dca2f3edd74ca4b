pub mod audit;
pub mod bulk;
pub mod slot;

use std::collections::HashSet;

use time::OffsetDateTime;

pub use bulk::bulk_options;
pub use slot::{Slot, SlotPatch, SlotStatus};

pub const SLOT_COUNT: u32 = 100;

/// The raffle's 100 slots plus the price of one slot.
///
/// Slots are kept in index order (`slots[i].number == i + 1`) for the
/// lifetime of the ledger; mutations change fields in place and never add
/// or remove a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    slots: Vec<Slot>,
    unit_price: u64,
}

impl Ledger {
    pub fn new(unit_price: u64) -> Self {
        Self {
            slots: (1..=SLOT_COUNT).map(Slot::available).collect(),
            unit_price,
        }
    }

    /// Builds a ledger from a previously persisted collection. Callers are
    /// expected to have checked the numbering (see `backup::check_numbering`).
    pub fn from_slots(slots: Vec<Slot>, unit_price: u64) -> Self {
        Self { slots, unit_price }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, number: u32) -> Option<&Slot> {
        self.slots.iter().find(|s| s.number == number)
    }

    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Bulk targets for the listed slots. Unknown numbers are ignored.
    pub fn bulk_options(&self, numbers: &HashSet<u32>) -> Vec<SlotStatus> {
        bulk_options(self.slots.iter().filter(|s| numbers.contains(&s.number)))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn update_slot(&mut self, number: u32, patch: &SlotPatch) -> bool {
        self.update_slot_at(number, patch, OffsetDateTime::now_utc())
    }

    /// Returns `false` (and changes nothing) when `number` is not a slot.
    pub fn update_slot_at(&mut self, number: u32, patch: &SlotPatch, now: OffsetDateTime) -> bool {
        match self.slots.iter_mut().find(|s| s.number == number) {
            Some(slot) => {
                slot.apply(patch, now);
                true
            }
            None => {
                tracing::debug!(number, "slot_update_unknown_number");
                false
            }
        }
    }

    pub fn update_slots(&mut self, numbers: &HashSet<u32>, patch: &SlotPatch) -> usize {
        self.update_slots_at(numbers, patch, OffsetDateTime::now_utc())
    }

    /// Applies `patch` to every listed slot, each against its own prior
    /// status. Returns how many slots were touched.
    pub fn update_slots_at(
        &mut self,
        numbers: &HashSet<u32>,
        patch: &SlotPatch,
        now: OffsetDateTime,
    ) -> usize {
        let mut touched = 0;
        for slot in self.slots.iter_mut().filter(|s| numbers.contains(&s.number)) {
            slot.apply(patch, now);
            touched += 1;
        }
        touched
    }

    /// Moves every slot of `old_name` to `new_name` with `new_phone`
    /// (`None` clears the phone). Names are not checked for uniqueness, so
    /// renaming onto an existing customer merges the two.
    pub fn rename_customer(&mut self, old_name: &str, new_name: &str, new_phone: Option<&str>) -> usize {
        let mut touched = 0;
        for slot in self.slots.iter_mut().filter(|s| s.belongs_to(old_name)) {
            slot.customer_name = Some(new_name.to_string());
            slot.customer_phone = new_phone.map(str::to_string);
            touched += 1;
        }
        touched
    }

    pub fn mark_customer_paid(&mut self, name: &str) -> usize {
        self.mark_customer_paid_at(name, OffsetDateTime::now_utc())
    }

    /// Settles every `sold` slot of `name`. Slots already paid keep their
    /// original `paid_at`.
    pub fn mark_customer_paid_at(&mut self, name: &str, now: OffsetDateTime) -> usize {
        let patch = SlotPatch::status(SlotStatus::Paid);
        let mut touched = 0;
        for slot in self
            .slots
            .iter_mut()
            .filter(|s| s.status == SlotStatus::Sold && s.belongs_to(name))
        {
            slot.apply(&patch, now);
            touched += 1;
        }
        touched
    }

    pub fn replace_all(&mut self, slots: Vec<Slot>) {
        self.slots = slots;
    }
}

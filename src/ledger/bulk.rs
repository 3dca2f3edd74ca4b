use super::slot::{Slot, SlotStatus};

/// Statuses a multi-slot selection may be moved to together.
///
/// An all-available selection can only be sold. An all-sold selection can
/// be settled or released. A mix that holds any sold slot can only be
/// settled. Anything else (including an empty selection) offers nothing.
pub fn bulk_options<'a>(selected: impl IntoIterator<Item = &'a Slot>) -> Vec<SlotStatus> {
    let mut any = false;
    let mut all_available = true;
    let mut all_sold = true;
    let mut any_sold = false;

    for slot in selected {
        any = true;
        all_available &= slot.status == SlotStatus::Available;
        all_sold &= slot.status == SlotStatus::Sold;
        any_sold |= slot.status == SlotStatus::Sold;
    }

    if !any {
        Vec::new()
    } else if all_available {
        vec![SlotStatus::Sold]
    } else if all_sold {
        vec![SlotStatus::Paid, SlotStatus::Available]
    } else if any_sold {
        vec![SlotStatus::Paid]
    } else {
        Vec::new()
    }
}

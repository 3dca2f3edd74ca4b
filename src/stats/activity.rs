use time::{Duration, OffsetDateTime};

use crate::ledger::{Slot, SlotStatus};

use super::types::{DailyActivity, WeeklyActivity};

const DAYS: i64 = 30;
const WEEKS: i64 = 4;

/// Sales per UTC day over the last 30 days, oldest first. A slot counts on
/// the day of its `sold_at`; `paid` counts those of them already paid.
pub fn daily(slots: &[Slot], unit_price: u64, now: OffsetDateTime) -> Vec<DailyActivity> {
    let today = now.date();
    (0..DAYS)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back);
            let (sold, paid) = tally(slots, |sold_at| sold_at.date() == day);
            DailyActivity {
                date: day.to_string(),
                sold,
                paid,
                revenue: paid * unit_price,
            }
        })
        .collect()
}

/// Four consecutive 7-day windows ending at `now`.
pub fn weekly(slots: &[Slot], unit_price: u64, now: OffsetDateTime) -> Vec<WeeklyActivity> {
    (0..WEEKS)
        .map(|i| {
            let start = now - Duration::weeks(WEEKS - i);
            let end = start + Duration::weeks(1);
            let (sold, paid) = tally(slots, |sold_at| sold_at >= start && sold_at < end);
            WeeklyActivity {
                label: format!("Week {}", i + 1),
                sold,
                paid,
                revenue: paid * unit_price,
            }
        })
        .collect()
}

fn tally(slots: &[Slot], in_window: impl Fn(OffsetDateTime) -> bool) -> (u64, u64) {
    let mut sold = 0;
    let mut paid = 0;
    for slot in slots {
        let Some(sold_at) = slot.sold_at else {
            continue;
        };
        if in_window(sold_at) {
            sold += 1;
            if slot.status == SlotStatus::Paid {
                paid += 1;
            }
        }
    }
    (sold, paid)
}

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    #[serde(alias = "disponible")]
    Available,
    #[serde(alias = "vendido")]
    Sold,
    #[serde(alias = "pagado")]
    Paid,
}

impl SlotStatus {
    /// Sold and paid slots both count as sold.
    pub fn is_taken(self) -> bool {
        matches!(self, Self::Sold | Self::Paid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(alias = "numero")]
    pub number: u32,
    #[serde(alias = "estado")]
    pub status: SlotStatus,
    #[serde(default, alias = "cliente", skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, alias = "telefono", skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(
        default,
        alias = "fechaVenta",
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sold_at: Option<OffsetDateTime>,
    #[serde(
        default,
        alias = "fechaPago",
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub paid_at: Option<OffsetDateTime>,
}

impl Slot {
    pub fn available(number: u32) -> Self {
        Self {
            number,
            status: SlotStatus::Available,
            customer_name: None,
            customer_phone: None,
            sold_at: None,
            paid_at: None,
        }
    }

    pub fn belongs_to(&self, name: &str) -> bool {
        self.customer_name.as_deref() == Some(name)
    }

    /// Applies a partial update, stamping timestamps according to the
    /// transition from this slot's current status.
    pub fn apply(&mut self, patch: &SlotPatch, now: OffsetDateTime) {
        let prior = self.status;

        if let Some(name) = &patch.customer_name {
            self.customer_name = name.clone();
        }
        if let Some(phone) = &patch.customer_phone {
            self.customer_phone = phone.clone();
        }

        let Some(next) = patch.status else {
            return;
        };
        self.status = next;

        match (prior, next) {
            (_, SlotStatus::Available) => self.reset(),
            (SlotStatus::Available, SlotStatus::Sold) => self.sold_at = Some(now),
            (SlotStatus::Sold, SlotStatus::Paid) => self.paid_at = Some(now),
            (SlotStatus::Available, SlotStatus::Paid) => {
                tracing::warn!(number = self.number, "slot_paid_without_sale");
                self.sold_at = Some(now);
                self.paid_at = Some(now);
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.customer_name = None;
        self.customer_phone = None;
        self.sold_at = None;
        self.paid_at = None;
    }
}

/// Partial slot update. For the customer fields the outer `Option` says
/// whether the field is touched at all; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPatch {
    #[serde(default)]
    pub status: Option<SlotStatus>,
    #[serde(default, deserialize_with = "present")]
    pub customer_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub customer_phone: Option<Option<String>>,
}

impl SlotPatch {
    pub fn status(status: SlotStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn sell_to(name: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            status: Some(SlotStatus::Sold),
            customer_name: Some(Some(name.into())),
            customer_phone: Some(phone),
        }
    }
}

// A present key (even `null`) deserializes to `Some(..)`; a missing key
// falls back to `Default`, i.e. `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

//! WhatsApp texts sent to customers, in the raffle's fixed es-CO locale.

use serde::Serialize;

use crate::config::RaffleInfo;
use crate::stats::types::Customer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    PendingReminder,
    PaymentConfirmation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMessage {
    pub kind: MessageKind,
    pub text: String,
    /// `None` when the customer left no phone number.
    pub link: Option<String>,
}

/// Reminder while anything is owed, confirmation once fully paid.
pub fn message_for(customer: &Customer, raffle: &RaffleInfo) -> CustomerMessage {
    let (kind, text) = if customer.amount_pending > 0 {
        (
            MessageKind::PendingReminder,
            pending_reminder(customer, raffle),
        )
    } else {
        (
            MessageKind::PaymentConfirmation,
            payment_confirmation(customer, raffle),
        )
    };
    let link = customer
        .phone
        .as_deref()
        .map(|phone| whatsapp_link(phone, &text));
    CustomerMessage { kind, text, link }
}

/// Lists every slot the customer holds but asks only for what is still owed.
pub fn pending_reminder(customer: &Customer, raffle: &RaffleInfo) -> String {
    let count = customer.slot_numbers.len();
    let s = plural(count);
    format!(
        "Hola {name}, ¡espero que estés muy bien! 😊\n\n\
         Te escribo para recordarte sobre tu participación en la rifa que juega el {date}.\n\n\
         Tienes {count} puesto{s} reservado{s}: {slots}\n\n\
         Para confirmar tu participación, por favor realiza la consignación de {amount} a mi Nequi: {nequi}\n\n\
         ¡Muchas gracias por tu confianza! 🙏",
        name = customer.name,
        date = raffle.draw_date,
        slots = slot_list(&customer.slot_numbers),
        amount = format_cop(customer.amount_pending),
        nequi = raffle.manager_nequi,
    )
}

pub fn payment_confirmation(customer: &Customer, raffle: &RaffleInfo) -> String {
    format!(
        "¡Hola {name}! 🎉\n\n\
         ¡Muchas gracias por tu participación en la rifa! Tu pago ha sido confirmado exitosamente.\n\n\
         📋 Detalles de tu participación:\n\
         • Puesto{s}: {slots}\n\
         • Fecha del sorteo: {date}\n\
         • Premio: {prize}\n\
         • Juega con: {plays_with}\n\n\
         ¡Te deseo muchísima suerte! 🍀✨\n\n\
         Estaré atenta el día del sorteo para comunicarte si eres el ganador. ¡Que tengas un excelente día! 😊",
        name = customer.name,
        s = plural(customer.slot_numbers.len()),
        slots = slot_list(&customer.slot_numbers),
        date = raffle.draw_date,
        prize = raffle.prize,
        plays_with = raffle.plays_with,
    )
}

/// `https://wa.me/<number>?text=<encoded>`. Ten-digit local numbers get the
/// Colombian `57` prefix.
pub fn whatsapp_link(phone: &str, text: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(phone),
        urlencoding::encode(text)
    )
}

pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 && !digits.starts_with("57") {
        format!("57{digits}")
    } else {
        digits
    }
}

/// `$1.250.000`
pub fn format_cop(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

fn slot_list(numbers: &[u32]) -> String {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(|n| format!("{n:02}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural(count: usize) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raffle() -> RaffleInfo {
        RaffleInfo {
            manager_name: "María Gómez".into(),
            manager_phone: "3176964215".into(),
            manager_nequi: "3177313639".into(),
            draw_date: "22 de agosto de 2024".into(),
            plays_with: "las 2 últimas cifras de la Lotería de Santander".into(),
            prize: "Cafetera".into(),
        }
    }

    fn customer(slots: Vec<u32>, pending: u64) -> Customer {
        Customer {
            name: "Ana".into(),
            phone: Some("300 123 4567".into()),
            slot_count: slots.len() as u64,
            slot_numbers: slots,
            amount_paid: 0,
            amount_pending: pending,
        }
    }

    #[test]
    fn test_format_cop() {
        assert_eq!(format_cop(0), "$0");
        assert_eq!(format_cop(5000), "$5.000");
        assert_eq!(format_cop(125_000), "$125.000");
        assert_eq!(format_cop(1_250_000), "$1.250.000");
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("300 123-4567"), "573001234567");
        assert_eq!(normalize_phone("+57 300 123 4567"), "573001234567");
        assert_eq!(normalize_phone("5712345678"), "5712345678");
        assert_eq!(normalize_phone("12345"), "12345");
    }

    #[test]
    fn test_pending_reminder_lists_sorted_padded_slots() {
        let text = pending_reminder(&customer(vec![42, 7], 10_000), &raffle());
        assert!(text.starts_with("Hola Ana,"));
        assert!(text.contains("Tienes 2 puestos reservados: 07, 42"));
        assert!(text.contains("consignación de $10.000 a mi Nequi: 3177313639"));
    }

    #[test]
    fn test_pending_reminder_asks_only_for_unpaid_slots() {
        let mut partly_paid = customer(vec![4, 9, 15], 5000);
        partly_paid.amount_paid = 10_000;
        let text = pending_reminder(&partly_paid, &raffle());
        assert!(text.contains("Tienes 3 puestos reservados: 04, 09, 15"));
        assert!(text.contains("consignación de $5.000 a mi Nequi"));
    }

    #[test]
    fn test_confirmation_singular() {
        let text = payment_confirmation(&customer(vec![3], 0), &raffle());
        assert!(text.contains("• Puesto: 03\n"));
        assert!(text.contains("• Premio: Cafetera"));
    }

    #[test]
    fn test_message_for_picks_by_pending_amount() {
        let pending = message_for(&customer(vec![1], 5000), &raffle());
        assert_eq!(pending.kind, MessageKind::PendingReminder);
        let link = pending.link.unwrap();
        assert!(link.starts_with("https://wa.me/573001234567?text=Hola%20Ana%2C"));

        let paid = message_for(&customer(vec![1], 0), &raffle());
        assert_eq!(paid.kind, MessageKind::PaymentConfirmation);
    }

    #[test]
    fn test_message_without_phone_has_no_link() {
        let mut c = customer(vec![1], 0);
        c.phone = None;
        assert!(message_for(&c, &raffle()).link.is_none());
    }
}

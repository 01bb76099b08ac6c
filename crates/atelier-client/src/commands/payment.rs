//! Mock payment commands.
//!
//! No money moves: card fields are format-checked, a processing delay is
//! simulated, and the order is confirmed.  Free-trial orders skip the
//! card form entirely.

use serde::Deserialize;
use tracing::info;

use atelier_shared::types::OrderId;
use atelier_shared::ValidationError;
use atelier_store::{Order, PartyRole};

use crate::commands::hiring::OrderDto;
use crate::error::Result;
use crate::events::{notify, Notice, EVENT_PAYMENT_CONFIRMED};
use crate::state::{lock, SharedState};

/// Card form input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub name: String,
    pub number: String,
    pub expiry: String,
    pub cvc: String,
}

/// Group a card number into blocks of four digits, dropping everything
/// that is not a digit.
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).take(16).collect();
    digits
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize an expiry input to `MM/YY`.
pub fn format_expiry(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(4).collect();
    if digits.len() <= 2 {
        digits
    } else {
        format!("{}/{}", &digits[..2], &digits[2..])
    }
}

fn validate_card(card: &CardDetails) -> std::result::Result<(), ValidationError> {
    if card.name.trim().is_empty() {
        return Err(ValidationError::MissingField("cardName"));
    }

    let digits: String = card
        .number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.len() != 16 {
        return Err(ValidationError::InvalidCardNumber);
    }

    let expiry = card.expiry.trim();
    let valid_expiry = expiry.is_ascii()
        && expiry.len() == 5
        && expiry.as_bytes()[2] == b'/'
        && expiry[..2]
            .parse::<u8>()
            .map(|month| (1..=12).contains(&month))
            .unwrap_or(false)
        && expiry[3..].chars().all(|c| c.is_ascii_digit());
    if !valid_expiry {
        return Err(ValidationError::InvalidExpiry);
    }

    if card.cvc.len() != 3 || !card.cvc.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidCvc);
    }

    Ok(())
}

/// Pay for an order.  Free-trial orders are confirmed without touching
/// the card fields.
pub async fn confirm_payment(
    state: &SharedState,
    id: OrderId,
    card: &CardDetails,
) -> Result<OrderDto> {
    let (order, latency) = {
        let guard = lock(state)?;
        guard.current_user()?;
        (guard.store.order(id)?, guard.config.payment_latency())
    };

    if order.is_free() {
        return confirm_free_booking(state, id).await;
    }

    if let Err(err) = validate_card(card) {
        let guard = lock(state)?;
        notify(
            guard.notice_tx.as_ref(),
            Notice::error(
                err.notice_title(),
                "Please fill in all required payment fields.",
            ),
        );
        return Err(err.into());
    }

    // Simulated card processing; always succeeds.
    tokio::time::sleep(latency).await;

    let guard = lock(state)?;
    let paid = guard.store.mark_order_paid(id)?;

    info!(order = %paid.id, event = EVENT_PAYMENT_CONFIRMED, "payment processed");
    notify(
        guard.notice_tx.as_ref(),
        Notice::success("Payment successful!", "Your booking has been confirmed."),
    );

    Ok(dto_for_session(&guard, &paid))
}

/// Confirm a free-trial booking without payment details.
pub async fn confirm_free_booking(state: &SharedState, id: OrderId) -> Result<OrderDto> {
    let latency = {
        let guard = lock(state)?;
        guard.current_user()?;
        guard.store.order(id)?;
        guard.config.request_latency()
    };

    tokio::time::sleep(latency).await;

    let guard = lock(state)?;
    let paid = guard.store.mark_order_paid(id)?;

    info!(order = %paid.id, event = EVENT_PAYMENT_CONFIRMED, "free booking confirmed");
    notify(
        guard.notice_tx.as_ref(),
        Notice::success(
            "Booking confirmed!",
            "Your free trial session has been booked.",
        ),
    );

    Ok(dto_for_session(&guard, &paid))
}

fn dto_for_session(guard: &std::sync::MutexGuard<'_, crate::state::AppState>, order: &Order) -> OrderDto {
    let role = guard
        .session
        .as_ref()
        .and_then(|user| order.role_of(user.id))
        .unwrap_or(PartyRole::Client);
    OrderDto::as_seen_by(order, role)
}

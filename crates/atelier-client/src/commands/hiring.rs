//! Hire-request commands.
//!
//! A hire request becomes one canonical [`Order`] record; the creator
//! sees the same record as a booking.  Recording the order and the
//! conversation update is a single store transaction.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use atelier_shared::constants::{FREE_TRIAL_BUDGET, OPEN_DEADLINE};
use atelier_shared::types::{OrderId, ServiceId, UserId};
use atelier_shared::ValidationError;
use atelier_store::{Order, OrderStatus, PartyRole};

use crate::error::Result;
use crate::events::{notify, Notice, EVENT_BOOKING_REQUESTED};
use crate::state::{lock, SharedState};

/// Form input for a hire request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HireRequest {
    pub service_id: ServiceId,
    pub description: String,
    /// Whole-currency budget; `None` falls back to the service's free
    /// trial.
    pub budget: Option<u32>,
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    pub counterpart_name: String,
    pub counterpart_avatar: String,
    pub service_name: String,
    pub description: String,
    pub budget: String,
    pub deadline: String,
    pub status: OrderStatus,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
}

impl OrderDto {
    pub(crate) fn as_seen_by(order: &Order, role: PartyRole) -> Self {
        let other = order.counterpart(role);
        Self {
            id: order.id.to_string(),
            counterpart_name: other.name,
            counterpart_avatar: other.avatar,
            service_name: order.service_name.clone(),
            description: order.description.clone(),
            budget: order.budget.clone(),
            deadline: order.deadline.clone(),
            status: order.status,
            created_at: order.created_at.to_rfc3339(),
            paid_at: order.paid_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Send a booking request for one of a creator's services.
///
/// Appends a pending order and notifies the creator's conversation
/// thread; the caller is then routed to payment.
pub async fn send_hire_request(state: &SharedState, request: HireRequest) -> Result<OrderDto> {
    if request.description.trim().is_empty() {
        let guard = lock(state)?;
        let err = ValidationError::MissingField("description");
        notify(
            guard.notice_tx.as_ref(),
            Notice::error(err.notice_title(), "Please fill in all required fields."),
        );
        return Err(err.into());
    }

    let (latency, order) = {
        let guard = lock(state)?;
        let user = guard.current_user()?;
        let service = guard.store.service(request.service_id)?;

        // No budget given means the booking rides on the free trial.
        let budget = match request.budget {
            Some(amount) => format!("${amount}"),
            None => FREE_TRIAL_BUDGET.to_string(),
        };

        let order = Order {
            id: OrderId::new(),
            client_id: user.id,
            client_name: user.name.clone(),
            client_avatar: user.avatar.clone(),
            creator_id: service.provider.id,
            creator_name: service.provider.name.clone(),
            creator_avatar: service.provider.avatar.clone(),
            service_id: service.id,
            service_name: service.title.clone(),
            description: request.description.trim().to_string(),
            budget,
            deadline: request
                .deadline
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| OPEN_DEADLINE.to_string()),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            paid_at: None,
        };

        (guard.config.request_latency(), order)
    };

    // Simulated backend delay; always resolves.
    tokio::time::sleep(latency).await;

    let guard = lock(state)?;
    let recorded = guard.store.record_hire(order)?;

    info!(order = %recorded.id, event = EVENT_BOOKING_REQUESTED, "booking requested");
    notify(
        guard.notice_tx.as_ref(),
        Notice::success(
            "Booking request sent!",
            "The creator has been notified of your request.",
        ),
    );

    Ok(OrderDto::as_seen_by(&recorded, PartyRole::Client))
}

/// Orders placed by the signed-in user.
pub fn list_orders(state: &SharedState) -> Result<Vec<OrderDto>> {
    let guard = lock(state)?;
    let user = guard.current_user()?;

    let orders = guard.store.orders_for_client(user.id)?;
    Ok(orders
        .iter()
        .map(|o| OrderDto::as_seen_by(o, PartyRole::Client))
        .collect())
}

/// Bookings received by the signed-in user: the creator-side view of the
/// same order records.
pub fn list_bookings(state: &SharedState) -> Result<Vec<OrderDto>> {
    let guard = lock(state)?;
    let user = guard.current_user()?;

    let orders = guard.store.bookings_for_creator(user.id)?;
    Ok(orders
        .iter()
        .map(|o| OrderDto::as_seen_by(o, PartyRole::Creator))
        .collect())
}

/// One order, shown from the side the signed-in user is on.
pub fn get_order(state: &SharedState, id: OrderId) -> Result<OrderDto> {
    let guard = lock(state)?;
    let user = guard.current_user()?;

    let order = guard.store.order(id)?;
    let role = order
        .role_of(user.id)
        .ok_or(atelier_store::StoreError::NotFound)?;
    Ok(OrderDto::as_seen_by(&order, role))
}

/// The services a creator offers, for the hire form's service picker.
pub fn creator_services(state: &SharedState, creator: UserId) -> Result<Vec<super::services::ServiceDto>> {
    super::services::list_for_provider(state, creator)
}

//! Dashboard summary for the signed-in user.

use serde::Serialize;

use atelier_store::PartyRole;

use crate::commands::hiring::OrderDto;
use crate::error::Result;
use crate::state::{lock, SharedState};

/// Everything the dashboard view renders, assembled in one pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Orders the user placed as a client, newest first.
    pub orders: Vec<OrderDto>,
    /// Bookings the user received as a creator, newest first.
    pub bookings: Vec<OrderDto>,
    pub portfolio_count: usize,
    pub service_count: usize,
    pub unread_messages: usize,
}

pub fn dashboard(state: &SharedState) -> Result<DashboardSummary> {
    let guard = lock(state)?;
    let user = guard.current_user()?;

    let orders = guard
        .store
        .orders_for_client(user.id)?
        .iter()
        .map(|o| OrderDto::as_seen_by(o, PartyRole::Client))
        .collect();
    let bookings = guard
        .store
        .bookings_for_creator(user.id)?
        .iter()
        .map(|o| OrderDto::as_seen_by(o, PartyRole::Creator))
        .collect();

    Ok(DashboardSummary {
        orders,
        bookings,
        portfolio_count: guard.store.portfolios_for(user.id)?.len(),
        service_count: guard.store.services_for(user.id)?.len(),
        unread_messages: guard.store.unread_count(user.id)?,
    })
}

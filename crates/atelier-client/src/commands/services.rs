//! Service-listing commands.

use serde::{Deserialize, Serialize};
use tracing::info;

use atelier_shared::types::{ServiceId, UserId};
use atelier_shared::ValidationError;
use atelier_store::{Party, Service};

use crate::error::Result;
use crate::events::{notify, Notice};
use crate::state::{lock, SharedState};

/// Form input for a new service listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub title: String,
    pub description: String,
    pub category: String,
    pub free_offer: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub free_offer: bool,
    pub provider: Party,
    /// Mean review rating, absent until the first review lands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl ServiceDto {
    fn build(service: &Service, rating: Option<f32>) -> Self {
        Self {
            id: service.id.to_string(),
            title: service.title.clone(),
            description: service.description.clone(),
            category: service.category.clone(),
            free_offer: service.free_offer,
            provider: service.provider.clone(),
            rating,
        }
    }
}

/// Publish a service listing.
pub async fn create_service(state: &SharedState, input: NewService) -> Result<ServiceDto> {
    let missing = if input.title.trim().is_empty() {
        Some("title")
    } else if input.description.trim().is_empty() {
        Some("description")
    } else if input.category.trim().is_empty() {
        Some("category")
    } else {
        None
    };
    if let Some(field) = missing {
        let guard = lock(state)?;
        let err = ValidationError::MissingField(field);
        notify(
            guard.notice_tx.as_ref(),
            Notice::error(err.notice_title(), "Please fill in all required fields."),
        );
        return Err(err.into());
    }

    let (latency, provider) = {
        let guard = lock(state)?;
        let user = guard.current_user()?;
        (guard.config.request_latency(), Party::from(user))
    };

    tokio::time::sleep(latency).await;

    let service = Service {
        id: ServiceId::new(),
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        category: input.category.trim().to_string(),
        free_offer: input.free_offer,
        provider,
    };

    let guard = lock(state)?;
    let stored = guard.store.add_service(service)?;

    info!(service = %stored.id, "service published");
    notify(
        guard.notice_tx.as_ref(),
        Notice::success("Service created!", "Clients can now book this service."),
    );

    Ok(ServiceDto::build(&stored, None))
}

/// Every service listing, with current review averages.
pub fn list_services(state: &SharedState) -> Result<Vec<ServiceDto>> {
    let guard = lock(state)?;
    let services = guard.store.services()?;
    services
        .iter()
        .map(|s| Ok(ServiceDto::build(s, guard.store.average_rating(s.id)?)))
        .collect()
}

/// Services offered by one provider (the hire form's picker).
pub fn list_for_provider(state: &SharedState, provider: UserId) -> Result<Vec<ServiceDto>> {
    let guard = lock(state)?;
    let services = guard.store.services_for(provider)?;
    services
        .iter()
        .map(|s| Ok(ServiceDto::build(s, guard.store.average_rating(s.id)?)))
        .collect()
}

/// One service listing; the caller renders not-found on error.
pub fn get_service(state: &SharedState, id: ServiceId) -> Result<ServiceDto> {
    let guard = lock(state)?;
    let service = guard.store.service(id)?;
    let rating = guard.store.average_rating(id)?;
    Ok(ServiceDto::build(&service, rating))
}

//! Review commands.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use atelier_shared::constants::{MAX_RATING, MIN_RATING};
use atelier_shared::types::{ReviewId, ServiceId};
use atelier_shared::ValidationError;
use atelier_store::Review;

use crate::error::Result;
use crate::events::{notify, Notice};
use crate::state::{lock, SharedState};

/// Form input for a new review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub service_id: ServiceId,
    pub rating: u8,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: String,
    pub service_id: String,
    pub service_name: String,
    pub provider_name: String,
    pub rating: u8,
    pub content: String,
    pub author: String,
    pub avatar: String,
    pub date: String,
}

impl From<&Review> for ReviewDto {
    fn from(r: &Review) -> Self {
        Self {
            id: r.id.to_string(),
            service_id: r.service_id.to_string(),
            service_name: r.service_name.clone(),
            provider_name: r.provider_name.clone(),
            rating: r.rating,
            content: r.content.clone(),
            author: r.author.clone(),
            avatar: r.avatar.clone(),
            date: r.date.to_rfc3339(),
        }
    }
}

/// Publish a review of a service.
pub async fn submit_review(state: &SharedState, input: NewReview) -> Result<ReviewDto> {
    if input.content.trim().is_empty() {
        let guard = lock(state)?;
        let err = ValidationError::MissingField("review");
        notify(
            guard.notice_tx.as_ref(),
            Notice::error("Missing review", "Please write a review before submitting."),
        );
        return Err(err.into());
    }
    if !(MIN_RATING..=MAX_RATING).contains(&input.rating) {
        return Err(ValidationError::RatingOutOfRange(input.rating).into());
    }

    let (latency, review) = {
        let guard = lock(state)?;
        let user = guard.current_user()?;
        let service = guard.store.service(input.service_id)?;

        let review = Review {
            id: ReviewId::new(),
            service_id: service.id,
            service_name: service.title.clone(),
            provider_id: service.provider.id,
            provider_name: service.provider.name.clone(),
            rating: input.rating,
            content: input.content.trim().to_string(),
            author: user.name.clone(),
            author_id: user.id,
            avatar: user.avatar.clone(),
            date: Utc::now(),
        };

        (guard.config.request_latency(), review)
    };

    tokio::time::sleep(latency).await;

    let guard = lock(state)?;
    let stored = guard.store.add_review(review)?;

    info!(review = %stored.id, service = %stored.service_id, "review submitted");
    notify(
        guard.notice_tx.as_ref(),
        Notice::success("Review submitted!", "Thank you for your feedback."),
    );

    Ok(ReviewDto::from(&stored))
}

/// Reviews of one service, newest first.
pub fn reviews_for_service(state: &SharedState, id: ServiceId) -> Result<Vec<ReviewDto>> {
    let guard = lock(state)?;
    let reviews = guard.store.reviews_for_service(id)?;
    Ok(reviews.iter().map(ReviewDto::from).collect())
}

//! Accessors for [`Review`] records.  Reviews are immutable once written.

use atelier_shared::constants::KEY_REVIEWS;
use atelier_shared::types::ServiceId;

use crate::error::Result;
use crate::models::Review;
use crate::store::Store;

impl Store {
    /// Persist a review.  Rating bounds are validated by the client
    /// before the record reaches the store.
    pub fn add_review(&self, review: Review) -> Result<Review> {
        tracing::info!(review = %review.id, service = %review.service_id, rating = review.rating, "review saved");
        self.put(KEY_REVIEWS, review.clone())?;
        Ok(review)
    }

    /// Reviews of one service, newest first.
    pub fn reviews_for_service(&self, service: ServiceId) -> Result<Vec<Review>> {
        let mut reviews: Vec<Review> = self.read(KEY_REVIEWS)?;
        reviews.retain(|r| r.service_id == service);
        reviews.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(reviews)
    }

    /// Mean rating of a service, `None` when it has no reviews yet.
    pub fn average_rating(&self, service: ServiceId) -> Result<Option<f32>> {
        let reviews = self.reviews_for_service(service)?;
        if reviews.is_empty() {
            return Ok(None);
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        Ok(Some(sum as f32 / reviews.len() as f32))
    }
}

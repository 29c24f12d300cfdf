use super::review::{Review, ReviewFilter, TimestampError};
use tokio::sync::RwLock;
use tracing::debug;

/// Append-only in-memory review collection
pub struct ReviewStore {
    reviews: RwLock<Vec<Review>>,
}

impl ReviewStore {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            reviews: RwLock::new(reviews),
        }
    }

    /// Clone every review matching `filter`, in collection order
    pub async fn query(&self, filter: &ReviewFilter) -> Result<Vec<Review>, TimestampError> {
        let reviews = self.reviews.read().await;

        let mut selected = Vec::new();
        for review in reviews.iter() {
            if filter.matches(review)? {
                selected.push(review.clone());
            }
        }

        debug!(selected = selected.len(), total = reviews.len(), "Filtered reviews");
        Ok(selected)
    }

    pub async fn append(&self, review: Review) {
        let mut reviews = self.reviews.write().await;
        reviews.push(review);
        debug!(total = reviews.len(), "Appended review");
    }

    pub async fn count(&self) -> usize {
        self.reviews.read().await.len()
    }
}

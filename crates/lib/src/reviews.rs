//! Product review store.
//!
//! Reviews are filed once and never edited; the store generates their id
//! and date. Insertion is front-placed so the raw collection order is
//! already newest-first, and the per-product view re-sorts on the stored
//! date to keep that guarantee even across restored snapshots.

use crate::Result;
use crate::backend::Backend;
use crate::clock::Clock;
use crate::collection::{ChangeCallback, Collection, Placement};
use crate::constants::REVIEWS;
use crate::entity::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A customer review of one product.
///
/// `user_name` is the reviewer's display name captured at filing time, so a
/// later profile rename does not rewrite review history. References to the
/// product or user are never enforced; a dangling reference is tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique identifier, generated at filing time.
    pub id: EntityId,
    /// The reviewed product.
    pub product_id: EntityId,
    /// The reviewing user.
    pub user_id: EntityId,
    /// Reviewer display name at filing time.
    pub user_name: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Free-form review text.
    pub comment: String,
    /// Filing date, RFC3339.
    pub date: String,
}

impl Entity for Review {
    /// Reviews are immutable once filed.
    type Patch = ();

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn apply(&mut self, _patch: ()) {}
}

/// Typed store over the review collection.
pub struct ReviewStore {
    reviews: Collection<Review>,
    clock: Arc<dyn Clock>,
}

impl ReviewStore {
    /// Opens the review store over the shared backend, seeding the sample
    /// reviews on first run.
    pub(crate) fn open(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Result<Self> {
        let reviews = Collection::open(
            REVIEWS,
            Placement::Front,
            backend,
            crate::seed::seed_reviews(),
        )?;
        Ok(Self { reviews, clock })
    }

    /// Files a new review and returns its generated id.
    ///
    /// The rating is clamped to the 1-5 range; the date comes from the
    /// store's clock.
    pub fn add(
        &mut self,
        product_id: &EntityId,
        user_id: &EntityId,
        user_name: &str,
        rating: u8,
        comment: &str,
    ) -> Result<EntityId> {
        let review = Review {
            id: EntityId::from(Uuid::new_v4().to_string()),
            product_id: product_id.clone(),
            user_id: user_id.clone(),
            user_name: user_name.to_string(),
            rating: rating.clamp(1, 5),
            comment: comment.to_string(),
            date: self.clock.now_rfc3339(),
        };
        let id = review.id.clone();
        self.reviews.add(review)?;
        Ok(id)
    }

    /// All reviews across products, newest first.
    pub fn all(&self) -> &[Review] {
        self.reviews.all()
    }

    /// Reviews for one product, newest first.
    pub fn for_product(&self, product_id: &EntityId) -> Vec<&Review> {
        let mut reviews: Vec<&Review> = self
            .reviews
            .all()
            .iter()
            .filter(|r| &r.product_id == product_id)
            .collect();
        reviews.sort_by(|a, b| b.date.cmp(&a.date));
        reviews
    }

    /// Average rating for one product, `0.0` when it has no reviews.
    pub fn average_rating(&self, product_id: &EntityId) -> f32 {
        let reviews = self.for_product(product_id);
        if reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        sum as f32 / reviews.len() as f32
    }

    /// Registers a callback for persisted review changes.
    pub fn subscribe(&mut self, callback: Arc<ChangeCallback>) {
        self.reviews.subscribe(callback)
    }
}

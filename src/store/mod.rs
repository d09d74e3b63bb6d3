//! Tenant store module.
//!
//! Thread-safe in-memory storage for businesses, their review platforms and
//! privately collected feedback, plus the [`BusinessRepository`] seam the
//! platform selector reads and writes through.

mod business;
mod error;
#[cfg(test)]
mod tests;

pub use business::*;
pub use error::*;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Persistence contract the review-routing engine depends on.
///
/// Implementations must return platforms sorted by `order` and must make a
/// cursor write visible to later loads of the same business.
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Load a business (platforms included) by id.
    async fn load_business(&self, id: &str) -> Result<Business, StoreError>;

    /// Load a business (platforms included) by slug.
    async fn load_business_by_slug(&self, slug: &str) -> Result<Business, StoreError>;

    /// Persist a new rotation cursor value for a business.
    async fn advance_rotation_cursor(
        &self,
        business_id: &str,
        new_value: u64,
    ) -> Result<(), StoreError>;
}

/// Fields that may change on a business outside of its platform set.
#[derive(Debug, Clone, Default)]
pub struct BusinessUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// In-memory tenant store backed by lock-free concurrent maps.
///
/// # Examples
///
/// ```
/// use reviewgate::store::{PlatformDraft, Store};
///
/// let store = Store::new();
/// let business = store
///     .create_business("John's Cafe", "johns-cafe", "owner@johnscafe.com")
///     .unwrap();
///
/// let updated = store
///     .replace_platforms(
///         &business.id,
///         vec![PlatformDraft::new("Google Reviews", "https://g.page/r/x", 100)],
///     )
///     .unwrap();
/// assert_eq!(updated.platforms.len(), 1);
/// assert_eq!(store.business_count(), 1);
/// ```
pub struct Store {
    businesses: DashMap<String, Business>,
    slug_index: DashMap<String, String>,
    feedback: DashMap<String, Feedback>,
}

impl Store {
    /// Create a new empty Store.
    pub fn new() -> Self {
        Self {
            businesses: DashMap::new(),
            slug_index: DashMap::new(),
            feedback: DashMap::new(),
        }
    }

    /// Create a business with a fresh id, no platforms and a zero cursor.
    ///
    /// # Errors
    ///
    /// `InvalidSlug` if the slug is not lowercase alphanumeric + hyphen,
    /// `DuplicateSlug` if another business already owns it.
    pub fn create_business(
        &self,
        name: &str,
        slug: &str,
        email: &str,
    ) -> Result<Business, StoreError> {
        let business = Business::new(uuid::Uuid::new_v4().to_string(), name, slug, email);
        self.insert_business(business.clone())?;
        Ok(business)
    }

    /// Insert a fully formed business record, e.g. one seeded from config.
    pub fn insert_business(&self, mut business: Business) -> Result<(), StoreError> {
        if !is_valid_slug(&business.slug) {
            return Err(StoreError::InvalidSlug(business.slug));
        }

        match self.slug_index.entry(business.slug.clone()) {
            Entry::Occupied(_) => return Err(StoreError::DuplicateSlug(business.slug)),
            Entry::Vacant(slot) => {
                slot.insert(business.id.clone());
            }
        }

        business.platforms.sort_by_key(|p| p.order);
        self.businesses.insert(business.id.clone(), business);
        Ok(())
    }

    /// Get a business by id.
    pub fn get_business(&self, id: &str) -> Option<Business> {
        self.businesses.get(id).map(|entry| entry.value().clone())
    }

    /// Get a business by slug.
    pub fn get_business_by_slug(&self, slug: &str) -> Option<Business> {
        let id = self.slug_index.get(slug)?.value().clone();
        self.get_business(&id)
    }

    /// All businesses, oldest first.
    pub fn list_businesses(&self) -> Vec<Business> {
        let mut businesses: Vec<Business> = self
            .businesses
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        businesses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.slug.cmp(&b.slug)));
        businesses
    }

    pub fn business_count(&self) -> usize {
        self.businesses.len()
    }

    /// Update name and/or email. Empty strings are ignored.
    pub fn update_business(
        &self,
        id: &str,
        update: BusinessUpdate,
    ) -> Result<Business, StoreError> {
        let mut entry = self
            .businesses
            .get_mut(id)
            .ok_or_else(|| StoreError::BusinessNotFound(id.to_string()))?;

        let business = entry.value_mut();
        if let Some(name) = update.name.filter(|n| !n.is_empty()) {
            business.name = name;
        }
        if let Some(email) = update.email.filter(|e| !e.is_empty()) {
            business.email = email;
        }
        business.updated_at = Utc::now();
        Ok(business.clone())
    }

    /// Replace the whole platform set of a business.
    ///
    /// Previous platform ids are discarded. The caller is responsible for
    /// validating weights first.
    pub fn replace_platforms(
        &self,
        id: &str,
        drafts: Vec<PlatformDraft>,
    ) -> Result<Business, StoreError> {
        let mut entry = self
            .businesses
            .get_mut(id)
            .ok_or_else(|| StoreError::BusinessNotFound(id.to_string()))?;

        let business = entry.value_mut();
        business.platforms = business.build_platforms(drafts);
        business.updated_at = Utc::now();
        Ok(business.clone())
    }

    /// Remove a business together with its slug reservation and feedback.
    pub fn delete_business(&self, id: &str) -> Result<Business, StoreError> {
        let (_, business) = self
            .businesses
            .remove(id)
            .ok_or_else(|| StoreError::BusinessNotFound(id.to_string()))?;

        self.slug_index.remove(&business.slug);
        self.feedback.retain(|_, f| f.business_id != business.id);
        Ok(business)
    }

    /// Overwrite the rotation cursor.
    pub fn set_rotation_cursor(&self, id: &str, value: u64) -> Result<(), StoreError> {
        let mut entry = self
            .businesses
            .get_mut(id)
            .ok_or_else(|| StoreError::BusinessNotFound(id.to_string()))?;
        entry.value_mut().last_platform_index = value;
        Ok(())
    }

    /// Stamp the time of the latest review-page visit.
    pub fn record_visit(&self, id: &str) -> Result<(), StoreError> {
        let mut entry = self
            .businesses
            .get_mut(id)
            .ok_or_else(|| StoreError::BusinessNotFound(id.to_string()))?;
        entry.value_mut().last_visit_at = Some(Utc::now());
        Ok(())
    }

    /// Store feedback for an existing business.
    pub fn create_feedback(&self, input: NewFeedback) -> Result<Feedback, StoreError> {
        if !self.businesses.contains_key(&input.business_id) {
            return Err(StoreError::BusinessNotFound(input.business_id));
        }

        let feedback = Feedback {
            id: uuid::Uuid::new_v4().to_string(),
            business_id: input.business_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            message: input.message,
            rating: input.rating,
            stars: input.stars,
            wants_contact: input.wants_contact,
            read: false,
            created_at: Utc::now(),
        };
        self.feedback.insert(feedback.id.clone(), feedback.clone());
        Ok(feedback)
    }

    /// Feedback for one business, newest first.
    pub fn feedback_for_business(&self, business_id: &str) -> Vec<Feedback> {
        let mut items: Vec<Feedback> = self
            .feedback
            .iter()
            .filter(|entry| entry.value().business_id == business_id)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    pub fn mark_feedback_read(&self, id: &str) -> Result<Feedback, StoreError> {
        let mut entry = self
            .feedback
            .get_mut(id)
            .ok_or_else(|| StoreError::FeedbackNotFound(id.to_string()))?;
        entry.value_mut().read = true;
        Ok(entry.value().clone())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BusinessRepository for Store {
    async fn load_business(&self, id: &str) -> Result<Business, StoreError> {
        self.get_business(id)
            .ok_or_else(|| StoreError::BusinessNotFound(id.to_string()))
    }

    async fn load_business_by_slug(&self, slug: &str) -> Result<Business, StoreError> {
        self.get_business_by_slug(slug)
            .ok_or_else(|| StoreError::BusinessNotFound(slug.to_string()))
    }

    async fn advance_rotation_cursor(
        &self,
        business_id: &str,
        new_value: u64,
    ) -> Result<(), StoreError> {
        self.set_rotation_cursor(business_id, new_value)
    }
}

//! Seeded business configuration

use crate::store::{Business, PlatformDraft};
use serde::{Deserialize, Serialize};

/// A business declared in the config file and loaded into the store at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    pub name: String,
    pub slug: String,
    pub email: String,
    /// Review destinations, recomputed into platform records on load
    #[serde(default)]
    pub platforms: Vec<PlatformDraft>,
}

impl BusinessConfig {
    /// Build a fresh store record with a new id and a zero rotation cursor.
    pub fn to_business(&self) -> Business {
        let mut business = Business::new(
            uuid::Uuid::new_v4().to_string(),
            self.name.clone(),
            self.slug.clone(),
            self.email.clone(),
        );
        business.platforms = business.build_platforms(self.platforms.clone());
        business
    }
}

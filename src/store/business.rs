use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The sentiment a visitor picks on the review landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Happy,
    Neutral,
    Sad,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Happy => "happy",
            Sentiment::Neutral => "neutral",
            Sentiment::Sad => "sad",
        }
    }

    /// Private feedback rating for non-happy visits.
    pub fn feedback_rating(&self) -> Option<FeedbackRating> {
        match self {
            Sentiment::Happy => None,
            Sentiment::Neutral => Some(FeedbackRating::Neutral),
            Sentiment::Sad => Some(FeedbackRating::Sad),
        }
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" => Ok(Sentiment::Happy),
            "neutral" => Ok(Sentiment::Neutral),
            "sad" => Ok(Sentiment::Sad),
            _ => Err(format!("Unknown sentiment: {}", s)),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rating attached to privately collected feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackRating {
    Neutral,
    Sad,
}

impl FeedbackRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackRating::Neutral => "neutral",
            FeedbackRating::Sad => "sad",
        }
    }
}

impl fmt::Display for FeedbackRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A public review destination owned by one business.
///
/// Platforms are recreated with fresh ids on every settings save, so `order`
/// is the only positional identity that survives a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPlatform {
    pub id: String,
    pub business_id: String,
    /// Display label, e.g. "Google Reviews"
    pub name: String,
    /// Redirect target; empty means not configured
    pub url: String,
    /// Share of happy traffic, 0-100. Zero disables the platform.
    pub weight: u32,
    /// Round-robin sequence and tie-break key
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewPlatform {
    pub fn is_active(&self) -> bool {
        self.weight > 0
    }
}

/// Platform settings as submitted by the settings form or a config seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDraft {
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub weight: u32,
    /// Defaults to the draft's position in the submitted list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl PlatformDraft {
    pub fn new(name: impl Into<String>, url: impl Into<String>, weight: u32) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            weight,
            order: None,
        }
    }
}

/// A tenant and its review-routing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: String,
    /// Globally unique, URL-safe
    pub slug: String,
    pub name: String,
    /// Owner contact address for feedback notifications
    pub email: String,
    /// Always kept sorted by `order`
    pub platforms: Vec<ReviewPlatform>,
    /// Rotation cursor. Grows without bound; reduced modulo the active
    /// platform count at read time.
    pub last_platform_index: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit_at: Option<DateTime<Utc>>,
}

impl Business {
    /// Create a business with no platforms and a zeroed rotation cursor.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            email: email.into(),
            platforms: Vec::new(),
            last_platform_index: 0,
            created_at: now,
            updated_at: now,
            last_visit_at: None,
        }
    }

    /// Build platform records from drafts, discarding any previous identity.
    pub fn build_platforms(&self, drafts: Vec<PlatformDraft>) -> Vec<ReviewPlatform> {
        let now = Utc::now();
        let mut platforms: Vec<ReviewPlatform> = drafts
            .into_iter()
            .enumerate()
            .map(|(position, draft)| ReviewPlatform {
                id: uuid::Uuid::new_v4().to_string(),
                business_id: self.id.clone(),
                name: draft.name,
                url: draft.url,
                weight: draft.weight,
                order: draft.order.unwrap_or(position as u32),
                created_at: now,
                updated_at: now,
            })
            .collect();
        platforms.sort_by_key(|p| p.order);
        platforms
    }

    pub fn active_platform_count(&self) -> usize {
        self.platforms.iter().filter(|p| p.is_active()).count()
    }
}

/// Returns true if `slug` is non-empty lowercase ASCII alphanumerics and hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Privately captured feedback from a neutral or sad visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
    pub rating: FeedbackRating,
    pub stars: u8,
    #[serde(default)]
    pub wants_contact: bool,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for [`crate::store::Store::create_feedback`].
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub business_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub rating: FeedbackRating,
    pub stars: u8,
    pub wants_contact: bool,
}

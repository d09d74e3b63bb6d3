//! Owner notification for private feedback
//!
//! Delivery transport is pluggable through [`Notifier`]. The bundled
//! [`LogNotifier`] records notifications as structured log events, which is
//! what a deployment without outbound mail gets.

use crate::store::{Business, Feedback, Sentiment};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Notification delivery failures
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Delivers feedback notifications to business owners
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn feedback_received(
        &self,
        business: &Business,
        feedback: &Feedback,
    ) -> Result<(), NotifyError>;
}

/// Notifier that writes each notification to the log.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    include_content: bool,
}

impl LogNotifier {
    pub fn new(include_content: bool) -> Self {
        Self { include_content }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn feedback_received(
        &self,
        business: &Business,
        feedback: &Feedback,
    ) -> Result<(), NotifyError> {
        let subject = feedback_subject(business, feedback);
        if self.include_content {
            tracing::info!(
                to = %business.email,
                subject = %subject,
                feedback_id = %feedback.id,
                from_name = %feedback.name,
                from_email = %feedback.email,
                stars = feedback.stars,
                wants_contact = feedback.wants_contact,
                message = %feedback.message,
                "Feedback notification"
            );
        } else {
            tracing::info!(
                to = %business.email,
                subject = %subject,
                feedback_id = %feedback.id,
                stars = feedback.stars,
                wants_contact = feedback.wants_contact,
                "Feedback notification"
            );
        }
        Ok(())
    }
}

/// Subject line for an owner notification.
pub fn feedback_subject(business: &Business, feedback: &Feedback) -> String {
    format!("New {} feedback for {}", feedback.rating, business.name)
}

/// Links a review-request email offers, one per sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLinks {
    /// Landing page showing the sentiment selector
    pub review_url: String,
    pub happy: String,
    pub neutral: String,
    pub sad: String,
}

/// Build the review links for `slug` under `base_url`.
///
/// ```
/// use reviewgate::notify::review_links;
///
/// let links = review_links("https://reviews.example.com/", "johns-cafe");
/// assert_eq!(links.review_url, "https://reviews.example.com/review/johns-cafe");
/// assert_eq!(
///     links.happy,
///     "https://reviews.example.com/review/johns-cafe?sentiment=happy"
/// );
/// ```
pub fn review_links(base_url: &str, slug: &str) -> ReviewLinks {
    let review_url = format!("{}/review/{}", base_url.trim_end_matches('/'), slug);
    let link = |sentiment: Sentiment| format!("{}?sentiment={}", review_url, sentiment);
    ReviewLinks {
        happy: link(Sentiment::Happy),
        neutral: link(Sentiment::Neutral),
        sad: link(Sentiment::Sad),
        review_url,
    }
}

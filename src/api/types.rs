//! Request, response and error types for the HTTP API.

use crate::notify::ReviewLinks;
use crate::routing::WeightError;
use crate::store::{Business, Feedback, PlatformDraft, StoreError};
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// JSON body extractor whose rejections use the [`ApiError`] envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Error envelope returned by every endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    /// Offending request field, when one can be named
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub code: String,
}

impl ApiError {
    fn new(message: impl Into<String>, r#type: &str, param: Option<&str>, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.into(),
                r#type: r#type.to_string(),
                param: param.map(str::to_string),
                code: code.to_string(),
            },
        }
    }

    /// 400 for malformed or incomplete input.
    pub fn bad_request(message: &str) -> Self {
        Self::new(message, "invalid_request_error", None, "invalid_request_error")
    }

    /// 400 naming the field at fault.
    pub fn invalid_field(param: &str, message: &str) -> Self {
        Self::new(message, "invalid_request_error", Some(param), "invalid_request_error")
    }

    /// 400 for a rejected platform weight configuration.
    pub fn invalid_configuration(err: &WeightError) -> Self {
        Self::new(
            err.to_string(),
            "invalid_request_error",
            Some("platforms"),
            "invalid_configuration",
        )
    }

    /// 404 for an unknown business id or slug.
    pub fn business_not_found(key: &str) -> Self {
        Self::new(
            format!("Business '{}' not found", key),
            "not_found_error",
            None,
            "business_not_found",
        )
    }

    /// 404 for an unknown feedback id.
    pub fn feedback_not_found(id: &str) -> Self {
        Self::new(
            format!("Feedback '{}' not found", id),
            "not_found_error",
            None,
            "feedback_not_found",
        )
    }

    /// 409 for a slug already in use.
    pub fn slug_taken(slug: &str) -> Self {
        Self::new(
            format!("A business with slug '{}' already exists", slug),
            "conflict_error",
            Some("slug"),
            "slug_taken",
        )
    }

    fn status_code(&self) -> StatusCode {
        match self.error.code.as_str() {
            "invalid_request_error" | "invalid_configuration" => StatusCode::BAD_REQUEST,
            "payload_too_large" => StatusCode::PAYLOAD_TOO_LARGE,
            "unsupported_media_type" => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "business_not_found" | "feedback_not_found" => StatusCode::NOT_FOUND,
            "slug_taken" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BusinessNotFound(key) => ApiError::business_not_found(&key),
            StoreError::FeedbackNotFound(id) => ApiError::feedback_not_found(&id),
            StoreError::DuplicateSlug(slug) => ApiError::slug_taken(&slug),
            StoreError::InvalidSlug(_) => ApiError::invalid_field(
                "slug",
                "Slug must contain only lowercase letters, numbers, and hyphens",
            ),
        }
    }
}

impl From<WeightError> for ApiError {
    fn from(err: WeightError) -> Self {
        ApiError::invalid_configuration(&err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => {
                Self::new(message, "invalid_request_error", None, "payload_too_large")
            }
            StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                Self::new(message, "invalid_request_error", None, "unsupported_media_type")
            }
            _ => ApiError::bad_request(&message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Query string of the review landing page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewQuery {
    pub sentiment: Option<String>,
}

/// Landing page payload when no sentiment was chosen yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLanding {
    pub business_name: String,
    pub slug: String,
    pub links: ReviewLinksBody,
}

/// Serializable mirror of [`ReviewLinks`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLinksBody {
    pub review_url: String,
    pub happy: String,
    pub neutral: String,
    pub sad: String,
}

impl From<ReviewLinks> for ReviewLinksBody {
    fn from(links: ReviewLinks) -> Self {
        Self {
            review_url: links.review_url,
            happy: links.happy,
            neutral: links.neutral,
            sad: links.sad,
        }
    }
}

/// Returned to a happy visitor when no platform is enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgment {
    pub message: String,
}

impl Default for Acknowledgment {
    fn default() -> Self {
        Self {
            message: "Thank you for your feedback!".to_string(),
        }
    }
}

/// What a private feedback form needs to render and submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackForm {
    pub business_id: String,
    pub business_name: String,
    pub rating: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackFormQuery {
    pub rating: Option<String>,
}

/// `POST /api/business` body. Fields are optional so missing ones produce a
/// 400 with a readable message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBusinessRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub email: Option<String>,
}

/// `PATCH /api/business/{id}` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBusinessRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub platforms: Option<Vec<PlatformInput>>,
}

/// One platform as submitted by the settings form. The weight may be any
/// JSON number; [`platform_drafts`] rejects the ones that are not weights.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformInput {
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub weight: Number,
    #[serde(default)]
    pub order: Option<u32>,
}

impl PlatformInput {
    fn into_draft(self, index: usize) -> Result<PlatformDraft, WeightError> {
        let weight = self
            .weight
            .as_u64()
            .and_then(|w| u32::try_from(w).ok())
            .ok_or_else(|| WeightError::NotAWholeNumber {
                index,
                value: self.weight.to_string(),
            })?;
        Ok(PlatformDraft {
            name: self.name,
            url: self.url,
            weight,
            order: self.order,
        })
    }
}

/// Convert submitted platforms, rejecting the first weight that is not a
/// non-negative integer.
pub fn platform_drafts(inputs: Vec<PlatformInput>) -> Result<Vec<PlatformDraft>, WeightError> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| input.into_draft(index))
        .collect()
}

/// `POST /api/feedback` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub business_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub rating: Option<String>,
    /// Any JSON number; only whole numbers in range are accepted
    pub stars: Option<Number>,
    pub wants_contact: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessList {
    pub businesses: Vec<Business>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessResponse {
    pub success: bool,
    pub business: Business,
    pub links: ReviewLinksBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackList {
    pub feedback: Vec<Feedback>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

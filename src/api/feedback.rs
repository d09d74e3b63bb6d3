//! Private feedback endpoints.

use crate::api::{
    ApiError, ApiJson, AppState, CreateFeedbackRequest, FeedbackForm, FeedbackFormQuery,
    FeedbackResponse,
};
use crate::store::{FeedbackRating, NewFeedback, Sentiment};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

const MIN_STARS: u64 = 1;
const MAX_STARS: u64 = 5;

/// GET /feedback/{slug} - What the feedback form for a business needs.
pub async fn form(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<FeedbackFormQuery>,
) -> Result<Json<FeedbackForm>, ApiError> {
    let business = state
        .store
        .get_business_by_slug(&slug)
        .ok_or_else(|| ApiError::business_not_found(&slug))?;

    let rating = query
        .rating
        .as_deref()
        .and_then(|r| r.parse::<Sentiment>().ok())
        .and_then(|s| s.feedback_rating())
        .map(|r| r.as_str().to_string());

    Ok(Json(FeedbackForm {
        business_id: business.id,
        business_name: business.name,
        rating,
    }))
}

/// POST /api/feedback - Store feedback and notify the owner.
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateFeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let input = parse_feedback(request)?;

    let business = state
        .store
        .get_business(&input.business_id)
        .ok_or_else(|| ApiError::business_not_found(&input.business_id))?;

    let feedback = state.store.create_feedback(input)?;
    crate::metrics::record_feedback(feedback.rating);
    tracing::info!(
        business = %business.slug,
        feedback_id = %feedback.id,
        rating = %feedback.rating,
        stars = feedback.stars,
        "Stored private feedback"
    );

    if let Err(e) = state.notifier.feedback_received(&business, &feedback).await {
        tracing::error!(
            business = %business.slug,
            feedback_id = %feedback.id,
            error = %e,
            "Failed to notify business owner"
        );
    }

    Ok(Json(FeedbackResponse {
        success: true,
        feedback,
    }))
}

/// POST /api/feedback/{id}/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let feedback = state.store.mark_feedback_read(&id)?;
    Ok(Json(FeedbackResponse {
        success: true,
        feedback,
    }))
}

fn parse_feedback(request: CreateFeedbackRequest) -> Result<NewFeedback, ApiError> {
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let (Some(business_id), Some(name), Some(email), Some(message), Some(rating), Some(stars)) = (
        present(request.business_id),
        present(request.name),
        present(request.email),
        present(request.message),
        present(request.rating),
        request.stars,
    ) else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    let rating = match rating.as_str() {
        "neutral" => FeedbackRating::Neutral,
        "sad" => FeedbackRating::Sad,
        _ => return Err(ApiError::invalid_field("rating", "Invalid rating")),
    };

    let Some(stars) = stars
        .as_u64()
        .filter(|s| (MIN_STARS..=MAX_STARS).contains(s))
    else {
        return Err(ApiError::invalid_field("stars", "Invalid star rating"));
    };

    Ok(NewFeedback {
        business_id,
        name,
        email,
        phone: request.phone.unwrap_or_default(),
        message,
        rating,
        stars: stars as u8,
        wants_contact: request.wants_contact.unwrap_or(false),
    })
}

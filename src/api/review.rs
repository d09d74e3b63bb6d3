//! Review landing endpoint.

use crate::api::{Acknowledgment, ApiError, AppState, ReviewLanding, ReviewQuery};
use crate::notify::review_links;
use crate::store::Sentiment;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;

/// GET /review/{slug} - Route a visitor by the sentiment they picked.
///
/// Without a sentiment the landing payload (business name plus one link per
/// sentiment) is returned. Happy visitors are redirected to a public review
/// platform; neutral and sad ones to the private feedback form.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<ReviewQuery>,
) -> Result<Response, ApiError> {
    let business = state
        .store
        .get_business_by_slug(&slug)
        .ok_or_else(|| ApiError::business_not_found(&slug))?;

    let sentiment = query
        .sentiment
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<Sentiment>)
        .transpose()
        .map_err(|e| ApiError::invalid_field("sentiment", &e))?;

    if let Err(e) = state.store.record_visit(&business.id) {
        tracing::debug!(business = %slug, error = %e, "Could not stamp visit");
    }
    crate::metrics::record_visit(sentiment);

    let Some(sentiment) = sentiment else {
        let links = review_links(&state.config.app.base_url, &business.slug);
        return Ok(Json(ReviewLanding {
            business_name: business.name,
            slug: business.slug,
            links: links.into(),
        })
        .into_response());
    };

    if let Some(rating) = sentiment.feedback_rating() {
        tracing::debug!(business = %slug, rating = %rating, "Routing to private feedback");
        let target = format!("/feedback/{}?rating={}", business.slug, rating);
        return Ok(Redirect::temporary(&target).into_response());
    }

    match state.selector.select_platform(&business).await {
        Some(platform) if !platform.url.is_empty() => {
            tracing::info!(
                business = %slug,
                platform = %platform.name,
                "Redirecting happy visitor"
            );
            Ok(Redirect::temporary(&platform.url).into_response())
        }
        Some(platform) => {
            tracing::warn!(
                business = %slug,
                platform = %platform.name,
                "Selected platform has no URL configured"
            );
            Ok(Json(Acknowledgment::default()).into_response())
        }
        None => Ok(Json(Acknowledgment::default()).into_response()),
    }
}

//! Business administration endpoints.

use crate::api::{
    platform_drafts, ApiError, ApiJson, AppState, BusinessList, BusinessResponse,
    CreateBusinessRequest, FeedbackList, SuccessResponse, UpdateBusinessRequest,
};
use crate::notify::review_links;
use crate::routing::validate_platform_drafts;
use crate::store::{Business, BusinessUpdate};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

fn respond(state: &AppState, business: Business) -> Json<BusinessResponse> {
    let links = review_links(&state.config.app.base_url, &business.slug);
    Json(BusinessResponse {
        success: true,
        business,
        links: links.into(),
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::invalid_field(field, &format!("{} is required", field)))
}

/// GET /api/business
pub async fn list(State(state): State<Arc<AppState>>) -> Json<BusinessList> {
    Json(BusinessList {
        businesses: state.store.list_businesses(),
    })
}

/// POST /api/business - Register a business with no platforms yet.
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateBusinessRequest>,
) -> Result<(StatusCode, Json<BusinessResponse>), ApiError> {
    let name = required(request.name, "name")?;
    let slug = required(request.slug, "slug")?;
    let email = required(request.email, "email")?;

    let business = state.store.create_business(&name, &slug, &email)?;
    tracing::info!(business_id = %business.id, slug = %business.slug, "Created business");

    Ok((StatusCode::CREATED, respond(&state, business)))
}

/// GET /api/business/{id}
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BusinessResponse>, ApiError> {
    let business = state
        .store
        .get_business(&id)
        .ok_or_else(|| ApiError::business_not_found(&id))?;
    Ok(respond(&state, business))
}

/// PATCH /api/business/{id} - Save settings.
///
/// A submitted platform list is validated as a whole before anything is
/// written; a rejected save leaves name, email and platforms untouched.
/// An accepted list replaces every existing platform.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateBusinessRequest>,
) -> Result<Json<BusinessResponse>, ApiError> {
    if state.store.get_business(&id).is_none() {
        return Err(ApiError::business_not_found(&id));
    }

    let platforms = match request.platforms.map(platform_drafts).transpose() {
        Ok(platforms) => platforms,
        Err(e) => {
            tracing::info!(business_id = %id, error = %e, "Rejected platform settings");
            return Err(e.into());
        }
    };

    if let Some(ref platforms) = platforms {
        if let Err(e) = validate_platform_drafts(platforms) {
            tracing::info!(business_id = %id, error = %e, "Rejected platform settings");
            return Err(e.into());
        }
    }

    let mut business = state.store.update_business(
        &id,
        BusinessUpdate {
            name: request.name,
            email: request.email,
        },
    )?;

    if let Some(platforms) = platforms {
        business = state.store.replace_platforms(&id, platforms)?;
        tracing::info!(
            business_id = %id,
            platforms = business.platforms.len(),
            active = business.active_platform_count(),
            "Replaced review platforms"
        );
    }

    Ok(respond(&state, business))
}

/// DELETE /api/business/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let business = state.store.delete_business(&id)?;
    tracing::info!(business_id = %id, slug = %business.slug, "Deleted business");
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/business/{id}/feedback - Newest first.
pub async fn feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FeedbackList>, ApiError> {
    if state.store.get_business(&id).is_none() {
        return Err(ApiError::business_not_found(&id));
    }
    Ok(Json(FeedbackList {
        feedback: state.store.feedback_for_business(&id),
    }))
}

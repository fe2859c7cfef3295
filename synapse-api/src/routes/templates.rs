//! Template Routes
//!
//! Read-only catalog of predefined brain configurations, plus an endpoint
//! that creates a brain from one. The template only seeds the create
//! request; the resulting brain goes through normal registry validation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::{ApiError, ApiResult};
use crate::services::{find_template, BRAIN_TEMPLATES};
use crate::state::AppState;
use crate::types::{
    BrainResponse, CreateBrainFromTemplateRequest, CreateBrainRequest, TemplateListResponse,
    TemplateResponse,
};

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /templates - The template catalog
#[utoipa::path(
    get,
    path = "/templates",
    tag = "Templates",
    responses(
        (status = 200, description = "All templates", body = TemplateListResponse),
    ),
)]
pub async fn list_templates() -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: BRAIN_TEMPLATES.iter().map(TemplateResponse::from).collect(),
        total: BRAIN_TEMPLATES.len(),
    })
}

/// GET /templates/{id} - One template
#[utoipa::path(
    get,
    path = "/templates/{id}",
    tag = "Templates",
    params(("id" = String, Path, description = "Template id")),
    responses(
        (status = 200, description = "The template", body = TemplateResponse),
        (status = 404, description = "Template not found", body = crate::error::ApiError),
    ),
)]
pub async fn get_template(Path(template_id): Path<String>) -> ApiResult<Json<TemplateResponse>> {
    let template =
        find_template(&template_id).ok_or_else(|| ApiError::template_not_found(&template_id))?;
    Ok(Json(TemplateResponse::from(template)))
}

/// POST /templates/{id}/create - Create a brain from a template
#[utoipa::path(
    post,
    path = "/templates/{id}/create",
    tag = "Templates",
    params(("id" = String, Path, description = "Template id")),
    request_body = CreateBrainFromTemplateRequest,
    responses(
        (status = 201, description = "Brain created", body = BrainResponse),
        (status = 400, description = "Validation failed", body = crate::error::ApiError),
        (status = 404, description = "Template not found", body = crate::error::ApiError),
    ),
)]
pub async fn create_brain_from_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
    Json(req): Json<CreateBrainFromTemplateRequest>,
) -> ApiResult<(StatusCode, Json<BrainResponse>)> {
    let template =
        find_template(&template_id).ok_or_else(|| ApiError::template_not_found(&template_id))?;

    let brain = state.registry.create(&CreateBrainRequest {
        name: req.name,
        description: Some(
            req.description
                .unwrap_or_else(|| template.description.to_string()),
        ),
        llm_provider: Some(template.llm_provider),
        model: Some(template.model.to_string()),
    })?;

    Ok((StatusCode::CREATED, Json(BrainResponse::from(&brain))))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the template router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/templates", get(list_templates))
        .route("/templates/:id", get(get_template))
        .route("/templates/:id/create", post(create_brain_from_template))
}

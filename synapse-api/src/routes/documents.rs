//! Document Routes
//!
//! Multipart upload plus listing, fetching, and deletion. The multipart
//! field name is `files` and may repeat; everything else in the body is
//! ignored.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::services::documents::UploadFile;
use crate::state::AppState;
use crate::types::{DocumentListResponse, DocumentResponse, UploadResponse};

/// Upload body cap: a full batch of maximum-size files plus encoding
/// overhead.
const UPLOAD_BODY_LIMIT: usize = 21 * 50 * 1024 * 1024;

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /brains/{id}/documents - Upload a batch of files
#[utoipa::path(
    post,
    path = "/brains/{id}/documents",
    tag = "Documents",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 201, description = "All files stored", body = UploadResponse),
        (status = 400, description = "Batch rejected", body = crate::error::ApiError),
        (status = 404, description = "Brain not found", body = crate::error::ApiError),
    ),
)]
pub async fn upload_documents(
    State(state): State<AppState>,
    Path(brain_id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation_failed(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("files") {
            continue;
        }
        let name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::missing_field("filename"))?;
        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation_failed(format!("Failed to read '{}': {}", name, e)))?
            .to_vec();
        files.push(UploadFile {
            name,
            content_type,
            bytes,
        });
    }

    let (metas, document_count) = state.documents.upload(brain_id, files).await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            files: metas.iter().map(DocumentResponse::from).collect(),
            document_count,
        }),
    ))
}

/// GET /brains/{id}/documents - List a brain's documents
#[utoipa::path(
    get,
    path = "/brains/{id}/documents",
    tag = "Documents",
    params(("id" = String, Path, format = "uuid")),
    responses(
        (status = 200, description = "The documents", body = DocumentListResponse),
        (status = 404, description = "Brain not found", body = crate::error::ApiError),
    ),
)]
pub async fn list_documents(
    State(state): State<AppState>,
    Path(brain_id): Path<Uuid>,
) -> ApiResult<Json<DocumentListResponse>> {
    let documents = state.documents.list(brain_id).await?;
    Ok(Json(DocumentListResponse {
        total: documents.len(),
        documents: documents.iter().map(DocumentResponse::from).collect(),
    }))
}

/// GET /brains/{id}/documents/{name} - Fetch one document's metadata
#[utoipa::path(
    get,
    path = "/brains/{id}/documents/{name}",
    tag = "Documents",
    params(
        ("id" = String, Path, format = "uuid"),
        ("name" = String, Path),
    ),
    responses(
        (status = 200, description = "The document", body = DocumentResponse),
        (status = 404, description = "Brain or document not found", body = crate::error::ApiError),
    ),
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path((brain_id, name)): Path<(Uuid, String)>,
) -> ApiResult<Json<DocumentResponse>> {
    let meta = state.documents.get(brain_id, &name).await?;
    Ok(Json(DocumentResponse::from(&meta)))
}

/// DELETE /brains/{id}/documents/{name} - Delete one document
#[utoipa::path(
    delete,
    path = "/brains/{id}/documents/{name}",
    tag = "Documents",
    params(
        ("id" = String, Path, format = "uuid"),
        ("name" = String, Path),
    ),
    responses(
        (status = 204, description = "Document deleted and index refreshed"),
        (status = 404, description = "Brain or document not found", body = crate::error::ApiError),
    ),
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Path((brain_id, name)): Path<(Uuid, String)>,
) -> ApiResult<StatusCode> {
    state.documents.delete(brain_id, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the document router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/brains/:id/documents",
            post(upload_documents).get(list_documents),
        )
        .route(
            "/brains/:id/documents/:name",
            get(get_document).delete(delete_document),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

//! File handlers: list, upload, download, delete, create folder.

use std::io;

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;

use nashub_core::error::AppError;
use nashub_service::file::DirectoryListing;

use crate::dto::request::{CreateFolderRequest, PathQuery};
use crate::dto::response::{FolderResponse, MessageResponse, UploadResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "file";

/// GET /files?path=
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Result<Json<DirectoryListing>, ApiError> {
    let Query(query) = query?;
    let listing = state
        .file_service
        .list(&auth, query.path.as_deref())
        .await?;
    Ok(Json(listing))
}

/// POST /files/upload?path=
///
/// Streams the `file` field straight to disk; other fields are skipped.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<PathQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let Query(query) = query?;
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("Uploaded file has no name"))?;
        let body = Box::pin(field.map_err(io::Error::other));

        let uploaded = state
            .file_service
            .upload(&auth, query.path.as_deref(), &filename, body)
            .await?;

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            filename: uploaded.filename,
            size: uploaded.size,
            path: uploaded.path,
        }));
    }

    Err(AppError::validation("No file uploaded").into())
}

/// GET /files/download?path=
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let path = query
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("File path required"))?;

    let download = state.file_service.download(&auth, &path).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        download.entry.name.replace(['"', '\\', '\r', '\n'], "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_LENGTH, download.entry.size.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(download.stream),
    )
        .into_response())
}

/// DELETE /files?path=
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(query) = query?;
    let path = query
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("File path required"))?;

    state.file_service.delete(&auth, &path).await?;
    Ok(Json(MessageResponse::new("Deleted successfully")))
}

/// POST /files/folder
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    let parent = if req.path.is_empty() { "/" } else { &req.path };
    let path = state
        .file_service
        .create_folder(&auth, parent, &req.name)
        .await?;

    Ok(Json(FolderResponse {
        message: "Folder created successfully".to_string(),
        path,
    }))
}

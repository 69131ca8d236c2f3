//! Request handlers for the record API.

use std::path::PathBuf;

use axum::extract::{Multipart, Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use verdant_ingest::{NewSubmission, UpdatePatch};
use verdant_types::ContentRecord;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub slug: String,
    pub cloudinary_path: String,
    pub cloudinary_url: String,
    pub git_status: String,
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<ContentRecord>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePostBody {
    pub title: Option<String>,
    pub image_alt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_ratio: Option<String>,
    pub video_url: Option<String>,
}

/// `POST /api/upload-post` — multipart submission of one image + metadata.
pub async fn upload_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let parts = read_submission(&state, multipart).await?;
    let Some((temp_image, original_filename)) = parts.image else {
        return Err(ApiError::bad_request("No image file provided"));
    };

    let submission = NewSubmission {
        title: parts.title.unwrap_or_default(),
        image_alt: parts.image_alt.unwrap_or_default(),
        temp_image: temp_image.clone(),
        original_filename,
        tags: parts
            .tags
            .as_deref()
            .map(split_tags)
            .unwrap_or_default(),
        image_ratio: parts.image_ratio,
        video_url: parts.video_url,
    };

    let result = state.ingestor.ingest(submission, Utc::now()).await;

    // On the success path the move consumed the temp file; on failure
    // before the move it is still around. Either way, cleanup failure is
    // tolerated.
    if let Err(e) = tokio::fs::remove_file(&temp_image).await {
        tracing::debug!(path = %temp_image.display(), error = %e, "temp file cleanup skipped");
    }

    let outcome = result?;
    Ok(Json(UploadResponse {
        message: format!("Post created at {}", outcome.record_dir.display()),
        slug: outcome.slug,
        cloudinary_path: outcome.media_path,
        cloudinary_url: outcome.media_url,
        git_status: outcome.persistence.to_string(),
    }))
}

/// `GET /api/posts` — all records, newest first.
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<PostsResponse>, ApiError> {
    let posts = state.ingestor.list()?;
    Ok(Json(PostsResponse { posts }))
}

/// `PUT /api/posts/:slug` — overlay the supplied fields.
pub async fn update_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<UpdatePostBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    let patch = UpdatePatch {
        title: body.title,
        image_alt: body.image_alt,
        tags: body.tags,
        image_ratio: body.image_ratio,
        video_url: body.video_url,
    };
    let status = state.ingestor.update(&slug, patch).await?;
    if status.is_failed() {
        tracing::warn!(%slug, %status, "update saved but not persisted");
    }
    Ok(Json(MessageResponse {
        message: format!("Post {slug} updated"),
    }))
}

/// `DELETE /api/posts/:slug`.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status = state.ingestor.delete(&slug).await?;
    if status.is_failed() {
        tracing::warn!(%slug, %status, "delete saved but not persisted");
    }
    Ok(Json(MessageResponse {
        message: format!("Post {slug} deleted"),
    }))
}

/// The fields pulled out of one multipart request.
#[derive(Default)]
struct SubmissionParts {
    title: Option<String>,
    image_alt: Option<String>,
    tags: Option<String>,
    image_ratio: Option<String>,
    video_url: Option<String>,
    image: Option<(PathBuf, String)>,
}

/// Drain the multipart stream, spooling the image field to a temp file.
async fn read_submission(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<SubmissionParts, ApiError> {
    let mut parts = SubmissionParts::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| ApiError::bad_request("image filename is required"))?;
                let is_image = field
                    .content_type()
                    .is_some_and(|ct| ct.starts_with("image/"));
                if !is_image {
                    return Err(ApiError::bad_request("Only image files are allowed"));
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("image upload failed: {e}")))?;
                parts.image = Some((spool_upload(state, &data).await?, filename));
            }
            "title" => parts.title = Some(read_text(field).await?),
            "imageAlt" => parts.image_alt = Some(read_text(field).await?),
            "tags" => parts.tags = Some(read_text(field).await?),
            "imageRatio" => parts.image_ratio = Some(read_text(field).await?),
            "videoUrl" => parts.video_url = Some(read_text(field).await?),
            other => {
                tracing::debug!(field = other, "ignoring unknown form field");
            }
        }
    }
    Ok(parts)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed upload: {e}")))
}

/// Write the uploaded bytes to a uniquely named file in the temp dir.
async fn spool_upload(state: &AppState, data: &[u8]) -> Result<PathBuf, ApiError> {
    let temp_dir = state.config.temp_dir.clone();
    tokio::fs::create_dir_all(&temp_dir)
        .await
        .map_err(|e| ApiError::internal(format!("cannot create temp dir: {e}")))?;
    let temp = tempfile::Builder::new()
        .prefix("upload-")
        .tempfile_in(&temp_dir)
        .map_err(|e| ApiError::internal(format!("cannot create temp file: {e}")))?;
    tokio::fs::write(temp.path(), data)
        .await
        .map_err(|e| ApiError::internal(format!("cannot spool upload: {e}")))?;
    temp.into_temp_path()
        .keep()
        .map_err(|e| ApiError::internal(format!("cannot keep temp file: {e}")))
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

//! Image uploads into the media root.
//!
//! Files are written to `MEDIA_ROOT/<folder>/<uuid>.<ext>` after the bytes
//! have been decoded as an image. The returned `path` is what image columns
//! store.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tola_core::error::CoreError;
use tola_core::media::{image_extension, new_media_path, validate_folder};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::UploadParams;
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Media-relative path to store in an image column.
    pub path: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// POST /api/uploads?folder=<folder>
pub async fn upload_image(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    validate_folder(&params.folder)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file was submitted".into()))?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest("The submitted file is empty".into()));
    }
    if bytes.len() > state.config.media.max_upload_bytes {
        return Err(AppError::BadRequest(format!(
            "File exceeds the maximum size of {} bytes",
            state.config.media.max_upload_bytes
        )));
    }

    let ext = image_extension(&filename)?;
    let (width, height) = {
        let bytes = bytes.clone();
        tokio::task::spawn_blocking(move || decode_dimensions(&bytes))
            .await
            .map_err(|e| AppError::InternalError(format!("Image decode task failed: {e}")))??
    };

    let path = new_media_path(&params.folder, &ext);
    let target = state.config.media.root.join(&path);
    if let Some(dir) = target.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create media dir: {e}")))?;
    }
    tokio::fs::write(&target, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

    tracing::info!(user_id = user.user_id, %path, width, height, "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: state.media_url(&path),
            path,
            width,
            height,
        }),
    ))
}

/// Decode the bytes as an image and return its dimensions.
fn decode_dimensions(bytes: &[u8]) -> Result<(u32, u32), AppError> {
    let img = image::load_from_memory(bytes).map_err(|e| {
        AppError::Core(CoreError::Validation(format!(
            "Upload a valid image. The file is either not an image or corrupted: {e}"
        )))
    })?;
    Ok((img.width(), img.height()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn decodes_png_dimensions() {
        let img = image::RgbImage::new(3, 2);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        assert_eq!(decode_dimensions(buf.get_ref()).unwrap(), (3, 2));
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert_matches!(
            decode_dimensions(b"definitely not an image"),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}

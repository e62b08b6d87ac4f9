//! Media path and URL helpers for uploaded images.
//!
//! Image columns hold a path relative to the media root (`tiles/<uuid>.jpg`).
//! Responses expose an absolute URL built from the public base URL and the
//! media URL prefix.

use uuid::Uuid;

use crate::error::CoreError;

/// Upload folders accepted by `POST /uploads?folder=`.
pub const UPLOAD_FOLDERS: &[&str] = &[
    "tiles",
    "categories",
    "projects",
    "product-types",
    "team",
    "testimonials",
];

/// Accepted image file extensions (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Build the absolute URL for a stored media path.
pub fn media_url(base_url: &str, media_prefix: &str, path: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        media_prefix.trim_matches('/'),
        path.trim_start_matches('/')
    )
}

/// [`media_url`] for optional columns; blank paths yield `None`.
pub fn optional_media_url(base_url: &str, media_prefix: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.trim().is_empty())
        .map(|p| media_url(base_url, media_prefix, p))
}

/// Validate an upload folder name.
pub fn validate_folder(folder: &str) -> Result<(), CoreError> {
    if !UPLOAD_FOLDERS.contains(&folder) {
        return Err(CoreError::Validation(format!(
            "Invalid upload folder '{}'. Valid folders: {}",
            folder,
            UPLOAD_FOLDERS.join(", ")
        )));
    }
    Ok(())
}

/// Extract and validate the image extension of an uploaded filename.
pub fn image_extension(filename: &str) -> Result<String, CoreError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported image type '{}'. Allowed: {}",
            filename,
            IMAGE_EXTENSIONS.join(", ")
        )));
    }
    Ok(ext)
}

/// New media-relative path for an upload: `<folder>/<uuid>.<ext>`.
pub fn new_media_path(folder: &str, ext: &str) -> String {
    format!("{folder}/{}.{ext}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_duplicate_slashes() {
        assert_eq!(
            media_url("http://localhost:8000/", "/media/", "/tiles/a.jpg"),
            "http://localhost:8000/media/tiles/a.jpg"
        );
    }

    #[test]
    fn blank_optional_path_has_no_url() {
        assert_eq!(optional_media_url("http://x", "/media", Some("  ")), None);
        assert_eq!(optional_media_url("http://x", "/media", None), None);
        assert_eq!(
            optional_media_url("http://x", "/media", Some("team/b.png")).as_deref(),
            Some("http://x/media/team/b.png")
        );
    }

    #[test]
    fn folder_validation() {
        assert!(validate_folder("tiles").is_ok());
        assert!(validate_folder("../etc").is_err());
    }

    #[test]
    fn extension_validation() {
        assert_eq!(image_extension("Kitchen.JPG").unwrap(), "jpg");
        assert!(image_extension("notes.txt").is_err());
        assert!(image_extension("no_extension").is_err());
    }

    #[test]
    fn new_path_lives_in_folder() {
        let path = new_media_path("projects", "png");
        assert!(path.starts_with("projects/"));
        assert!(path.ends_with(".png"));
    }
}

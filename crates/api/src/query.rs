//! Shared query parameter types for API handlers.

use serde::Deserialize;
use tola_core::types::DbId;

/// Query parameters for list endpoints that support an `include_inactive` flag.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?project=` filter on `/project-images`.
#[derive(Debug, Deserialize)]
pub struct ProjectParam {
    pub project: Option<DbId>,
}

/// `?folder=` on `/uploads`.
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub folder: String,
}

//! Project lifecycle status values and their display labels.

use crate::error::CoreError;

pub const STATUS_PLANNING: &str = "planning";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid project statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PLANNING, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// Status given to projects created without one.
pub const DEFAULT_STATUS: &str = STATUS_COMPLETED;

/// Validate a project status against the known set.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if !VALID_STATUSES.contains(&status) {
        return Err(CoreError::Validation(format!(
            "Invalid status '{}'. Valid statuses: {}",
            status,
            VALID_STATUSES.join(", ")
        )));
    }
    Ok(())
}

/// Human-readable label shown next to a status (`status_display`).
pub fn status_display(status: &str) -> &'static str {
    match status {
        STATUS_PLANNING => "Planning",
        STATUS_IN_PROGRESS => "In Progress",
        STATUS_COMPLETED => "Completed",
        _ => "Unknown",
    }
}

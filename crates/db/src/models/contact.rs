//! Contact-form submission model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tola_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub responded: bool,
    pub created_at: Timestamp,
}

/// Body of the public contact form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Staff-side update; only the responded flag is mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContact {
    pub responded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactFilter {
    pub responded: Option<bool>,
}

//! Newsletter subscriber model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tola_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscriber {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
}

/// Body of the public subscribe form.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    pub name: Option<String>,
}

/// Outcome of a subscribe call.
#[derive(Debug, Clone)]
pub enum SubscribeOutcome {
    /// A new row was inserted.
    Created(Subscriber),
    /// The address already existed and is (again) active.
    Reactivated(Subscriber),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriberFilter {
    pub active: Option<bool>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ContactRecord {
    pub id: i64,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Validated insert payload. `name` and `email` are non-empty; the optional
/// fields are empty strings when the visitor left them out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewContact {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

//! Contact entity model and import DTO.

use sendloop_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `contacts` table. The email address is the identity key;
/// contacts are never physically deleted, only flagged unsubscribed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub email: String,
    pub name: Option<String>,
    pub unsubscribed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry in a bulk contact import.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewContact {
    #[validate(email)]
    pub email: String,
    pub name: Option<String>,
}

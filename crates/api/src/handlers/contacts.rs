//! Contact import and listing.

use axum::extract::State;
use axum::Json;
use sendloop_db::models::contact::NewContact;
use sendloop_db::repositories::ContactRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub inserted: u64,
    pub skipped: u64,
    pub total: u64,
}

/// POST /api/v1/contacts/import
///
/// Bulk upsert contacts. Duplicates and rows failing email validation are
/// skipped, not fatal; the outcome reports both counts.
pub async fn import_contacts(
    _admin: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<Vec<NewContact>>,
) -> AppResult<Json<ImportOutcome>> {
    let total = input.len() as u64;
    let mut inserted: u64 = 0;
    let mut skipped: u64 = 0;

    for contact in &input {
        if contact.validate().is_err() {
            tracing::warn!(email = %contact.email, "Skipping contact with invalid email");
            skipped += 1;
            continue;
        }
        if ContactRepo::insert_ignore(&state.pool, &contact.email, contact.name.as_deref()).await? {
            inserted += 1;
        } else {
            skipped += 1;
        }
    }

    tracing::info!(inserted, skipped, total, "Contact import complete");

    Ok(Json(ImportOutcome {
        inserted,
        skipped,
        total,
    }))
}

/// GET /api/v1/contacts
///
/// List all contacts ordered by email.
pub async fn list_contacts(
    _admin: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<sendloop_db::models::contact::Contact>>>> {
    let contacts = ContactRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: contacts }))
}

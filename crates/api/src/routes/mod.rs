pub mod auth;
pub mod campaigns;
pub mod contacts;
pub mod health;
pub mod stats;
pub mod tracking;
pub mod unsubscribe;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login               login (public)
/// /auth/verify              verify token (requires auth)
///
/// /contacts                 list (requires auth)
/// /contacts/import          bulk import (requires auth)
///
/// /campaigns                list, create (requires auth)
/// /campaigns/{id}/test      single test send (requires auth)
/// /campaigns/{id}/send      full dispatch run (requires auth)
///
/// /t/open                   open tracking pixel (public)
/// /t/click                  click redirect (public)
///
/// /webhooks/delivery        provider bounce/complaint webhook (public)
///
/// /stats/dashboard          aggregate counters (requires auth)
/// /stats/campaigns/{id}     one campaign's counters (requires auth)
///
/// /health/provider          provider verified-sender check (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Admin authentication.
        .nest("/auth", auth::router())
        // Contact import and listing.
        .nest("/contacts", contacts::router())
        // Campaign CRUD and dispatch.
        .nest("/campaigns", campaigns::router())
        // Open/click tracking callbacks hit by mail clients.
        .nest("/t", tracking::router())
        // Provider delivery notifications.
        .nest("/webhooks", webhooks::router())
        // Dashboard rollups.
        .nest("/stats", stats::router())
        // Provider health, distinct from the root liveness probe.
        .nest("/health", health::provider_router())
}

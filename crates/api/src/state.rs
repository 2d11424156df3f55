use std::sync::Arc;

use sendloop_core::token::TokenCodec;
use sendloop_dispatch::Dispatcher;
use sendloop_mailer::MailProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sendloop_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The outbound email provider (injected; a stub in tests).
    pub mailer: Arc<dyn MailProvider>,
    /// Campaign send engine.
    pub dispatcher: Arc<Dispatcher>,
    /// Unsubscribe token codec.
    pub codec: TokenCodec,
}

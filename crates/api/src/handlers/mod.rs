//! Request handlers, one module per resource.

pub mod auth;
pub mod campaigns;
pub mod contacts;
pub mod health;
pub mod stats;
pub mod tracking;
pub mod unsubscribe;
pub mod webhooks;

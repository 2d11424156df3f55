//! Campaign dispatch and delivery-reconciliation engine.
//!
//! [`Dispatcher`] drives the per-campaign send loop: resolve the eligible
//! recipient set, instrument the HTML per recipient, call the provider once
//! per recipient under a rate ceiling, and record each outcome exactly once.
//! [`ingest`] handles the asynchronous side: bounce and complaint
//! notifications pushed by the provider, which feed the suppression ledger
//! that gates all future sends.

pub mod eligibility;
pub mod ingest;
pub mod send;

pub use eligibility::EligibilityResolver;
pub use ingest::{parse_notification, DeliveryNotification, EventIngestor, IngestSummary};
pub use send::{DispatchError, DispatchOutcome, Dispatcher};

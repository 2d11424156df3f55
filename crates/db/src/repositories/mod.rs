//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! an executor as the first argument: `&PgPool` for standalone statements, or
//! `impl PgExecutor` where the caller needs to run the statement inside an
//! open transaction (the webhook ingestor does this per recipient).

pub mod campaign_repo;
pub mod contact_repo;
pub mod event_repo;
pub mod send_repo;
pub mod stats_repo;
pub mod suppression_repo;

pub use campaign_repo::CampaignRepo;
pub use contact_repo::ContactRepo;
pub use event_repo::EventRepo;
pub use send_repo::SendRepo;
pub use stats_repo::StatsRepo;
pub use suppression_repo::SuppressionRepo;

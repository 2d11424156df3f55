//! Pure domain logic for the campaign dispatch engine.
//!
//! Nothing in this crate performs I/O. The HTTP surface lives in
//! `sendloop-api`, persistence in `sendloop-db`, and the send/ingest
//! engine in `sendloop-dispatch`.

pub mod bounce;
pub mod error;
pub mod instrument;
pub mod token;
pub mod types;

//! profiledeck_core - functional core for the profiledeck client.
//!
//! Pure data types and functions shared by the imperative shell: profile
//! records and validation, API result shapes, pagination, cache key
//! derivation and the QR payload envelope. Nothing in here performs I/O.

pub mod api;
pub mod cache;
pub mod profile;
pub mod qr;
pub mod serde;

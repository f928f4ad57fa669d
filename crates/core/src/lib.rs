//! Shared domain types for the parkwatch review client.
//!
//! Holds the data model exchanged with the external detection backend
//! (bounding boxes, driver records, violation types) plus the
//! identifier newtypes and validation helpers used by the client,
//! session, and overlay crates.

pub mod detection;
pub mod driver;
pub mod error;
pub mod types;

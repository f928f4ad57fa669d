//! HTTP client library for the external detection/violation backend.
//!
//! Provides typed wrappers over the backend's multipart analysis
//! endpoints and JSON decision endpoints, status-tagged response
//! parsing, the [`backend::ViolationBackend`] seam used by the session
//! controller, and env-driven configuration.

pub mod api;
pub mod backend;
pub mod config;
pub mod responses;

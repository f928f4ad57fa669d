//! Review-flow state machine for the parkwatch client.
//!
//! Owns the per-review [`session::Session`] and drives the two-photo
//! confirmation flow (wide shot, then close-up, then confirm/reject)
//! against a [`parkwatch_client::backend::ViolationBackend`]. UI
//! concerns stay outside: the controller broadcasts [`events::ReviewEvent`]s
//! and exposes the action affordance as a pure function of state.

pub mod controller;
pub mod events;
pub mod phase;
pub mod session;

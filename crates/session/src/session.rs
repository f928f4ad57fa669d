//! Per-review session state.
//!
//! One `Session` instance exists per controller; it is populated
//! incrementally as backend responses arrive and reset to its initial
//! empty value after every confirm/reject.

use parkwatch_client::responses::ViolationReport;
use parkwatch_core::driver::DriverRecord;
use parkwatch_core::types::{ImageRef, ViolationId};

use crate::phase::Phase;

/// Mutable state of one review cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Current phase of the two-photo flow.
    pub phase: Phase,
    /// Violation token held between first-image and zoom analysis.
    pub violation_id: Option<ViolationId>,
    /// Driver matched to the detected plate.
    pub driver: Option<DriverRecord>,
    /// Human-readable offence description for the decision card.
    pub violation_description: Option<String>,
    /// Fine amount (KM) for the decision card.
    pub violation_fine: Option<i64>,
    /// Server-side path of the stored wide shot.
    pub first_image: Option<ImageRef>,
    /// Server-side path of the stored close-up.
    pub zoom_image: Option<ImageRef>,
}

/// State-machine errors surfaced to the UI layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An operation was invoked in a phase it is not valid in.
    #[error("Operation requires phase {expected}, session is in {actual}")]
    WrongPhase {
        expected: &'static str,
        actual: &'static str,
    },

    /// Another backend call is still in flight for this session.
    #[error("A backend call is already in flight for this session")]
    Busy,

    /// An operation needed state the session does not hold.
    #[error("Missing state: {0}")]
    MissingState(String),

    /// The backend call failed (transport, timeout, or non-2xx).
    #[error(transparent)]
    Api(#[from] parkwatch_client::api::ApiError),
}

impl Session {
    /// Reset to the initial empty state.
    pub fn reset(&mut self) {
        *self = Session::default();
    }

    /// Whether a confirm/reject decision is fully populated.
    pub fn decision_ready(&self) -> bool {
        self.driver.is_some()
            && self.violation_id.is_some()
            && self.first_image.is_some()
            && self.zoom_image.is_some()
    }

    /// Build the confirm/reject payload.
    ///
    /// Only well-formed once the driver record, the violation id, and
    /// both image references are populated.
    pub fn decision_report(&self) -> Result<ViolationReport, SessionError> {
        let driver = self
            .driver
            .as_ref()
            .ok_or_else(|| SessionError::MissingState("no driver record held".into()))?;
        let violation_id = self
            .violation_id
            .clone()
            .ok_or_else(|| SessionError::MissingState("no violation id held".into()))?;
        let first_image = self
            .first_image
            .clone()
            .ok_or_else(|| SessionError::MissingState("no wide-shot image reference".into()))?;
        let zoom_image = self
            .zoom_image
            .clone()
            .ok_or_else(|| SessionError::MissingState("no close-up image reference".into()))?;

        Ok(ViolationReport {
            driver_id: driver.id,
            violation_id,
            first_image,
            zoom_image,
        })
    }
}

//! The review-flow controller.
//!
//! [`ReviewController`] owns the [`Session`] for one reviewer and is
//! the only place session state is mutated. It is safe to share
//! behind an `Arc`: UI callbacks call `&self` methods, and an
//! in-flight guard rejects a second action while a backend call is
//! outstanding, so overlapping actions cannot interleave on session
//! fields.
//!
//! Within one action the ordering is strict: upload, await the parsed
//! response, then update session state and emit events. A transport
//! or parse failure leaves the session exactly as it was before the
//! call, so the user can retry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::broadcast;
use uuid::Uuid;

use parkwatch_client::backend::ViolationBackend;
use parkwatch_client::responses::{FirstAnalysis, ZoomAnalysis};
use parkwatch_core::driver::DriverRecord;
use parkwatch_core::types::ViolationId;

use crate::events::{ReviewEvent, Severity};
use crate::phase::{ActionAffordance, Phase};
use crate::session::{Session, SessionError};

/// Broadcast channel capacity for review events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// How long the rejected-and-retained notice stays visible before the
/// session clears.
const REJECT_NOTICE_DELAY: Duration = Duration::from_secs(2);

/// Outcome of a wide-shot submission.
#[derive(Debug, Clone)]
pub enum FirstOutcome {
    /// No violation; the cycle ends immediately.
    NoViolation,
    /// A violation was detected; the flow now awaits a close-up.
    ZoomRequested { violation_id: ViolationId },
}

/// Outcome of a close-up submission.
#[derive(Debug, Clone)]
pub enum ZoomOutcome {
    /// No licence plate visible in the close-up.
    PlateNotFound,
    /// Plate read, but no registered driver matches it.
    DriverNotFound { plate: String },
    /// Driver matched; confirm/reject is now available.
    ReadyToConfirm(DecisionSummary),
}

/// Everything the UI needs to render the decision card.
#[derive(Debug, Clone)]
pub struct DecisionSummary {
    pub plate: String,
    pub driver: DriverRecord,
    pub violation_description: String,
    /// Fine amount in convertible marks (KM).
    pub violation_fine: i64,
}

/// Drives the two-photo review flow for a single session.
pub struct ReviewController<B: ViolationBackend> {
    backend: B,
    session: tokio::sync::Mutex<Session>,
    /// Correlation id attached to every log line for this session.
    session_id: Uuid,
    in_flight: AtomicBool,
    reject_notice_delay: Duration,
    event_tx: broadcast::Sender<ReviewEvent>,
}

/// Clears the in-flight flag when the active call settles, on every
/// exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<B: ViolationBackend> ReviewController<B> {
    /// Create a controller over the given backend with an empty
    /// session.
    pub fn new(backend: B) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            backend,
            session: tokio::sync::Mutex::new(Session::default()),
            session_id: Uuid::new_v4(),
            in_flight: AtomicBool::new(false),
            reject_notice_delay: REJECT_NOTICE_DELAY,
            event_tx,
        }
    }

    /// Override the rejected-notice delay (tests pass
    /// `Duration::ZERO` so they do not sleep).
    pub fn with_reject_notice_delay(mut self, delay: Duration) -> Self {
        self.reject_notice_delay = delay;
        self
    }

    /// Subscribe to review events (spinner, messages, decision
    /// readiness).
    pub fn subscribe(&self) -> broadcast::Receiver<ReviewEvent> {
        self.event_tx.subscribe()
    }

    /// Correlation id for this session's log lines.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The backend this controller drives.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current phase of the review cycle.
    pub async fn phase(&self) -> Phase {
        self.session.lock().await.phase
    }

    /// Snapshot of the current session state.
    pub async fn session_snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    /// Whether a confirm/reject decision is fully populated.
    pub async fn decision_ready(&self) -> bool {
        self.session.lock().await.decision_ready()
    }

    /// Action-button affordance for the current state.
    ///
    /// `file_chosen` reflects whether the user has picked a new file;
    /// see [`ActionAffordance::for_state`].
    pub async fn affordance(&self, file_chosen: bool) -> ActionAffordance {
        ActionAffordance::for_state(self.phase().await, file_chosen)
    }

    /// Submit the wide shot for violation screening.
    ///
    /// Valid only in [`Phase::AwaitingFirst`]. On `NEEDS_ZOOM` the
    /// returned violation id is stored and the phase advances; the
    /// controller never initiates the follow-up upload itself -- the
    /// user must explicitly provide the close-up.
    pub async fn submit_first(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<FirstOutcome, SessionError> {
        let _guard = self.begin_call()?;
        {
            let session = self.session.lock().await;
            if session.phase != Phase::AwaitingFirst {
                return Err(SessionError::WrongPhase {
                    expected: Phase::AwaitingFirst.as_str(),
                    actual: session.phase.as_str(),
                });
            }
        }

        self.emit(ReviewEvent::CallStarted);
        let result = self.backend.analyze_first_image(image, filename).await;
        self.emit(ReviewEvent::CallFinished);

        let analysis = match result {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "First-image analysis failed");
                self.message(format!("Analysis failed: {e}"), Severity::Error);
                return Err(e.into());
            }
        };

        match analysis {
            FirstAnalysis::Ok { .. } => {
                tracing::info!(session_id = %self.session_id, "No violation detected");
                self.message("No violation: parked correctly.", Severity::Success);
                Ok(FirstOutcome::NoViolation)
            }
            FirstAnalysis::NeedsZoom {
                violation_id,
                detected_violation,
                ..
            } => {
                {
                    let mut session = self.session.lock().await;
                    session.violation_id = Some(violation_id.clone());
                    session.phase = Phase::AwaitingZoom;
                }
                tracing::info!(
                    session_id = %self.session_id,
                    violation_id = %violation_id,
                    detected_violation = detected_violation.as_deref().unwrap_or("<unspecified>"),
                    "Violation detected, close-up requested",
                );
                self.message(
                    "Violation detected: upload a close-up of the plate.",
                    Severity::Warning,
                );
                Ok(FirstOutcome::ZoomRequested { violation_id })
            }
        }
    }

    /// Submit the close-up for plate reading and driver lookup.
    ///
    /// Valid only in [`Phase::AwaitingZoom`] while the violation id
    /// from the first phase is held. Every outcome returns the phase
    /// to [`Phase::AwaitingFirst`], so a new cycle may begin while a
    /// pending decision is still unconfirmed; the decision payload is
    /// keyed by violation id, not by phase, so the pending decision
    /// stays valid until a new cycle overwrites it.
    pub async fn submit_zoom(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<ZoomOutcome, SessionError> {
        let _guard = self.begin_call()?;
        let violation_id = {
            let session = self.session.lock().await;
            if session.phase != Phase::AwaitingZoom {
                return Err(SessionError::WrongPhase {
                    expected: Phase::AwaitingZoom.as_str(),
                    actual: session.phase.as_str(),
                });
            }
            session.violation_id.clone().ok_or_else(|| {
                SessionError::MissingState("no violation id held for zoom analysis".into())
            })?
        };

        self.emit(ReviewEvent::CallStarted);
        let result = self
            .backend
            .analyze_zoom_image(image, filename, &violation_id)
            .await;
        self.emit(ReviewEvent::CallFinished);

        let analysis = match result {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "Zoom analysis failed");
                self.message(format!("Plate detection failed: {e}"), Severity::Error);
                return Err(e.into());
            }
        };

        match analysis {
            ZoomAnalysis::NoPlate => {
                self.session.lock().await.phase = Phase::AwaitingFirst;
                self.message("Plate not found in the close-up.", Severity::Error);
                Ok(ZoomOutcome::PlateNotFound)
            }
            ZoomAnalysis::NoDriver { plate } => {
                self.session.lock().await.phase = Phase::AwaitingFirst;
                self.message(
                    format!("Plate {plate}: driver is not registered."),
                    Severity::Error,
                );
                Ok(ZoomOutcome::DriverNotFound { plate })
            }
            ZoomAnalysis::ReadyToConfirm {
                plate,
                driver,
                violation_description,
                violation_fine,
                first_image,
                zoom_image,
                // The echoed id is ignored; the held one scopes the
                // decision payload.
                violation_id: _,
            } => {
                {
                    let mut session = self.session.lock().await;
                    session.driver = Some(driver.clone());
                    session.violation_description = Some(violation_description.clone());
                    session.violation_fine = Some(violation_fine);
                    session.first_image = Some(first_image);
                    session.zoom_image = Some(zoom_image);
                    session.phase = Phase::AwaitingFirst;
                }
                tracing::info!(
                    session_id = %self.session_id,
                    plate = %plate,
                    driver_id = driver.id,
                    "Driver matched, decision ready",
                );
                self.emit(ReviewEvent::DecisionReady);
                Ok(ZoomOutcome::ReadyToConfirm(DecisionSummary {
                    plate,
                    driver,
                    violation_description,
                    violation_fine,
                }))
            }
        }
    }

    /// Confirm the pending violation.
    ///
    /// Requires a fully populated decision (driver record, violation
    /// id, both image references). Clears the session after the
    /// backend accepts the record; on failure the session is kept so
    /// the decision can be retried.
    pub async fn confirm(&self) -> Result<(), SessionError> {
        let _guard = self.begin_call()?;
        let report = self.session.lock().await.decision_report()?;

        self.emit(ReviewEvent::CallStarted);
        let result = self.backend.record_violation(&report).await;
        self.emit(ReviewEvent::CallFinished);

        if let Err(e) = result {
            tracing::warn!(session_id = %self.session_id, error = %e, "Recording violation failed");
            self.message(format!("Recording failed: {e}"), Severity::Error);
            return Err(e.into());
        }

        self.message("Violation recorded.", Severity::Success);
        self.clear_session().await;
        Ok(())
    }

    /// Reject the pending detection.
    ///
    /// With a fully populated decision, the same payload is sent to
    /// the reject endpoint so the sample is retained for future model
    /// training, the notice stays visible for a fixed delay, and the
    /// session clears. Without one, the session clears immediately --
    /// a cleanup, not an error, and no network call is made.
    pub async fn reject(&self) -> Result<(), SessionError> {
        let _guard = self.begin_call()?;
        let report = {
            let session = self.session.lock().await;
            if session.decision_ready() {
                Some(session.decision_report()?)
            } else {
                None
            }
        };

        let Some(report) = report else {
            self.clear_session().await;
            return Ok(());
        };

        self.emit(ReviewEvent::CallStarted);
        let result = self.backend.reject_violation(&report).await;
        self.emit(ReviewEvent::CallFinished);

        if let Err(e) = result {
            tracing::warn!(session_id = %self.session_id, error = %e, "Rejecting detection failed");
            self.message(format!("Rejection failed: {e}"), Severity::Error);
            return Err(e.into());
        }

        self.message(
            "Detection rejected; sample retained for training.",
            Severity::Warning,
        );
        tokio::time::sleep(self.reject_notice_delay).await;
        self.clear_session().await;
        Ok(())
    }

    /* ---- private helpers ---- */

    /// Claim the in-flight slot, or fail fast with [`SessionError::Busy`].
    fn begin_call(&self) -> Result<InFlightGuard<'_>, SessionError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SessionError::Busy);
        }
        Ok(InFlightGuard(&self.in_flight))
    }

    async fn clear_session(&self) {
        self.session.lock().await.reset();
        self.emit(ReviewEvent::SessionCleared);
    }

    fn message(&self, text: impl Into<String>, severity: Severity) {
        self.emit(ReviewEvent::Message {
            text: text.into(),
            severity,
        });
    }

    fn emit(&self, event: ReviewEvent) {
        // A send error only means no UI is subscribed right now.
        let _ = self.event_tx.send(event);
    }
}

//! Review phases and the action-button affordance.
//!
//! The affordance (label + color) is a pure function of the current
//! phase, so the UI layer never mutates button state imperatively.

use serde::Serialize;

/// Where the review cycle currently stands.
///
/// `AwaitingFirst` is the initial state; a detected violation moves
/// the cycle to `AwaitingZoom`, and every zoom outcome returns it to
/// `AwaitingFirst`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the wide shot that screens for a violation.
    #[default]
    AwaitingFirst,
    /// Waiting for the close-up that identifies the plate.
    AwaitingZoom,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingFirst => "awaiting_first",
            Self::AwaitingZoom => "awaiting_zoom",
        }
    }
}

/// Label and color for the main action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionAffordance {
    pub label: &'static str,
    /// CSS hex color the UI paints the button with.
    pub color: &'static str,
}

/// Affordance while waiting for a wide shot.
pub const START_ANALYSIS: ActionAffordance = ActionAffordance {
    label: "Analyze",
    color: "#00a86b",
};

/// Affordance after a violation was detected and a close-up is needed.
pub const REQUEST_CLOSE_UP: ActionAffordance = ActionAffordance {
    label: "Upload close-up",
    color: "#ff9600",
};

/// Affordance once a close-up file has been chosen and can be sent
/// for plate detection.
pub const DETECT_PLATE: ActionAffordance = ActionAffordance {
    label: "Detect plate",
    color: "#ff5e00",
};

impl ActionAffordance {
    /// Compute the affordance for the current state.
    ///
    /// `file_chosen` is the display-only side effect of picking a new
    /// file while a close-up is awaited: the label switches to the
    /// re-detection prompt. It is not a phase transition.
    pub fn for_state(phase: Phase, file_chosen: bool) -> Self {
        match (phase, file_chosen) {
            (Phase::AwaitingFirst, _) => START_ANALYSIS,
            (Phase::AwaitingZoom, false) => REQUEST_CLOSE_UP,
            (Phase::AwaitingZoom, true) => DETECT_PLATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_phase_is_awaiting_first() {
        assert_eq!(Phase::default(), Phase::AwaitingFirst);
    }

    #[test]
    fn affordance_is_pure_function_of_state() {
        assert_eq!(
            ActionAffordance::for_state(Phase::AwaitingFirst, false),
            START_ANALYSIS
        );
        // File selection has no display effect in the first phase.
        assert_eq!(
            ActionAffordance::for_state(Phase::AwaitingFirst, true),
            START_ANALYSIS
        );
        assert_eq!(
            ActionAffordance::for_state(Phase::AwaitingZoom, false),
            REQUEST_CLOSE_UP
        );
        assert_eq!(
            ActionAffordance::for_state(Phase::AwaitingZoom, true),
            DETECT_PLATE
        );
    }
}

//! Events the review controller broadcasts to the UI layer.
//!
//! The UI collaborator (spinner, results panel, decision buttons)
//! subscribes via [`crate::controller::ReviewController::subscribe`]
//! and renders these without reaching into session state.

use serde::Serialize;

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Text color the original panel used for this severity.
    pub fn css_color(&self) -> &'static str {
        match self {
            Self::Info => "#333333",
            Self::Success => "green",
            Self::Warning => "orange",
            Self::Error => "red",
        }
    }
}

/// A state change the UI layer cares about.
#[derive(Debug, Clone, Serialize)]
pub enum ReviewEvent {
    /// A backend call started; show the loading indicator.
    CallStarted,

    /// The in-flight backend call settled; hide the loading indicator.
    CallFinished,

    /// Text for the results panel.
    Message { text: String, severity: Severity },

    /// A decision is fully populated; enable confirm/reject buttons.
    DecisionReady,

    /// The session returned to its initial empty state.
    SessionCleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_colors_match_panel_palette() {
        assert_eq!(Severity::Success.css_color(), "green");
        assert_eq!(Severity::Warning.css_color(), "orange");
        assert_eq!(Severity::Error.css_color(), "red");
    }

    #[test]
    fn events_serialize_for_the_ui_bridge() {
        let event = ReviewEvent::Message {
            text: "No violation".into(),
            severity: Severity::Success,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["Message"]["severity"], "success");
    }
}

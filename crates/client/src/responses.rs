//! Backend response types and decision payloads.
//!
//! The analysis endpoints answer with JSON tagged by a `"status"`
//! field. This module deserializes those answers into strongly-typed
//! enums; an unknown status or malformed body is a parse error, never
//! a silent fallthrough.

use serde::{Deserialize, Serialize};

use parkwatch_core::detection::Detection;
use parkwatch_core::driver::DriverRecord;
use parkwatch_core::types::{DriverId, ImageRef, ViolationId};

/* --------------------------------------------------------------------------
Analysis responses
-------------------------------------------------------------------------- */

/// Outcome of the first-image (wide shot) analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status")]
pub enum FirstAnalysis {
    /// No violation detected; the cycle ends here.
    #[serde(rename = "OK")]
    Ok {
        #[serde(default)]
        message: Option<String>,
    },

    /// A violation class was detected; a close-up of the plate is
    /// required to identify the vehicle.
    #[serde(rename = "NEEDS_ZOOM")]
    NeedsZoom {
        /// Token scoping the follow-up zoom submission.
        #[serde(rename = "prekrsaj_id")]
        violation_id: ViolationId,
        /// The detector class that triggered the violation, if given.
        #[serde(default)]
        detected_violation: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
}

/// Outcome of the zoom-image (close-up) analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status")]
pub enum ZoomAnalysis {
    /// No licence plate found in the close-up.
    #[serde(rename = "NO_PLATE")]
    NoPlate,

    /// A plate was read but no registered driver matches it.
    #[serde(rename = "NO_DRIVER")]
    NoDriver { plate: String },

    /// Plate read and driver matched; the reviewer can now decide.
    #[serde(rename = "READY_TO_CONFIRM")]
    ReadyToConfirm {
        plate: String,
        #[serde(rename = "vozac")]
        driver: DriverRecord,
        #[serde(rename = "prekrsaj_opis")]
        violation_description: String,
        /// Fine amount in convertible marks (KM).
        #[serde(rename = "prekrsaj_kazna")]
        violation_fine: i64,
        #[serde(rename = "prekrsaj_id")]
        violation_id: ViolationId,
        /// Server-side path of the stored wide shot.
        #[serde(rename = "slika1")]
        first_image: ImageRef,
        /// Server-side path of the stored close-up.
        #[serde(rename = "slika2")]
        zoom_image: ImageRef,
    },
}

/// Response of the standalone `/detect` endpoint, used purely for the
/// overlay display.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectResponse {
    pub detections: Vec<Detection>,
}

/* --------------------------------------------------------------------------
Decision payload
-------------------------------------------------------------------------- */

/// Confirm/reject payload sent to `record_violation` and
/// `reject_violation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationReport {
    #[serde(rename = "vozac_id")]
    pub driver_id: DriverId,
    #[serde(rename = "prekrsaj_id")]
    pub violation_id: ViolationId,
    #[serde(rename = "slika1")]
    pub first_image: ImageRef,
    #[serde(rename = "slika2")]
    pub zoom_image: ImageRef,
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

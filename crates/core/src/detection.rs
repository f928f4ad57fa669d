//! Detection boxes returned by the backend's object detector.
//!
//! Boxes arrive in the coordinate space of the originally uploaded
//! image (its natural resolution); the overlay crate re-projects them
//! into on-screen coordinates before drawing.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Bounding box
-------------------------------------------------------------------------- */

/// An axis-aligned box in natural-image pixel coordinates.
///
/// Serialized as the backend sends it: a 4-element `[x1, y1, x2, y2]`
/// array with `(x1, y1)` the top-left and `(x2, y2)` the bottom-right
/// corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl From<[f64; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Re-project the box by independent per-axis scale factors.
    ///
    /// Each corner coordinate is multiplied by the factor for its
    /// axis; aspect ratio is not assumed preserved.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            x1: self.x1 * sx,
            y1: self.y1 * sy,
            x2: self.x2 * sx,
            y2: self.y2 * sy,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/* --------------------------------------------------------------------------
Detection
-------------------------------------------------------------------------- */

/// One detected object: box, class label, and confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Box in natural-image pixel coordinates.
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    /// Detector class label (e.g. a plate or violation class).
    pub class: String,
    /// Confidence score in `[0, 1]`.
    pub confidence: f64,
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a confidence score is finite and within `[0, 1]`.
pub fn validate_confidence(confidence: f64) -> Result<(), CoreError> {
    if !confidence.is_finite() {
        return Err(CoreError::Validation(
            "confidence must be a finite number".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&confidence) {
        return Err(CoreError::Validation(format!(
            "confidence must be between 0 and 1, got {confidence}"
        )));
    }
    Ok(())
}

/// Validate that a box has finite coordinates and non-inverted corners.
pub fn validate_box(bbox: &BoundingBox) -> Result<(), CoreError> {
    let coords = [bbox.x1, bbox.y1, bbox.x2, bbox.y2];
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(CoreError::Validation(
            "bounding box coordinates must be finite".to_string(),
        ));
    }
    if bbox.x2 < bbox.x1 || bbox.y2 < bbox.y1 {
        return Err(CoreError::Validation(format!(
            "bounding box corners are inverted: ({}, {}) to ({}, {})",
            bbox.x1, bbox.y1, bbox.x2, bbox.y2
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_deserializes_from_backend_array() {
        let det: Detection = serde_json::from_str(
            r#"{"box":[10.0,20.0,110.0,220.0],"class":"tablica","confidence":0.91}"#,
        )
        .unwrap();
        assert_eq!(det.bbox, BoundingBox::new(10.0, 20.0, 110.0, 220.0));
        assert_eq!(det.class, "tablica");
        assert!((det.confidence - 0.91).abs() < f64::EPSILON);
    }

    #[test]
    fn box_serializes_back_to_array() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
    }

    #[test]
    fn scaled_multiplies_each_corner_per_axis() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 220.0);
        let scaled = bbox.scaled(0.5, 0.25);
        assert_eq!(scaled, BoundingBox::new(5.0, 5.0, 55.0, 55.0));
    }

    #[test]
    fn scaled_with_unit_factors_is_identity() {
        let bbox = BoundingBox::new(3.5, 7.25, 9.0, 11.0);
        assert_eq!(bbox.scaled(1.0, 1.0), bbox);
    }

    #[test]
    fn confidence_bounds_enforced() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(1.0).is_ok());
        assert!(validate_confidence(0.5).is_ok());
        assert!(validate_confidence(-0.01).is_err());
        assert!(validate_confidence(1.01).is_err());
        assert!(validate_confidence(f64::NAN).is_err());
    }

    #[test]
    fn inverted_box_rejected() {
        let bbox = BoundingBox::new(100.0, 20.0, 10.0, 220.0);
        assert!(validate_box(&bbox).is_err());
    }

    #[test]
    fn non_finite_box_rejected() {
        let bbox = BoundingBox::new(f64::INFINITY, 0.0, 1.0, 1.0);
        assert!(validate_box(&bbox).is_err());
    }

    #[test]
    fn valid_box_accepted() {
        assert!(validate_box(&BoundingBox::new(0.0, 0.0, 10.0, 10.0)).is_ok());
        // Zero-area boxes are tolerated; the detector occasionally
        // emits them on tiny objects.
        assert!(validate_box(&BoundingBox::new(5.0, 5.0, 5.0, 5.0)).is_ok());
    }
}

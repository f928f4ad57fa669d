//! Detection overlay rendering.
//!
//! The backend computes boxes against the originally uploaded
//! resolution, but the UI displays the image at a layout-constrained
//! size; without per-axis rescaling the overlay drifts away from the
//! visible pixels. This crate re-projects detections into a
//! display-sized drawing surface, and can burn the boxes into pixels
//! for saving an annotated preview.

pub mod probe;
pub mod raster;
pub mod renderer;
pub mod surface;

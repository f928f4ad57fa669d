//! Re-projection of natural-coordinate detections onto the display.

use serde::Serialize;

use parkwatch_core::detection::Detection;

use crate::surface::{DrawCommand, OverlaySurface};

/// Vertical gap between a box's top edge and its label baseline.
pub const LABEL_OFFSET_PX: f64 = 5.0;

/// Natural and on-screen dimensions of a displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayGeometry {
    /// Original pixel resolution of the uploaded image.
    pub natural_width: u32,
    pub natural_height: u32,
    /// On-screen rendered size after layout.
    pub display_width: u32,
    pub display_height: u32,
}

/// Errors from overlay rendering.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// The natural dimensions are zero; no scale factor exists.
    #[error("Degenerate geometry: natural size is {width}x{height}")]
    DegenerateGeometry { width: u32, height: u32 },
}

impl DisplayGeometry {
    /// Horizontal scale factor (`display / natural`).
    pub fn scale_x(&self) -> f64 {
        f64::from(self.display_width) / f64::from(self.natural_width)
    }

    /// Vertical scale factor (`display / natural`).
    ///
    /// Independent of [`scale_x`](Self::scale_x); aspect ratio is not
    /// assumed preserved by the layout.
    pub fn scale_y(&self) -> f64 {
        f64::from(self.display_height) / f64::from(self.natural_height)
    }

    /// Geometry for an image displayed at its natural size.
    pub fn unscaled(width: u32, height: u32) -> Self {
        Self {
            natural_width: width,
            natural_height: height,
            display_width: width,
            display_height: height,
        }
    }
}

/// Project detections into a fresh display-sized surface.
///
/// The surface is sized to the on-screen dimensions and starts empty,
/// so invoking this again for a new image fully replaces prior
/// content. Each detection contributes a stroked rectangle at its
/// scaled box and a class label [`LABEL_OFFSET_PX`] above the top
/// edge. An empty detection list yields an empty surface, not an
/// error.
pub fn render_detections(
    geometry: &DisplayGeometry,
    detections: &[Detection],
) -> Result<OverlaySurface, OverlayError> {
    if geometry.natural_width == 0 || geometry.natural_height == 0 {
        return Err(OverlayError::DegenerateGeometry {
            width: geometry.natural_width,
            height: geometry.natural_height,
        });
    }

    let mut surface = OverlaySurface::new(geometry.display_width, geometry.display_height);
    let (sx, sy) = (geometry.scale_x(), geometry.scale_y());

    for detection in detections {
        let scaled = detection.bbox.scaled(sx, sy);
        surface.push(DrawCommand::StrokeRect {
            x: scaled.x1,
            y: scaled.y1,
            width: scaled.width(),
            height: scaled.height(),
        });
        surface.push(DrawCommand::Label {
            text: detection.class.clone(),
            x: scaled.x1,
            y: scaled.y1 - LABEL_OFFSET_PX,
        });
    }

    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_core::detection::BoundingBox;

    fn detection(x1: f64, y1: f64, x2: f64, y2: f64, class: &str) -> Detection {
        Detection {
            bbox: BoundingBox::new(x1, y1, x2, y2),
            class: class.into(),
            confidence: 0.9,
        }
    }

    #[test]
    fn empty_detection_list_renders_nothing() {
        let geometry = DisplayGeometry {
            natural_width: 1920,
            natural_height: 1080,
            display_width: 640,
            display_height: 360,
        };
        let surface = render_detections(&geometry, &[]).unwrap();
        assert!(surface.is_empty());
        assert_eq!(surface.width, 640);
        assert_eq!(surface.height, 360);
    }

    #[test]
    fn boxes_are_scaled_per_axis() {
        // Display is half the width and a quarter of the height, so
        // the two axes scale differently.
        let geometry = DisplayGeometry {
            natural_width: 1000,
            natural_height: 800,
            display_width: 500,
            display_height: 200,
        };
        let surface =
            render_detections(&geometry, &[detection(100.0, 400.0, 300.0, 800.0, "tablica")])
                .unwrap();

        assert_eq!(
            surface.commands[0],
            DrawCommand::StrokeRect {
                x: 50.0,
                y: 100.0,
                width: 100.0,
                height: 100.0,
            }
        );
    }

    #[test]
    fn label_sits_above_the_scaled_top_edge() {
        let geometry = DisplayGeometry::unscaled(640, 480);
        let surface =
            render_detections(&geometry, &[detection(10.0, 20.0, 110.0, 220.0, "tablica")])
                .unwrap();

        assert_eq!(
            surface.commands[1],
            DrawCommand::Label {
                text: "tablica".into(),
                x: 10.0,
                y: 20.0 - LABEL_OFFSET_PX,
            }
        );
    }

    #[test]
    fn each_detection_contributes_rect_and_label() {
        let geometry = DisplayGeometry::unscaled(640, 480);
        let detections = vec![
            detection(0.0, 0.0, 10.0, 10.0, "a"),
            detection(20.0, 20.0, 40.0, 40.0, "b"),
            detection(100.0, 100.0, 200.0, 150.0, "c"),
        ];
        let surface = render_detections(&geometry, &detections).unwrap();
        assert_eq!(surface.commands.len(), 6);
    }

    #[test]
    fn re_render_replaces_prior_content() {
        let first = render_detections(
            &DisplayGeometry::unscaled(640, 480),
            &[detection(0.0, 0.0, 10.0, 10.0, "old")],
        )
        .unwrap();
        assert_eq!(first.commands.len(), 2);

        // A new image with no detections: the fresh surface carries
        // nothing over.
        let second = render_detections(&DisplayGeometry::unscaled(800, 600), &[]).unwrap();
        assert_eq!(second.width, 800);
        assert!(second.is_empty());
    }

    #[test]
    fn zero_natural_dimension_is_an_error() {
        let geometry = DisplayGeometry {
            natural_width: 0,
            natural_height: 480,
            display_width: 640,
            display_height: 480,
        };
        assert!(render_detections(&geometry, &[]).is_err());
    }
}

//! Burning overlay boxes into pixels.
//!
//! Used by the CLI to save an annotated copy of an upload. The
//! vector surface in [`crate::surface`] is what a live UI consumes;
//! this module exists for previews on disk.

use image::{Rgba, RgbaImage};

use parkwatch_core::detection::Detection;

use crate::renderer::{DisplayGeometry, OverlayError};

/// Stroke color for detection boxes (the UI's `#ff3b3b`).
pub const BOX_COLOR: Rgba<u8> = Rgba([0xff, 0x3b, 0x3b, 0xff]);

/// Stroke width in pixels.
const STROKE_WIDTH: u32 = 1;

/// Stroke each detection's scaled box into the image.
///
/// Coordinates are clamped to the image bounds, so boxes that touch
/// or cross the edge draw partially instead of panicking. An empty
/// detection list leaves the image untouched.
pub fn draw_boxes(
    image: &mut RgbaImage,
    geometry: &DisplayGeometry,
    detections: &[Detection],
) -> Result<(), OverlayError> {
    if geometry.natural_width == 0 || geometry.natural_height == 0 {
        return Err(OverlayError::DegenerateGeometry {
            width: geometry.natural_width,
            height: geometry.natural_height,
        });
    }

    let (sx, sy) = (geometry.scale_x(), geometry.scale_y());

    for detection in detections {
        let scaled = detection.bbox.scaled(sx, sy);
        let x1 = clamp_to(scaled.x1, image.width());
        let y1 = clamp_to(scaled.y1, image.height());
        let x2 = clamp_to(scaled.x2, image.width());
        let y2 = clamp_to(scaled.y2, image.height());
        stroke_rect(image, x1, y1, x2, y2);
    }

    Ok(())
}

/// Clamp a scaled coordinate into `[0, limit - 1]`.
fn clamp_to(value: f64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let max = limit - 1;
    if value.is_nan() || value < 0.0 {
        0
    } else if value >= f64::from(max) {
        max
    } else {
        value as u32
    }
}

fn stroke_rect(image: &mut RgbaImage, x1: u32, y1: u32, x2: u32, y2: u32) {
    for offset in 0..STROKE_WIDTH {
        let top = y1.saturating_add(offset).min(y2);
        let bottom = y2.saturating_sub(offset).max(y1);
        for x in x1..=x2 {
            image.put_pixel(x, top, BOX_COLOR);
            image.put_pixel(x, bottom, BOX_COLOR);
        }

        let left = x1.saturating_add(offset).min(x2);
        let right = x2.saturating_sub(offset).max(x1);
        for y in y1..=y2 {
            image.put_pixel(left, y, BOX_COLOR);
            image.put_pixel(right, y, BOX_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_core::detection::BoundingBox;

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0xff]))
    }

    fn detection(x1: f64, y1: f64, x2: f64, y2: f64) -> Detection {
        Detection {
            bbox: BoundingBox::new(x1, y1, x2, y2),
            class: "tablica".into(),
            confidence: 0.9,
        }
    }

    #[test]
    fn empty_list_leaves_image_untouched() {
        let mut image = blank(32, 32);
        let before = image.clone();
        draw_boxes(&mut image, &DisplayGeometry::unscaled(32, 32), &[]).unwrap();
        assert_eq!(image, before);
    }

    #[test]
    fn box_edges_are_stroked() {
        let mut image = blank(32, 32);
        draw_boxes(
            &mut image,
            &DisplayGeometry::unscaled(32, 32),
            &[detection(4.0, 4.0, 12.0, 10.0)],
        )
        .unwrap();

        // Corners and edge midpoints carry the stroke color.
        assert_eq!(*image.get_pixel(4, 4), BOX_COLOR);
        assert_eq!(*image.get_pixel(12, 10), BOX_COLOR);
        assert_eq!(*image.get_pixel(8, 4), BOX_COLOR);
        assert_eq!(*image.get_pixel(4, 7), BOX_COLOR);
        // Interior stays untouched.
        assert_ne!(*image.get_pixel(8, 7), BOX_COLOR);
    }

    #[test]
    fn boxes_are_scaled_before_drawing() {
        let mut image = blank(16, 16);
        let geometry = DisplayGeometry {
            natural_width: 32,
            natural_height: 32,
            display_width: 16,
            display_height: 16,
        };
        draw_boxes(&mut image, &geometry, &[detection(8.0, 8.0, 24.0, 24.0)]).unwrap();
        assert_eq!(*image.get_pixel(4, 4), BOX_COLOR);
        assert_eq!(*image.get_pixel(12, 12), BOX_COLOR);
    }

    #[test]
    fn out_of_bounds_box_is_clamped_not_panicking() {
        let mut image = blank(16, 16);
        draw_boxes(
            &mut image,
            &DisplayGeometry::unscaled(16, 16),
            &[detection(-10.0, -10.0, 100.0, 100.0)],
        )
        .unwrap();
        assert_eq!(*image.get_pixel(0, 0), BOX_COLOR);
        assert_eq!(*image.get_pixel(15, 15), BOX_COLOR);
    }

    #[test]
    fn zero_natural_dimension_is_an_error() {
        let mut image = blank(16, 16);
        let geometry = DisplayGeometry {
            natural_width: 0,
            natural_height: 16,
            display_width: 16,
            display_height: 16,
        };
        assert!(draw_boxes(&mut image, &geometry, &[]).is_err());
    }
}

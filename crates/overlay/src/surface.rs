//! The drawing surface the renderer produces.
//!
//! A surface is a sized list of draw commands the UI layer executes
//! verbatim (stroke a rectangle, place a label). Re-rendering resets
//! the surface dimensions and drops all prior commands, so stale
//! content from a previous image can never bleed through.

use serde::Serialize;

/// One drawing instruction, in on-screen pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum DrawCommand {
    /// Stroke an axis-aligned rectangle outline.
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Place a text label with its baseline at `(x, y)`.
    Label { text: String, x: f64, y: f64 },
}

/// A display-sized overlay: dimensions plus draw commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverlaySurface {
    /// On-screen width the surface must be sized to.
    pub width: u32,
    /// On-screen height the surface must be sized to.
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl OverlaySurface {
    /// Create an empty surface with the given on-screen dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Resize for a new image and drop every prior command.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_drops_prior_content_and_resizes() {
        let mut surface = OverlaySurface::new(640, 480);
        surface.push(DrawCommand::StrokeRect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        });
        surface.push(DrawCommand::Label {
            text: "tablica".into(),
            x: 1.0,
            y: 0.0,
        });

        surface.reset(800, 600);
        assert_eq!(surface.width, 800);
        assert_eq!(surface.height, 600);
        assert!(surface.is_empty());
    }

    #[test]
    fn commands_serialize_with_op_tags() {
        let command = DrawCommand::StrokeRect {
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 40.0,
        };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["op"], "stroke_rect");
        assert_eq!(value["width"], 30.0);
    }
}

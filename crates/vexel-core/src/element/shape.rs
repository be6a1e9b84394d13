//! Geometric shape element payload.

use super::Rgba;
use serde::{Deserialize, Serialize};

/// The geometric primitive a shape element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
    Line,
}

impl ShapeKind {
    /// Display label, also used as the default element name.
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Line => "Line",
        }
    }
}

/// Payload for shape elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePayload {
    pub shape: ShapeKind,
    /// Fill color (None = outline only).
    pub fill: Option<Rgba>,
    pub stroke: Rgba,
    pub stroke_width: f64,
    /// Corner radius for rectangles (0 = sharp corners).
    #[serde(default)]
    pub corner_radius: f64,
}

impl ShapePayload {
    /// Create a payload with default styling.
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            fill: Some(Rgba::white()),
            stroke: Rgba::black(),
            stroke_width: 2.0,
            corner_radius: 0.0,
        }
    }
}

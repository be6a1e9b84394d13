//! Freehand/pen path element payload.

use super::Rgba;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Payload for path elements.
///
/// Stroke smoothing and simplification happen outside the core; the
/// payload arrives as a finished polyline. Points are relative to the
/// element origin (the transform's top-left corner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPayload {
    pub points: Vec<Point>,
    pub stroke: Rgba,
    pub stroke_width: f64,
    /// Whether the path is closed back to its first point.
    #[serde(default)]
    pub closed: bool,
}

impl PathPayload {
    /// Create a payload from finished points.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            stroke: Rgba::black(),
            stroke_width: 2.0,
            closed: false,
        }
    }

    /// Extent of the points relative to the origin, clamped so even a
    /// single-point path gets a selectable box.
    pub fn extent(&self) -> (f64, f64) {
        let mut max_x: f64 = 0.0;
        let mut max_y: f64 = 0.0;
        for point in &self.points {
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        (max_x.max(1.0), max_y.max(1.0))
    }
}

//! Grid snapping, ruler guides and smart alignment guides.

use crate::document::Document;
use crate::element::ElementId;
use crate::transform::Axis;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Round a coordinate to the nearest grid multiple. Idempotent; a
/// non-positive or non-finite grid size passes the value through.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// A user-placed ruler guide. Vertical guides are lines at `position`
/// on the x axis, horizontal guides on the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: Uuid,
    pub axis: Axis,
    pub position: f64,
}

impl Guide {
    pub fn new(axis: Axis, position: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            axis,
            position,
        }
    }
}

/// A transient alignment hint produced while dragging: a line the
/// moving element is close to, plus the signed distance to it from the
/// nearest matching edge/center of the moving bounds. Purely advisory;
/// the caller adds `distance` to the drag position to snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmartGuide {
    pub axis: Axis,
    pub position: f64,
    pub distance: f64,
}

/// The three interesting lines of a box on one axis: leading edge,
/// center, trailing edge.
fn lines(bounds: Rect, axis: Axis) -> [f64; 3] {
    match axis {
        Axis::Vertical => [bounds.x0, bounds.center().x, bounds.x1],
        Axis::Horizontal => [bounds.y0, bounds.center().y, bounds.y1],
    }
}

/// Lazily enumerate candidate snap lines near the moving bounds.
///
/// Candidates come from the edges and centers of every visible
/// top-level element not in `exclude` (normally the dragged selection
/// itself) plus the canvas rectangle. A candidate is yielded when some
/// edge/center of the moving bounds is within `threshold` of it.
pub fn find_smart_guides<'a>(
    document: &'a Document,
    moving_bounds: Rect,
    exclude: &'a [ElementId],
    threshold: f64,
) -> impl Iterator<Item = SmartGuide> + 'a {
    document
        .top_level_elements()
        .filter(move |e| e.visible && !exclude.contains(&e.id))
        .map(|e| e.bounds())
        .chain(std::iter::once(document.canvas_bounds()))
        .flat_map(move |bounds| {
            [Axis::Vertical, Axis::Horizontal]
                .into_iter()
                .flat_map(move |axis| lines(bounds, axis).map(|position| (axis, position)))
        })
        .filter_map(move |(axis, position)| {
            let distance = lines(moving_bounds, axis)
                .into_iter()
                .map(|own| position - own)
                .min_by(|a, b| a.abs().total_cmp(&b.abs()))?;
            (distance.abs() <= threshold).then_some(SmartGuide {
                axis,
                position,
                distance,
            })
        })
}

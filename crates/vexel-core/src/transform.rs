//! Pure geometry for interactive manipulation.
//!
//! Everything here is a pure function from a starting transform (or
//! document) plus gesture parameters to a new value; no hidden state,
//! no mutation. The caller turns the results into commands.

use crate::document::Document;
use crate::element::{Element, ElementId, ElementPatch, Transform, MIN_ELEMENT_SIZE};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A canvas axis. Vertical lines vary in x, horizontal lines in y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One of the eight selection-box resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeHandle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl ResizeHandle {
    /// Whether dragging this handle moves the left edge.
    fn moves_left(self) -> bool {
        matches!(self, Self::NorthWest | Self::West | Self::SouthWest)
    }

    /// Whether dragging this handle moves the right edge.
    fn moves_right(self) -> bool {
        matches!(self, Self::NorthEast | Self::East | Self::SouthEast)
    }

    /// Whether dragging this handle moves the top edge.
    fn moves_top(self) -> bool {
        matches!(self, Self::NorthWest | Self::North | Self::NorthEast)
    }

    /// Whether dragging this handle moves the bottom edge.
    fn moves_bottom(self) -> bool {
        matches!(self, Self::SouthWest | Self::South | Self::SouthEast)
    }
}

/// Cardinal direction for keyboard nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Map a screen-space drag delta onto the element's frame.
///
/// The delta is currently applied as-is: rotation is NOT projected
/// into the element's local frame, so handles on a rotated element
/// resize along screen axes rather than along the rotated edges. A
/// rotation-aware projection would change observable behavior and is
/// deliberately confined to this one seam until that change is made.
pub fn project_resize_delta(
    _transform: &Transform,
    _handle: ResizeHandle,
    dx: f64,
    dy: f64,
) -> Vec2 {
    Vec2::new(dx, dy)
}

/// Compute the transform produced by dragging a resize handle by
/// `(dx, dy)` from the element's starting transform.
///
/// The edge opposite the handle stays fixed. With `lock_aspect`, the
/// dominant delta (measured against the original aspect ratio) drives
/// both axes. Dimensions are clamped to [`MIN_ELEMENT_SIZE`].
pub fn resize_element(
    element: &Element,
    handle: ResizeHandle,
    dx: f64,
    dy: f64,
    lock_aspect: bool,
) -> Transform {
    let start = element.transform;
    let delta = project_resize_delta(&start, handle, dx, dy);

    let mut width = start.width;
    let mut height = start.height;
    if handle.moves_left() {
        width = start.width - delta.x;
    } else if handle.moves_right() {
        width = start.width + delta.x;
    }
    if handle.moves_top() {
        height = start.height - delta.y;
    } else if handle.moves_bottom() {
        height = start.height + delta.y;
    }

    if lock_aspect && start.height > 0.0 {
        let aspect = start.width / start.height;
        let width_delta = (width - start.width).abs();
        let height_delta = (height - start.height).abs() * aspect;
        if width_delta >= height_delta {
            height = width / aspect;
        } else {
            width = height * aspect;
        }
    }

    width = width.max(MIN_ELEMENT_SIZE);
    height = height.max(MIN_ELEMENT_SIZE);

    // Re-anchor so the edge opposite the handle stays where it was.
    let x = if handle.moves_left() {
        start.x + start.width - width
    } else {
        start.x
    };
    let y = if handle.moves_top() {
        start.y + start.height - height
    } else {
        start.y
    };

    Transform {
        x,
        y,
        width,
        height,
        ..start
    }
}

/// Batch-translate the targeted elements by the same delta. Locked
/// elements and unknown ids are skipped.
pub fn move_elements(document: &Document, ids: &[ElementId], dx: f64, dy: f64) -> Document {
    let patches: Vec<(ElementId, ElementPatch)> = document
        .elements_by_ids(ids)
        .iter()
        .filter(|e| !e.locked)
        .map(|e| {
            let moved = e.transform.translated(dx, dy);
            (e.id, ElementPatch::position(moved.x, moved.y))
        })
        .collect();
    document.update_elements(&patches)
}

/// Translate an element by a whole-pixel step in one cardinal
/// direction. Fractional steps are rounded so repeated nudges stay on
/// integer coordinates.
pub fn nudge_element(element: &Element, direction: NudgeDirection, step: f64) -> Transform {
    let step = step.round().max(1.0);
    let (dx, dy) = match direction {
        NudgeDirection::Up => (0.0, -step),
        NudgeDirection::Down => (0.0, step),
        NudgeDirection::Left => (-step, 0.0),
        NudgeDirection::Right => (step, 0.0),
    };
    element.transform.translated(dx, dy)
}

/// Mirror the element about its own vertical center line. Scale is
/// applied around the box center, so the bounding box is unchanged.
pub fn flip_horizontal(element: &Element) -> Transform {
    Transform {
        scale_x: -element.transform.scale_x,
        ..element.transform
    }
}

/// Mirror the element about its own horizontal center line.
pub fn flip_vertical(element: &Element) -> Transform {
    Transform {
        scale_y: -element.transform.scale_y,
        ..element.transform
    }
}

/// Axis-aligned bounding box of one element.
pub fn element_bounds(element: &Element) -> Rect {
    element.bounds()
}

/// Union bounding box of the resolved ids; `None` when none resolve.
pub fn bounding_box(document: &Document, ids: &[ElementId]) -> Option<Rect> {
    document
        .elements_by_ids(ids)
        .iter()
        .map(|e| e.bounds())
        .reduce(|a, b| a.union(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ShapeKind;

    fn rect_element(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::shape(ShapeKind::Rectangle, Rect::new(x, y, x + w, y + h))
    }

    #[test]
    fn test_resize_se_grows_from_fixed_nw() {
        let element = rect_element(10.0, 10.0, 100.0, 50.0);
        let t = resize_element(&element, ResizeHandle::SouthEast, 20.0, 10.0, false);
        assert!((t.x - 10.0).abs() < f64::EPSILON);
        assert!((t.y - 10.0).abs() < f64::EPSILON);
        assert!((t.width - 120.0).abs() < f64::EPSILON);
        assert!((t.height - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_nw_keeps_se_corner_fixed() {
        let element = rect_element(10.0, 10.0, 100.0, 50.0);
        let t = resize_element(&element, ResizeHandle::NorthWest, 20.0, 5.0, false);
        // SE corner stays at (110, 60).
        assert!((t.x + t.width - 110.0).abs() < f64::EPSILON);
        assert!((t.y + t.height - 60.0).abs() < f64::EPSILON);
        assert!((t.width - 80.0).abs() < f64::EPSILON);
        assert!((t.height - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_edge_handle_only_touches_its_axis() {
        let element = rect_element(0.0, 0.0, 100.0, 50.0);
        let t = resize_element(&element, ResizeHandle::East, 30.0, 99.0, false);
        assert!((t.width - 130.0).abs() < f64::EPSILON);
        assert!((t.height - 50.0).abs() < f64::EPSILON);
        assert!((t.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let element = rect_element(0.0, 0.0, 100.0, 50.0);
        let t = resize_element(&element, ResizeHandle::SouthEast, -500.0, -500.0, false);
        assert!((t.width - MIN_ELEMENT_SIZE).abs() < f64::EPSILON);
        assert!((t.height - MIN_ELEMENT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_lock_aspect_dominant_delta() {
        // 2:1 aspect; dx of 40 dominates dy of 2.
        let element = rect_element(0.0, 0.0, 100.0, 50.0);
        let t = resize_element(&element, ResizeHandle::SouthEast, 40.0, 2.0, true);
        assert!((t.width - 140.0).abs() < f64::EPSILON);
        assert!((t.height - 70.0).abs() < f64::EPSILON);
        assert!((t.width / t.height - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_preserves_rotation_field() {
        let mut element = rect_element(0.0, 0.0, 100.0, 50.0);
        element.transform.rotation = 45.0;
        let t = resize_element(&element, ResizeHandle::East, 10.0, 0.0, false);
        assert!((t.rotation - 45.0).abs() < f64::EPSILON);
        // Screen-space delta applied directly: width grows by dx even
        // while rotated.
        assert!((t.width - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_skips_locked() {
        let a = rect_element(0.0, 0.0, 20.0, 20.0);
        let mut b = rect_element(50.0, 0.0, 20.0, 20.0);
        b.locked = true;
        let (a_id, b_id) = (a.id, b.id);
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();

        let doc = move_elements(&doc, &[a_id, b_id], 5.0, 5.0);
        assert!((doc.element(a_id).unwrap().transform.x - 5.0).abs() < f64::EPSILON);
        assert!((doc.element(b_id).unwrap().transform.x - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nudge_rounds_to_integer_step() {
        let element = rect_element(10.0, 10.0, 20.0, 20.0);
        let t = nudge_element(&element, NudgeDirection::Right, 1.4);
        assert!((t.x - 11.0).abs() < f64::EPSILON);
        let t = nudge_element(&element, NudgeDirection::Up, 10.0);
        assert!((t.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_flip_twice_is_identity() {
        let element = rect_element(10.0, 10.0, 20.0, 20.0);
        let mut flipped = element.clone();
        flipped.transform = flip_horizontal(&element);
        assert!((flipped.transform.scale_x + 1.0).abs() < f64::EPSILON);
        assert_eq!(flipped.bounds(), element.bounds());
        assert_eq!(flip_horizontal(&flipped), element.transform);

        let mut v = element.clone();
        v.transform = flip_vertical(&element);
        assert!((v.transform.scale_y + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounding_box_union() {
        let a = rect_element(0.0, 0.0, 20.0, 20.0);
        let b = rect_element(50.0, 30.0, 20.0, 20.0);
        let ids = vec![a.id, b.id];
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();

        let bounds = bounding_box(&doc, &ids).unwrap();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 70.0, 50.0));
        assert!(bounding_box(&doc, &[]).is_none());
    }
}

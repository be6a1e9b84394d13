//! Alignment and distribution of selections.

use crate::document::Document;
use crate::element::{ElementId, ElementPatch};
use crate::error::{StoreError, StoreResult};
use crate::transform::{bounding_box, Axis};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Horizontal alignment edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalEdge {
    Left,
    Center,
    Right,
}

/// Vertical alignment edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalEdge {
    Top,
    Middle,
    Bottom,
}

/// What the selection aligns against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignTarget {
    /// The union bounding box of the selection itself.
    Selection,
    /// The canvas rectangle.
    Canvas,
}

fn reference_box(document: &Document, ids: &[ElementId], target: AlignTarget) -> Option<Rect> {
    match target {
        AlignTarget::Selection => bounding_box(document, ids),
        AlignTarget::Canvas => Some(document.canvas_bounds()),
    }
}

/// Translate each targeted element so its bounding-box edge coincides
/// with the reference edge. Aligning twice to the same edge is a
/// no-op: the reference box is already the aligned selection's box.
pub fn align_elements(
    document: &Document,
    ids: &[ElementId],
    edge: HorizontalEdge,
    target: AlignTarget,
) -> Document {
    let Some(reference) = reference_box(document, ids, target) else {
        return document.clone();
    };
    let patches: Vec<(ElementId, ElementPatch)> = document
        .elements_by_ids(ids)
        .iter()
        .map(|e| {
            let bounds = e.bounds();
            let x = match edge {
                HorizontalEdge::Left => reference.x0,
                HorizontalEdge::Center => reference.center().x - bounds.width() / 2.0,
                HorizontalEdge::Right => reference.x1 - bounds.width(),
            };
            (e.id, ElementPatch::position(x, e.transform.y))
        })
        .collect();
    document.update_elements(&patches)
}

/// Vertical counterpart of [`align_elements`].
pub fn align_elements_vertical(
    document: &Document,
    ids: &[ElementId],
    edge: VerticalEdge,
    target: AlignTarget,
) -> Document {
    let Some(reference) = reference_box(document, ids, target) else {
        return document.clone();
    };
    let patches: Vec<(ElementId, ElementPatch)> = document
        .elements_by_ids(ids)
        .iter()
        .map(|e| {
            let bounds = e.bounds();
            let y = match edge {
                VerticalEdge::Top => reference.y0,
                VerticalEdge::Middle => reference.center().y - bounds.height() / 2.0,
                VerticalEdge::Bottom => reference.y1 - bounds.height(),
            };
            (e.id, ElementPatch::position(e.transform.x, y))
        })
        .collect();
    document.update_elements(&patches)
}

/// Re-space the targeted elements so the gaps between consecutive
/// bounding boxes along the axis are equal. Requires at least three
/// resolvable targets; the outermost two stay fixed.
pub fn distribute_elements(
    document: &Document,
    ids: &[ElementId],
    axis: Axis,
) -> StoreResult<Document> {
    let mut targets: Vec<(ElementId, Rect)> = document
        .elements_by_ids(ids)
        .iter()
        .map(|e| (e.id, e.bounds()))
        .collect();
    if targets.len() < 3 {
        return Err(StoreError::InvalidArity {
            required: 3,
            actual: targets.len(),
        });
    }

    let start = |r: &Rect| match axis {
        Axis::Horizontal => r.x0,
        Axis::Vertical => r.y0,
    };
    let extent = |r: &Rect| match axis {
        Axis::Horizontal => r.width(),
        Axis::Vertical => r.height(),
    };

    targets.sort_by(|a, b| start(&a.1).total_cmp(&start(&b.1)));

    let first = &targets[0].1;
    let last = &targets[targets.len() - 1].1;
    let interior_extent: f64 = targets[1..targets.len() - 1]
        .iter()
        .map(|(_, r)| extent(r))
        .sum();
    let free = start(last) - (start(first) + extent(first)) - interior_extent;
    let gap = free / (targets.len() - 1) as f64;

    let mut cursor = start(first) + extent(first) + gap;
    let mut patches: Vec<(ElementId, ElementPatch)> = Vec::new();
    for (id, bounds) in &targets[1..targets.len() - 1] {
        let patch = match axis {
            Axis::Horizontal => ElementPatch {
                x: Some(cursor),
                ..Default::default()
            },
            Axis::Vertical => ElementPatch {
                y: Some(cursor),
                ..Default::default()
            },
        };
        patches.push((*id, patch));
        cursor += extent(bounds) + gap;
    }
    Ok(document.update_elements(&patches))
}

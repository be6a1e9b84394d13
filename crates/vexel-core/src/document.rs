//! Document value and element store.
//!
//! The document is persistent per revision: every mutating operation
//! takes `&self` and returns a new `Document`, so history snapshots
//! stay valid independent of later edits. All in-place field mutation
//! funnels through [`ElementPatch`] via `update_elements`.

use crate::element::{Element, ElementId, ElementKind, ElementPatch, GroupPayload, Rgba, Transform};
use crate::error::{StoreError, StoreResult};
use crate::snap::Guide;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Zoom factor bounds.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

/// Position offset applied to duplicated and pasted elements.
pub const DUPLICATE_OFFSET: f64 = 16.0;

/// Version of the persisted document envelope.
pub const FORMAT_VERSION: u32 = 1;

/// Grid configuration for the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Grid cell size in canvas units.
    pub size: f64,
    pub color: Rgba,
    /// Grid line opacity in [0, 1].
    pub opacity: f64,
    pub visible: bool,
    /// Whether drag positions snap to grid multiples.
    pub snap: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 20.0,
            color: Rgba::new(128, 128, 128, 255),
            opacity: 0.3,
            visible: false,
            snap: false,
        }
    }
}

/// Which way to move an element in the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReorderDirection {
    Front,
    Back,
    Forward,
    Backward,
}

/// The root document value: canvas settings plus the ordered element
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    /// Canvas width in canvas units; always positive and finite.
    width: f64,
    /// Canvas height in canvas units; always positive and finite.
    height: f64,
    pub background: Rgba,
    zoom: f64,
    pub grid: GridSettings,
    elements: Vec<Element>,
}

/// Clamp a canvas dimension to a positive finite value.
fn clamp_dimension(value: f64) -> f64 {
    if value.is_finite() {
        value.max(1.0)
    } else {
        1.0
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with the default canvas size.
    pub fn new() -> Self {
        Self::with_size(1280.0, 800.0)
    }

    /// Create an empty document with the given canvas size. Degenerate
    /// dimensions are clamped to 1.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            name: "Untitled".to_string(),
            width: clamp_dimension(width),
            height: clamp_dimension(height),
            background: Rgba::white(),
            zoom: 1.0,
            grid: GridSettings::default(),
            elements: Vec::new(),
        }
    }

    /// Canvas width in canvas units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height in canvas units.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Return a copy with a new canvas size, clamped to positive
    /// finite values.
    pub fn set_canvas_size(&self, width: f64, height: f64) -> Document {
        let mut doc = self.clone();
        doc.width = clamp_dimension(width);
        doc.height = clamp_dimension(height);
        doc
    }

    /// The canvas rectangle at zoom 1.
    pub fn canvas_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Return a copy with the zoom clamped into [`MIN_ZOOM`, `MAX_ZOOM`].
    /// Non-finite values leave the document unchanged.
    pub fn set_zoom(&self, zoom: f64) -> Document {
        let mut doc = self.clone();
        if zoom.is_finite() {
            doc.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        doc
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Look up one element by id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Look up many elements; missing ids are silently skipped.
    pub fn elements_by_ids(&self, ids: &[ElementId]) -> Vec<&Element> {
        ids.iter().filter_map(|&id| self.element(id)).collect()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Elements with no owning group, in insertion order.
    pub fn top_level_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_top_level())
    }

    /// Elements sorted for painting: ascending `z_index`, ties broken
    /// by collection position (stable).
    pub fn elements_in_paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Append a new element. Fails with [`StoreError::DuplicateId`] if
    /// the id already exists, leaving the document unchanged.
    pub fn add_element(&self, element: Element) -> StoreResult<Document> {
        if self.contains(element.id) {
            log::warn!("rejected add of duplicate element id {}", element.id);
            return Err(StoreError::DuplicateId(element.id));
        }
        let mut doc = self.clone();
        doc.elements.push(element);
        Ok(doc)
    }

    /// Merge one partial patch into one element; unknown id is a no-op.
    pub fn update_element(&self, id: ElementId, patch: &ElementPatch) -> Document {
        self.update_elements(&[(id, patch.clone())])
    }

    /// Merge partial patches into the matched elements. Unknown ids
    /// are no-ops; values are clamped by [`ElementPatch::apply_to`].
    pub fn update_elements(&self, patches: &[(ElementId, ElementPatch)]) -> Document {
        let mut doc = self.clone();
        for (id, patch) in patches {
            if let Some(element) = doc.elements.iter_mut().find(|e| e.id == *id) {
                patch.apply_to(element);
            }
        }
        doc
    }

    /// Remove the matched elements. Children of a removed group are
    /// not deleted with it: their `parent_id` is cleared and they
    /// return to top level. Callers that want the whole subtree gone
    /// must pass the child ids too. Surviving groups drop the deleted
    /// ids from their child lists, so every `child_ids` entry keeps
    /// resolving; a group may end up with fewer than two members and
    /// stays alive until the caller dissolves it.
    pub fn delete_elements(&self, ids: &[ElementId]) -> Document {
        let mut doc = self.clone();
        let removed_groups: Vec<ElementId> = doc
            .elements
            .iter()
            .filter(|e| ids.contains(&e.id) && e.is_group())
            .map(|e| e.id)
            .collect();
        doc.elements.retain(|e| !ids.contains(&e.id));
        for element in &mut doc.elements {
            if let Some(parent) = element.parent_id {
                if removed_groups.contains(&parent) {
                    element.parent_id = None;
                }
            }
            if let ElementKind::Group(group) = &mut element.kind {
                group.child_ids.retain(|c| !ids.contains(c));
            }
        }
        doc
    }

    /// Deep-clone the targeted elements with fresh ids, "<name> Copy"
    /// labels and a fixed position offset, preserving relative
    /// z-order. Group targets bring their whole subtree along, with
    /// ownership links remapped onto the clones. Returns the clones'
    /// ids for the requested targets so the caller can re-select them.
    pub fn duplicate_elements(&self, ids: &[ElementId]) -> (Document, Vec<ElementId>) {
        let expanded = self.expand_with_descendants(ids);
        let originals: Vec<Element> = self
            .elements
            .iter()
            .filter(|e| expanded.contains(&e.id))
            .cloned()
            .collect();
        if originals.is_empty() {
            return (self.clone(), Vec::new());
        }

        let mut mapping: HashMap<ElementId, ElementId> = HashMap::new();
        for element in &originals {
            mapping.insert(element.id, Uuid::new_v4());
        }

        let mut doc = self.clone();
        for original in &originals {
            let mut clone = original.clone();
            clone.id = mapping[&original.id];
            clone.name = format!("{} Copy", original.name);
            clone.transform = clone.transform.translated(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
            clone.parent_id = original.parent_id.and_then(|p| mapping.get(&p).copied());
            if let ElementKind::Group(group) = &mut clone.kind {
                group.child_ids = group
                    .child_ids
                    .iter()
                    .filter_map(|c| mapping.get(c).copied())
                    .collect();
            }
            doc.elements.push(clone);
        }

        let new_ids = ids.iter().filter_map(|id| mapping.get(id).copied()).collect();
        (doc, new_ids)
    }

    /// Gather the given ids plus all descendants of any groups among
    /// them, without duplicates.
    pub(crate) fn expand_with_descendants(&self, ids: &[ElementId]) -> Vec<ElementId> {
        let mut result: Vec<ElementId> = Vec::new();
        let mut pending: Vec<ElementId> = ids.to_vec();
        while let Some(id) = pending.pop() {
            let Some(element) = self.element(id) else { continue };
            if result.contains(&id) {
                continue;
            }
            result.push(id);
            if let Some(group) = element.as_group() {
                pending.extend(group.child_ids.iter().copied());
            }
        }
        result
    }

    /// Collect the given ids into a new group element. Requires at
    /// least two resolvable ids. The group's `z_index` is the maximum
    /// of its members and its box is their union bounds; members keep
    /// their own `z_index` and gain a `parent_id` back-reference.
    pub fn group_elements(&self, ids: &[ElementId]) -> StoreResult<(Document, ElementId)> {
        let members = self.elements_by_ids(ids);
        if members.len() < 2 {
            return Err(StoreError::InvalidArity {
                required: 2,
                actual: members.len(),
            });
        }

        let mut union: Option<Rect> = None;
        let mut max_z = i32::MIN;
        for member in &members {
            let bounds = member.bounds();
            union = Some(match union {
                Some(u) => u.union(bounds),
                None => bounds,
            });
            max_z = max_z.max(member.z_index);
        }
        let bounds = union.unwrap_or(Rect::ZERO);

        let member_ids: Vec<ElementId> = members.iter().map(|m| m.id).collect();
        let mut group = Element::new(
            "Group",
            Transform::new(bounds.x0, bounds.y0, bounds.width(), bounds.height()),
            ElementKind::Group(GroupPayload::new(member_ids.clone())),
        );
        group.z_index = max_z;
        let group_id = group.id;

        let mut doc = self.clone();
        for element in &mut doc.elements {
            if member_ids.contains(&element.id) {
                element.parent_id = Some(group_id);
            }
        }
        doc.elements.push(group);
        Ok((doc, group_id))
    }

    /// Dissolve a group: clear `parent_id` on its former children and
    /// remove the group element. Children keep the `z_index` they
    /// carried all along, so the pre-group paint order is restored.
    /// Silently a no-op if the id does not resolve to a group.
    pub fn ungroup_elements(&self, group_id: ElementId) -> Document {
        let Some(child_ids) = self
            .element(group_id)
            .and_then(|e| e.as_group())
            .map(|g| g.child_ids.clone())
        else {
            return self.clone();
        };

        let mut doc = self.clone();
        for element in &mut doc.elements {
            if child_ids.contains(&element.id) && element.parent_id == Some(group_id) {
                element.parent_id = None;
            }
        }
        doc.elements.retain(|e| e.id != group_id);
        doc
    }

    /// Move an element in the paint order. Unknown id is a no-op.
    ///
    /// - `Front`: `z_index` becomes the document maximum plus one.
    /// - `Back`: every other non-negative `z_index` shifts up by one
    ///   and the target drops to zero.
    /// - `Forward`/`Backward`: the target swaps `z_index` with its
    ///   immediate paint-order neighbor.
    pub fn reorder_element(&self, id: ElementId, direction: ReorderDirection) -> Document {
        if !self.contains(id) {
            return self.clone();
        }
        let mut doc = self.clone();
        match direction {
            ReorderDirection::Front => {
                let max_z = doc.elements.iter().map(|e| e.z_index).max().unwrap_or(0);
                if let Some(element) = doc.elements.iter_mut().find(|e| e.id == id) {
                    element.z_index = max_z + 1;
                }
            }
            ReorderDirection::Back => {
                for element in &mut doc.elements {
                    if element.id != id && element.z_index >= 0 {
                        element.z_index += 1;
                    }
                }
                if let Some(element) = doc.elements.iter_mut().find(|e| e.id == id) {
                    element.z_index = 0;
                }
            }
            ReorderDirection::Forward | ReorderDirection::Backward => {
                let order: Vec<ElementId> =
                    self.elements_in_paint_order().iter().map(|e| e.id).collect();
                let Some(pos) = order.iter().position(|&e| e == id) else {
                    return doc;
                };
                let neighbor_pos = match direction {
                    ReorderDirection::Forward if pos + 1 < order.len() => pos + 1,
                    ReorderDirection::Backward if pos > 0 => pos - 1,
                    _ => return doc, // already at the end of the order
                };
                let neighbor = order[neighbor_pos];
                let z_a = self.element(id).map(|e| e.z_index).unwrap_or(0);
                let z_b = self.element(neighbor).map(|e| e.z_index).unwrap_or(0);
                for element in &mut doc.elements {
                    if element.id == id {
                        element.z_index = z_b;
                    } else if element.id == neighbor {
                        element.z_index = z_a;
                    }
                }
            }
        }
        doc
    }

    /// Visible top-level elements whose bounding box intersects the
    /// selection rectangle, in paint order.
    pub fn elements_in_rect(&self, rect: Rect) -> Vec<ElementId> {
        self.elements_in_paint_order()
            .iter()
            .filter(|e| e.is_top_level() && e.visible)
            .filter(|e| rect.intersect(e.bounds()).area() > 0.0)
            .map(|e| e.id)
            .collect()
    }

    /// Visible top-level elements whose bounding box contains the
    /// point, front to back for selection priority.
    pub fn elements_at_point(&self, point: Point) -> Vec<ElementId> {
        self.elements_in_paint_order()
            .iter()
            .rev()
            .filter(|e| e.is_top_level() && e.visible)
            .filter(|e| e.bounds().contains(point))
            .map(|e| e.id)
            .collect()
    }

    /// Re-insert element snapshots, overwriting entries that share an
    /// id and appending the rest. Used when replaying history.
    pub(crate) fn upsert_elements(&self, snapshots: &[Element]) -> Document {
        let mut doc = self.clone();
        for snapshot in snapshots {
            if let Some(existing) = doc.elements.iter_mut().find(|e| e.id == snapshot.id) {
                *existing = snapshot.clone();
            } else {
                doc.elements.push(snapshot.clone());
            }
        }
        doc
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Persisted envelope: the canvas plus its ruler guides, tagged with a
/// schema version so future loaders can migrate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    pub version: u32,
    pub canvas: Document,
    pub guides: Vec<Guide>,
}

impl DocumentFile {
    /// Wrap a document and its guides in the current envelope version.
    pub fn new(canvas: Document, guides: Vec<Guide>) -> Self {
        Self {
            version: FORMAT_VERSION,
            canvas,
            guides,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ShapeKind;

    fn rect_at(x: f64, y: f64) -> Element {
        Element::shape(ShapeKind::Rectangle, Rect::new(x, y, x + 20.0, y + 20.0))
    }

    #[test]
    fn test_add_and_lookup() {
        let doc = Document::new();
        let element = rect_at(0.0, 0.0);
        let id = element.id;

        let doc = doc.add_element(element).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.element(id).is_some());
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let element = rect_at(0.0, 0.0);
        let doc = Document::new().add_element(element.clone()).unwrap();

        let result = doc.add_element(element);
        assert!(matches!(result, Err(StoreError::DuplicateId(_))));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_mutation_returns_new_revision() {
        let element = rect_at(0.0, 0.0);
        let id = element.id;
        let before = Document::new().add_element(element).unwrap();

        let after = before.update_element(id, &ElementPatch::position(50.0, 50.0));

        // The earlier revision is untouched.
        assert!((before.element(id).unwrap().transform.x - 0.0).abs() < f64::EPSILON);
        assert!((after.element(id).unwrap().transform.x - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let doc = Document::new().add_element(rect_at(0.0, 0.0)).unwrap();
        let updated = doc.update_element(Uuid::new_v4(), &ElementPatch::position(9.0, 9.0));
        assert_eq!(doc, updated);
    }

    #[test]
    fn test_delete_group_orphans_children() {
        let a = rect_at(0.0, 0.0);
        let b = rect_at(40.0, 0.0);
        let (a_id, b_id) = (a.id, b.id);
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();
        let (doc, group_id) = doc.group_elements(&[a_id, b_id]).unwrap();

        let doc = doc.delete_elements(&[group_id]);

        assert!(doc.element(group_id).is_none());
        // Children survive and return to top level.
        assert!(doc.element(a_id).unwrap().is_top_level());
        assert!(doc.element(b_id).unwrap().is_top_level());
    }

    #[test]
    fn test_delete_child_scrubbed_from_group() {
        let a = rect_at(0.0, 0.0);
        let b = rect_at(40.0, 0.0);
        let (a_id, b_id) = (a.id, b.id);
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();
        let (doc, group_id) = doc.group_elements(&[a_id, b_id]).unwrap();

        let doc = doc.delete_elements(&[a_id]);

        assert!(doc.element(a_id).is_none());
        let group = doc.element(group_id).unwrap().as_group().unwrap();
        assert_eq!(group.child_ids, vec![b_id]);
        // Every remaining child id resolves.
        for element in doc.elements() {
            if let Some(payload) = element.as_group() {
                for child_id in &payload.child_ids {
                    assert!(doc.element(*child_id).is_some());
                }
            }
        }
    }

    #[test]
    fn test_duplicate_generates_fresh_ids() {
        let a = rect_at(0.0, 0.0);
        let b = rect_at(40.0, 0.0);
        let ids = vec![a.id, b.id];
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();

        let (doc, new_ids) = doc.duplicate_elements(&ids);

        assert_eq!(new_ids.len(), 2);
        assert_eq!(doc.len(), 4);
        for new_id in &new_ids {
            assert!(!ids.contains(new_id));
        }
        let copy = doc.element(new_ids[0]).unwrap();
        assert!(copy.name.ends_with(" Copy"));
        assert!((copy.transform.x - DUPLICATE_OFFSET).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_group_remaps_ownership() {
        let a = rect_at(0.0, 0.0);
        let b = rect_at(40.0, 0.0);
        let (a_id, b_id) = (a.id, b.id);
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();
        let (doc, group_id) = doc.group_elements(&[a_id, b_id]).unwrap();

        let (doc, new_ids) = doc.duplicate_elements(&[group_id]);

        assert_eq!(new_ids.len(), 1);
        let new_group = doc.element(new_ids[0]).unwrap();
        let payload = new_group.as_group().unwrap();
        assert_eq!(payload.len(), 2);
        // Cloned children exist, point at the cloned group, and are
        // distinct from the originals.
        for child_id in &payload.child_ids {
            assert_ne!(*child_id, a_id);
            assert_ne!(*child_id, b_id);
            let child = doc.element(*child_id).unwrap();
            assert_eq!(child.parent_id, Some(new_ids[0]));
        }
    }

    #[test]
    fn test_group_requires_two_elements() {
        let a = rect_at(0.0, 0.0);
        let a_id = a.id;
        let doc = Document::new().add_element(a).unwrap();

        let result = doc.group_elements(&[a_id]);
        assert!(matches!(
            result,
            Err(StoreError::InvalidArity {
                required: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_group_ungroup_closure() {
        let mut a = rect_at(0.0, 0.0);
        let mut b = rect_at(40.0, 0.0);
        a.z_index = 3;
        b.z_index = 7;
        let (a_id, b_id) = (a.id, b.id);
        let doc = Document::new()
            .add_element(a.clone())
            .unwrap()
            .add_element(b.clone())
            .unwrap();

        let (grouped, group_id) = doc.group_elements(&[a_id, b_id]).unwrap();
        let group = grouped.element(group_id).unwrap();
        assert_eq!(group.z_index, 7); // max of members
        assert_eq!(grouped.element(a_id).unwrap().parent_id, Some(group_id));
        assert_eq!(grouped.top_level_elements().count(), 1);

        let ungrouped = grouped.ungroup_elements(group_id);
        assert!(ungrouped.element(group_id).is_none());
        // Children come back exactly as they went in.
        assert_eq!(ungrouped.element(a_id), Some(&a));
        assert_eq!(ungrouped.element(b_id), Some(&b));
    }

    #[test]
    fn test_ungroup_non_group_is_noop() {
        let a = rect_at(0.0, 0.0);
        let a_id = a.id;
        let doc = Document::new().add_element(a).unwrap();
        assert_eq!(doc, doc.ungroup_elements(a_id));
        assert_eq!(doc, doc.ungroup_elements(Uuid::new_v4()));
    }

    #[test]
    fn test_reorder_front_is_unique_maximum() {
        let a = rect_at(0.0, 0.0);
        let b = rect_at(10.0, 0.0);
        let c = rect_at(20.0, 0.0);
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap()
            .add_element(c)
            .unwrap();
        let doc = doc.update_elements(&[
            (b_id, ElementPatch { z_index: Some(1), ..Default::default() }),
            (c_id, ElementPatch { z_index: Some(2), ..Default::default() }),
        ]);

        let doc = doc.reorder_element(a_id, ReorderDirection::Front);

        let front_z = doc.element(a_id).unwrap().z_index;
        assert_eq!(front_z, 3);
        for element in doc.elements() {
            if element.id != a_id {
                assert!(element.z_index < front_z);
            }
        }
    }

    #[test]
    fn test_reorder_back_shifts_others_up() {
        let a = rect_at(0.0, 0.0);
        let b = rect_at(10.0, 0.0);
        let (a_id, b_id) = (a.id, b.id);
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();
        let doc = doc.update_element(b_id, &ElementPatch { z_index: Some(5), ..Default::default() });

        let doc = doc.reorder_element(b_id, ReorderDirection::Back);

        assert_eq!(doc.element(b_id).unwrap().z_index, 0);
        assert_eq!(doc.element(a_id).unwrap().z_index, 1);
    }

    #[test]
    fn test_reorder_forward_swaps_neighbor() {
        let a = rect_at(0.0, 0.0);
        let b = rect_at(10.0, 0.0);
        let (a_id, b_id) = (a.id, b.id);
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();
        let doc = doc.update_elements(&[
            (a_id, ElementPatch { z_index: Some(1), ..Default::default() }),
            (b_id, ElementPatch { z_index: Some(2), ..Default::default() }),
        ]);

        let doc = doc.reorder_element(a_id, ReorderDirection::Forward);
        assert_eq!(doc.element(a_id).unwrap().z_index, 2);
        assert_eq!(doc.element(b_id).unwrap().z_index, 1);

        // Already frontmost: no-op.
        let same = doc.reorder_element(a_id, ReorderDirection::Forward);
        assert_eq!(doc, same);
    }

    #[test]
    fn test_paint_order_stable_for_ties() {
        let a = rect_at(0.0, 0.0);
        let b = rect_at(10.0, 0.0);
        let (a_id, b_id) = (a.id, b.id);
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();

        let order: Vec<ElementId> = doc.elements_in_paint_order().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![a_id, b_id]);
    }

    #[test]
    fn test_canvas_size_clamped() {
        let doc = Document::with_size(-100.0, f64::NAN);
        assert!((doc.width() - 1.0).abs() < f64::EPSILON);
        assert!((doc.height() - 1.0).abs() < f64::EPSILON);

        let doc = doc.set_canvas_size(1920.0, 0.0);
        assert!((doc.width() - 1920.0).abs() < f64::EPSILON);
        assert!((doc.height() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamped() {
        let doc = Document::new();
        assert!((doc.set_zoom(10.0).zoom() - MAX_ZOOM).abs() < f64::EPSILON);
        assert!((doc.set_zoom(0.0).zoom() - MIN_ZOOM).abs() < f64::EPSILON);
        assert!((doc.set_zoom(f64::NAN).zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_elements_at_point_front_first() {
        let a = rect_at(0.0, 0.0);
        let b = rect_at(10.0, 10.0);
        let (a_id, b_id) = (a.id, b.id);
        let doc = Document::new()
            .add_element(a)
            .unwrap()
            .add_element(b)
            .unwrap();

        let hits = doc.elements_at_point(Point::new(15.0, 15.0));
        assert_eq!(hits, vec![b_id, a_id]);
    }

    #[test]
    fn test_document_file_roundtrip() {
        let doc = Document::new().add_element(rect_at(0.0, 0.0)).unwrap();
        let file = DocumentFile::new(doc.clone(), Vec::new());
        let json = file.to_json().unwrap();
        let loaded = DocumentFile::from_json(&json).unwrap();
        assert_eq!(loaded.version, FORMAT_VERSION);
        assert_eq!(loaded.canvas, doc);
    }
}

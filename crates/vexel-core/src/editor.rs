//! Editor session: document, guides, selection and history in one
//! place.
//!
//! The editor is the command boundary: it turns each completed user
//! gesture into exactly one [`Command`] built from before/after
//! snapshots, applies the new document revision, and records the
//! command. Undo/redo replay recorded state; they never re-derive
//! geometry.

use crate::command::{Command, CommandKind, StyleChange, TransformChange, ZIndexChange};
use crate::document::{Document, DocumentFile, ReorderDirection};
use crate::element::{Element, ElementId, ElementPatch};
use crate::error::StoreResult;
use crate::history::CommandHistory;
use crate::snap::Guide;
use crate::transform::{self, NudgeDirection};
use std::collections::HashMap;
use uuid::Uuid;

/// Copied element snapshots awaiting paste.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    elements: Vec<Element>,
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A live editing session over one document.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    guides: Vec<Guide>,
    history: CommandHistory,
    selection: Vec<ElementId>,
    clipboard: Clipboard,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            guides: Vec::new(),
            history: CommandHistory::new(),
            selection: Vec::new(),
            clipboard: Clipboard::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selection
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the selection, dropping ids that don't resolve and
    /// duplicates.
    pub fn select(&mut self, ids: &[ElementId]) {
        let mut selection = Vec::with_capacity(ids.len());
        for &id in ids {
            if self.document.contains(id) && !selection.contains(&id) {
                selection.push(id);
            }
        }
        self.selection = selection;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Insert one element as an undoable gesture and select it.
    pub fn add_element(&mut self, element: Element) -> StoreResult<ElementId> {
        let id = element.id;
        self.document = self.document.add_element(element.clone())?;
        self.push(CommandKind::Add {
            elements: vec![element],
        });
        self.selection = vec![id];
        Ok(id)
    }

    /// Delete the selection, including group members, as one gesture.
    pub fn delete_selection(&mut self) {
        let ids = self.document.expand_with_descendants(&self.selection);
        if ids.is_empty() {
            return;
        }
        let snapshots: Vec<Element> = self
            .document
            .elements_by_ids(&ids)
            .into_iter()
            .cloned()
            .collect();
        self.document = self.document.delete_elements(&ids);
        self.push(CommandKind::Delete {
            elements: snapshots,
        });
        self.selection.clear();
    }

    /// Translate the selection (group members included) by one delta.
    pub fn move_selection(&mut self, dx: f64, dy: f64) {
        let ids = self.document.expand_with_descendants(&self.selection);
        let changes: Vec<TransformChange> = self
            .document
            .elements_by_ids(&ids)
            .iter()
            .filter(|e| !e.locked)
            .map(|e| TransformChange {
                id: e.id,
                before: e.transform,
                after: e.transform.translated(dx, dy),
            })
            .collect();
        self.commit_move(changes);
    }

    /// Arrow-key nudge of the selection.
    pub fn nudge_selection(&mut self, direction: NudgeDirection, step: f64) {
        let ids = self.document.expand_with_descendants(&self.selection);
        let changes: Vec<TransformChange> = self
            .document
            .elements_by_ids(&ids)
            .iter()
            .filter(|e| !e.locked)
            .map(|e| TransformChange {
                id: e.id,
                before: e.transform,
                after: transform::nudge_element(e, direction, step),
            })
            .collect();
        self.commit_move(changes);
    }

    /// Record a finished move drag. The caller supplies the before and
    /// after transforms it tracked during the gesture.
    pub fn commit_move(&mut self, changes: Vec<TransformChange>) {
        self.commit_transforms(changes, |changes| CommandKind::Move { changes });
    }

    /// Record a finished resize drag.
    pub fn commit_resize(&mut self, changes: Vec<TransformChange>) {
        self.commit_transforms(changes, |changes| CommandKind::Resize { changes });
    }

    /// Record a finished rotate drag.
    pub fn commit_rotate(&mut self, changes: Vec<TransformChange>) {
        self.commit_transforms(changes, |changes| CommandKind::Rotate { changes });
    }

    fn commit_transforms(
        &mut self,
        changes: Vec<TransformChange>,
        make: fn(Vec<TransformChange>) -> CommandKind,
    ) {
        if changes.is_empty() {
            return;
        }
        let patches: Vec<(ElementId, ElementPatch)> = changes
            .iter()
            .map(|c| (c.id, ElementPatch::from_transform(&c.after)))
            .collect();
        self.document = self.document.update_elements(&patches);
        self.push(make(changes));
    }

    /// Apply one style patch across the matched elements as a single
    /// gesture, so undo is atomic per gesture and not per element.
    pub fn apply_style(&mut self, patches: &[(ElementId, ElementPatch)]) {
        let changes: Vec<StyleChange> = patches
            .iter()
            .filter(|(_, patch)| !patch.is_empty())
            .filter_map(|(id, patch)| {
                self.document
                    .element(*id)
                    .map(|e| StyleChange::capture(e, patch.clone()))
            })
            .collect();
        if changes.is_empty() {
            return;
        }
        self.document = self.document.update_elements(patches);
        self.push(CommandKind::Style { changes });
    }

    /// Move one element through the paint order. A single reorder can
    /// shift many z-indices (send-to-back does); the whole diff is one
    /// command.
    pub fn reorder(&mut self, id: ElementId, direction: ReorderDirection) {
        let after_doc = self.document.reorder_element(id, direction);
        let changes: Vec<ZIndexChange> = self
            .document
            .elements()
            .iter()
            .filter_map(|before| {
                let after = after_doc.element(before.id)?;
                (after.z_index != before.z_index).then_some(ZIndexChange {
                    id: before.id,
                    before: before.z_index,
                    after: after.z_index,
                })
            })
            .collect();
        if changes.is_empty() {
            return;
        }
        self.document = after_doc;
        self.push(CommandKind::Reorder { changes });
    }

    /// Group the selection and select the new group.
    pub fn group_selection(&mut self) -> StoreResult<ElementId> {
        let before: Vec<Element> = self
            .document
            .elements_by_ids(&self.selection)
            .into_iter()
            .cloned()
            .collect();
        let (after_doc, group_id) = self.document.group_elements(&self.selection)?;

        let mut touched: Vec<ElementId> = before.iter().map(|e| e.id).collect();
        touched.push(group_id);
        let after: Vec<Element> = after_doc
            .elements_by_ids(&touched)
            .into_iter()
            .cloned()
            .collect();

        self.document = after_doc;
        self.push(CommandKind::Group { before, after });
        self.selection = vec![group_id];
        Ok(group_id)
    }

    /// Dissolve every selected group as one gesture and select the
    /// freed children. Non-groups in the selection are left alone.
    pub fn ungroup_selection(&mut self) {
        let group_ids: Vec<ElementId> = self
            .document
            .elements_by_ids(&self.selection)
            .iter()
            .filter(|e| e.is_group())
            .map(|e| e.id)
            .collect();
        if group_ids.is_empty() {
            return;
        }

        let touched = self.document.expand_with_descendants(&group_ids);
        let before: Vec<Element> = self
            .document
            .elements_by_ids(&touched)
            .into_iter()
            .cloned()
            .collect();

        let mut doc = self.document.clone();
        let mut freed: Vec<ElementId> = Vec::new();
        for group_id in &group_ids {
            if let Some(group) = doc.element(*group_id).and_then(|e| e.as_group()) {
                freed.extend(group.child_ids.iter().copied());
            }
            doc = doc.ungroup_elements(*group_id);
        }
        let after: Vec<Element> = doc
            .elements_by_ids(&freed)
            .into_iter()
            .cloned()
            .collect();

        self.document = doc;
        self.push(CommandKind::Ungroup { before, after });
        self.selection = freed;
    }

    /// Duplicate the selection and select the copies.
    pub fn duplicate_selection(&mut self) {
        let (doc, new_ids) = self.document.duplicate_elements(&self.selection);
        if new_ids.is_empty() {
            return;
        }
        let inserted = doc.expand_with_descendants(&new_ids);
        let snapshots: Vec<Element> = doc
            .elements_by_ids(&inserted)
            .into_iter()
            .cloned()
            .collect();
        self.document = doc;
        self.push(CommandKind::Add {
            elements: snapshots,
        });
        self.selection = new_ids;
    }

    /// Snapshot the selection (group members included) for pasting.
    pub fn copy_selection(&mut self) {
        let ids = self.document.expand_with_descendants(&self.selection);
        self.clipboard.elements = self
            .document
            .elements_by_ids(&ids)
            .into_iter()
            .cloned()
            .collect();
    }

    /// Paste the clipboard with fresh ids and a small offset, select
    /// the pasted elements. Snapshots survive deletion of the
    /// originals, so copy/delete/paste works.
    pub fn paste(&mut self) {
        if self.clipboard.is_empty() {
            return;
        }
        let pasted = remap_ids(&self.clipboard.elements, crate::document::DUPLICATE_OFFSET);
        let mut doc = self.document.clone();
        for element in &pasted {
            match doc.add_element(element.clone()) {
                Ok(next) => doc = next,
                // Fresh v4 ids; a collision here means the remap is broken.
                Err(err) => {
                    log::warn!("paste skipped element: {err}");
                }
            }
        }
        let top_level: Vec<ElementId> = pasted
            .iter()
            .filter(|e| e.is_top_level())
            .map(|e| e.id)
            .collect();
        self.document = doc;
        self.push(CommandKind::Add { elements: pasted });
        self.selection = top_level;
    }

    /// Replace the guide list as an undoable gesture.
    pub fn set_guides(&mut self, guides: Vec<Guide>) {
        if guides == self.guides {
            return;
        }
        let before = std::mem::replace(&mut self.guides, guides.clone());
        self.push(CommandKind::Guides {
            before,
            after: guides,
        });
    }

    pub fn add_guide(&mut self, guide: Guide) {
        let mut guides = self.guides.clone();
        guides.push(guide);
        self.set_guides(guides);
    }

    pub fn remove_guide(&mut self, id: Uuid) {
        let guides: Vec<Guide> = self.guides.iter().copied().filter(|g| g.id != id).collect();
        self.set_guides(guides);
    }

    /// Change the zoom factor. View state, not document content: not
    /// recorded in history.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.document = self.document.set_zoom(zoom);
    }

    /// Revert the most recent command. Returns its label, or `None` if
    /// there was nothing to undo.
    pub fn undo(&mut self) -> Option<&'static str> {
        let command = self.history.undo()?;
        self.document = command.revert(&self.document);
        if let CommandKind::Guides { before, .. } = &command.kind {
            self.guides = before.clone();
        }
        self.prune_selection();
        Some(command.kind.label())
    }

    /// Reapply the most recently undone command.
    pub fn redo(&mut self) -> Option<&'static str> {
        let command = self.history.redo()?;
        self.document = command.reapply(&self.document);
        if let CommandKind::Guides { after, .. } = &command.kind {
            self.guides = after.clone();
        }
        self.prune_selection();
        Some(command.kind.label())
    }

    /// Serialize the session for persistence.
    pub fn save_document(&self) -> DocumentFile {
        DocumentFile::new(self.document.clone(), self.guides.clone())
    }

    /// Replace the session with a loaded document. History and
    /// selection are cleared: they belong to the previous document.
    pub fn load_document(&mut self, file: DocumentFile) {
        log::debug!(
            "loading document '{}' (format v{})",
            file.canvas.name,
            file.version
        );
        self.document = file.canvas;
        self.guides = file.guides;
        self.history.clear();
        self.selection.clear();
        self.clipboard = Clipboard::default();
    }

    fn push(&mut self, kind: CommandKind) {
        self.history.push(Command::new(kind));
    }

    fn prune_selection(&mut self) {
        let document = &self.document;
        self.selection.retain(|id| document.contains(*id));
    }
}

/// Clone snapshots with fresh ids and an offset, remapping ownership
/// links (`parent_id`, group child lists) onto the clones. Links to
/// elements outside the snapshot set are dropped.
fn remap_ids(snapshots: &[Element], offset: f64) -> Vec<Element> {
    let mut mapping: HashMap<ElementId, ElementId> = HashMap::new();
    for element in snapshots {
        mapping.insert(element.id, Uuid::new_v4());
    }
    snapshots
        .iter()
        .map(|original| {
            let mut clone = original.clone();
            clone.id = mapping[&original.id];
            clone.transform = clone.transform.translated(offset, offset);
            clone.parent_id = original.parent_id.and_then(|p| mapping.get(&p).copied());
            if let crate::element::ElementKind::Group(group) = &mut clone.kind {
                group.child_ids = group
                    .child_ids
                    .iter()
                    .filter_map(|c| mapping.get(c).copied())
                    .collect();
            }
            clone
        })
        .collect()
}

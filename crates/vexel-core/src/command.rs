//! Invertible edit commands.
//!
//! A command records before/after state for one atomic user gesture.
//! Commands are immutable once constructed and opaque to the document:
//! they are built by the caller from snapshots, and only history
//! replay interprets them. `revert`/`reapply` never re-derive
//! geometry; they replay the recorded state.

use crate::document::Document;
use crate::element::{Element, ElementId, ElementPatch, Transform};
use crate::snap::Guide;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, for command timestamps.
pub fn timestamp_ms() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as u64,
        Err(_) => 0,
    }
}

/// Before/after transform of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformChange {
    pub id: ElementId,
    pub before: Transform,
    pub after: Transform,
}

/// Before/after field patch of one element. Both patches cover the
/// same fields, so applying one undoes the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleChange {
    pub id: ElementId,
    pub before: ElementPatch,
    pub after: ElementPatch,
}

impl StyleChange {
    /// Build a reversible change by capturing the element's current
    /// values for the fields `after` touches.
    pub fn capture(element: &Element, after: ElementPatch) -> Self {
        Self {
            id: element.id,
            before: ElementPatch::before_for(element, &after),
            after,
        }
    }
}

/// Before/after paint-order key of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZIndexChange {
    pub id: ElementId,
    pub before: i32,
    pub after: i32,
}

/// What a command did, as a closed union. Every undoable change,
/// including document-level ones like guide edits, has its own typed
/// variant; there is no catch-all payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandKind {
    /// Elements inserted (snapshots taken at insert time).
    Add { elements: Vec<Element> },
    /// Elements removed (snapshots taken just before removal).
    Delete { elements: Vec<Element> },
    Move { changes: Vec<TransformChange> },
    Resize { changes: Vec<TransformChange> },
    Rotate { changes: Vec<TransformChange> },
    Style { changes: Vec<StyleChange> },
    Reorder { changes: Vec<ZIndexChange> },
    /// Grouping: the members before (top-level) and the members plus
    /// the new group after.
    Group {
        before: Vec<Element>,
        after: Vec<Element>,
    },
    /// Ungrouping: the group plus its children before, the freed
    /// children after.
    Ungroup {
        before: Vec<Element>,
        after: Vec<Element>,
    },
    /// Document-level guide list replacement.
    Guides {
        before: Vec<Guide>,
        after: Vec<Guide>,
    },
}

impl CommandKind {
    /// Human-readable label for history UI.
    pub fn label(&self) -> &'static str {
        match self {
            CommandKind::Add { .. } => "add",
            CommandKind::Delete { .. } => "delete",
            CommandKind::Move { .. } => "move",
            CommandKind::Resize { .. } => "resize",
            CommandKind::Rotate { .. } => "rotate",
            CommandKind::Style { .. } => "style",
            CommandKind::Reorder { .. } => "reorder",
            CommandKind::Group { .. } => "group",
            CommandKind::Ungroup { .. } => "ungroup",
            CommandKind::Guides { .. } => "guides",
        }
    }
}

/// One atomic, invertible edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub kind: CommandKind,
    /// Milliseconds since the Unix epoch at construction time.
    pub timestamp: u64,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            timestamp: timestamp_ms(),
        }
    }

    /// Ids of the elements this command touches. Empty for
    /// document-level commands.
    pub fn element_ids(&self) -> Vec<ElementId> {
        match &self.kind {
            CommandKind::Add { elements } | CommandKind::Delete { elements } => {
                elements.iter().map(|e| e.id).collect()
            }
            CommandKind::Move { changes }
            | CommandKind::Resize { changes }
            | CommandKind::Rotate { changes } => changes.iter().map(|c| c.id).collect(),
            CommandKind::Style { changes } => changes.iter().map(|c| c.id).collect(),
            CommandKind::Reorder { changes } => changes.iter().map(|c| c.id).collect(),
            CommandKind::Group { after, .. } => after.iter().map(|e| e.id).collect(),
            CommandKind::Ungroup { before, .. } => before.iter().map(|e| e.id).collect(),
            CommandKind::Guides { .. } => Vec::new(),
        }
    }

    /// Apply the command's inverse to a document, producing the state
    /// from before the command ran. Unknown ids are skipped.
    pub fn revert(&self, document: &Document) -> Document {
        match &self.kind {
            CommandKind::Add { elements } => {
                let ids: Vec<ElementId> = elements.iter().map(|e| e.id).collect();
                document.delete_elements(&ids)
            }
            CommandKind::Delete { elements } => restore_snapshots(document, elements),
            CommandKind::Move { changes }
            | CommandKind::Resize { changes }
            | CommandKind::Rotate { changes } => {
                apply_transforms(document, changes, |c| c.before)
            }
            CommandKind::Style { changes } => {
                let patches: Vec<(ElementId, ElementPatch)> =
                    changes.iter().map(|c| (c.id, c.before.clone())).collect();
                document.update_elements(&patches)
            }
            CommandKind::Reorder { changes } => apply_z_indices(document, changes, |c| c.before),
            CommandKind::Group { before, after } => {
                // Drop the group element, then restore the members'
                // pre-group snapshots.
                let group_ids: Vec<ElementId> = after
                    .iter()
                    .filter(|e| e.is_group())
                    .map(|e| e.id)
                    .collect();
                restore_snapshots(&document.delete_elements(&group_ids), before)
            }
            CommandKind::Ungroup { before, .. } => restore_snapshots(document, before),
            CommandKind::Guides { .. } => document.clone(),
        }
    }

    /// Re-apply the command to a document (redo). Unknown ids are
    /// skipped.
    pub fn reapply(&self, document: &Document) -> Document {
        match &self.kind {
            CommandKind::Add { elements } => restore_snapshots(document, elements),
            CommandKind::Delete { elements } => {
                let ids: Vec<ElementId> = elements.iter().map(|e| e.id).collect();
                document.delete_elements(&ids)
            }
            CommandKind::Move { changes }
            | CommandKind::Resize { changes }
            | CommandKind::Rotate { changes } => apply_transforms(document, changes, |c| c.after),
            CommandKind::Style { changes } => {
                let patches: Vec<(ElementId, ElementPatch)> =
                    changes.iter().map(|c| (c.id, c.after.clone())).collect();
                document.update_elements(&patches)
            }
            CommandKind::Reorder { changes } => apply_z_indices(document, changes, |c| c.after),
            CommandKind::Group { after, .. } => restore_snapshots(document, after),
            CommandKind::Ungroup { before, after } => {
                let group_ids: Vec<ElementId> = before
                    .iter()
                    .filter(|e| e.is_group())
                    .map(|e| e.id)
                    .collect();
                restore_snapshots(&document.delete_elements(&group_ids), after)
            }
            CommandKind::Guides { .. } => document.clone(),
        }
    }
}

/// Re-insert snapshots and repair ownership in both directions: a
/// child whose restored group lists it regains its `parent_id`
/// (deletion had cleared it), and a restored child whose surviving
/// group no longer lists it rejoins that group's child list (deletion
/// had scrubbed it).
fn restore_snapshots(document: &Document, snapshots: &[Element]) -> Document {
    let mut doc = document.upsert_elements(snapshots);

    let mut repairs: Vec<(ElementId, ElementId)> = Vec::new();
    for snapshot in snapshots {
        if let Some(group) = snapshot.as_group() {
            for child_id in &group.child_ids {
                if let Some(child) = doc.element(*child_id) {
                    if child.parent_id.is_none() {
                        repairs.push((*child_id, snapshot.id));
                    }
                }
            }
        }
    }
    if !repairs.is_empty() {
        let mut repaired: Vec<Element> = Vec::new();
        for (child_id, group_id) in repairs {
            if let Some(child) = doc.element(child_id) {
                let mut child = child.clone();
                child.parent_id = Some(group_id);
                repaired.push(child);
            }
        }
        doc = doc.upsert_elements(&repaired);
    }

    let mut memberships: Vec<(ElementId, ElementId)> = Vec::new();
    for snapshot in snapshots {
        if let Some(parent) = snapshot.parent_id {
            if let Some(group) = doc.element(parent).and_then(|e| e.as_group()) {
                if !group.contains(snapshot.id) {
                    memberships.push((parent, snapshot.id));
                }
            }
        }
    }
    for (group_id, child_id) in memberships {
        if let Some(group) = doc.element(group_id) {
            let mut group = group.clone();
            if let crate::element::ElementKind::Group(payload) = &mut group.kind {
                payload.child_ids.push(child_id);
            }
            doc = doc.upsert_elements(std::slice::from_ref(&group));
        }
    }
    doc
}

fn apply_transforms(
    document: &Document,
    changes: &[TransformChange],
    pick: impl Fn(&TransformChange) -> Transform,
) -> Document {
    let patches: Vec<(ElementId, ElementPatch)> = changes
        .iter()
        .map(|c| (c.id, ElementPatch::from_transform(&pick(c))))
        .collect();
    document.update_elements(&patches)
}

fn apply_z_indices(
    document: &Document,
    changes: &[ZIndexChange],
    pick: impl Fn(&ZIndexChange) -> i32,
) -> Document {
    let patches: Vec<(ElementId, ElementPatch)> = changes
        .iter()
        .map(|c| {
            (
                c.id,
                ElementPatch {
                    z_index: Some(pick(c)),
                    ..Default::default()
                },
            )
        })
        .collect();
    document.update_elements(&patches)
}

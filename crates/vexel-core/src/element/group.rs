//! Group element payload.

use super::ElementId;
use serde::{Deserialize, Serialize};

/// Payload for group elements.
///
/// The group owns its members through this id list; the members stay
/// first-class entries in the document's flat collection with their
/// `parent_id` pointing back here. Invariant: no duplicate ids, every
/// id resolves to an existing element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupPayload {
    pub child_ids: Vec<ElementId>,
}

impl GroupPayload {
    /// Create a payload, dropping duplicate ids while keeping order.
    pub fn new(child_ids: Vec<ElementId>) -> Self {
        let mut seen = Vec::with_capacity(child_ids.len());
        for id in child_ids {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        Self { child_ids: seen }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.child_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.child_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.child_ids.is_empty()
    }
}

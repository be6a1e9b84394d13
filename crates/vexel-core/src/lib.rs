//! Vexel Core Library
//!
//! Document model, geometry and edit history for the Vexel design
//! surface. Rendering and input translation live outside this crate;
//! the core exposes pure transform functions, a persistent element
//! store, and command-based undo/redo.

pub mod align;
pub mod command;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod history;
pub mod snap;
pub mod transform;

pub use align::{align_elements, align_elements_vertical, distribute_elements, AlignTarget, HorizontalEdge, VerticalEdge};
pub use command::{Command, CommandKind, StyleChange, TransformChange, ZIndexChange};
pub use document::{Document, DocumentFile, GridSettings, ReorderDirection, FORMAT_VERSION, MAX_ZOOM, MIN_ZOOM};
pub use editor::{Clipboard, Editor};
pub use element::{Element, ElementId, ElementKind, ElementPatch, Rgba, Transform, MIN_ELEMENT_SIZE};
pub use error::{StoreError, StoreResult};
pub use history::{CommandHistory, MAX_UNDO_HISTORY};
pub use snap::{find_smart_guides, snap_to_grid, Guide, SmartGuide};
pub use transform::{
    bounding_box, element_bounds, flip_horizontal, flip_vertical, move_elements, nudge_element,
    resize_element, Axis, NudgeDirection, ResizeHandle,
};

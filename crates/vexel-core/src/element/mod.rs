//! Element definitions for the design surface.

mod group;
mod image;
mod path;
mod shape;
mod text;

pub use group::GroupPayload;
pub use image::{ImageFilters, ImagePayload};
pub use path::PathPayload;
pub use shape::{ShapeKind, ShapePayload};
pub use text::{FontFamily, FontWeight, TextAlign, TextPayload};

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Minimum element dimension in canvas units. Resize and patch
/// operations clamp width/height here to avoid degenerate boxes.
pub const MIN_ELEMENT_SIZE: f64 = 1.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

fn default_scale() -> f64 {
    1.0
}

/// An element's position, size, rotation and scale.
///
/// `width`/`height` are the visual box size; `scale_x`/`scale_y` carry
/// mirroring (negative values flip the element about its own center)
/// and are applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Left edge of the bounding box.
    pub x: f64,
    /// Top edge of the bounding box.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, clockwise around the box center.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale")]
    pub scale_y: f64,
}

impl Transform {
    /// Create an unrotated, unscaled transform.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Axis-aligned bounding box. Rotation is not expanded into the
    /// box; the box tracks the unrotated frame the handles attach to.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Return a copy translated by the given delta.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }
}

/// Type-specific payload. Exactly one variant per element kind; the
/// payload is a required field only on the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Text(TextPayload),
    Shape(ShapePayload),
    Image(ImagePayload),
    Path(PathPayload),
    Group(GroupPayload),
}

impl ElementKind {
    /// The element kind as a display string.
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Shape(_) => "shape",
            ElementKind::Image(_) => "image",
            ElementKind::Path(_) => "path",
            ElementKind::Group(_) => "group",
        }
    }
}

/// One item on the canvas.
///
/// Elements live in a single flat collection owned by the document.
/// Children of a group stay first-class entries in that collection
/// (z-order, locking and queries work uniformly); `parent_id` marks
/// them as owned so top-level iteration skips them. Ownership itself
/// is recorded on the group via [`GroupPayload::child_ids`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Immutable for the element's lifetime.
    pub id: ElementId,
    /// Mutable display label.
    pub name: String,
    pub transform: Transform,
    /// Overall opacity in [0, 1].
    pub opacity: f64,
    pub visible: bool,
    pub locked: bool,
    /// Paint-order key; higher paints later (on top). Not required to
    /// be unique — ties are broken by collection position.
    pub z_index: i32,
    /// Weak back-reference to an owning group. Never used for
    /// ownership; set only while the element is grouped.
    pub parent_id: Option<ElementId>,
    pub kind: ElementKind,
}

impl Element {
    /// Create an element with a fresh id and default flags.
    pub fn new(name: impl Into<String>, transform: Transform, kind: ElementKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transform,
            opacity: 1.0,
            visible: true,
            locked: false,
            z_index: 0,
            parent_id: None,
            kind,
        }
    }

    /// Create a text element at the given position.
    pub fn text(position: Point, content: impl Into<String>) -> Self {
        let payload = TextPayload::new(content);
        let (width, height) = payload.estimated_size();
        Self::new(
            "Text",
            Transform::new(position.x, position.y, width, height),
            ElementKind::Text(payload),
        )
    }

    /// Create a shape element filling the given box.
    pub fn shape(kind: ShapeKind, bounds: Rect) -> Self {
        Self::new(
            kind.label(),
            Transform::new(bounds.x0, bounds.y0, bounds.width(), bounds.height()),
            ElementKind::Shape(ShapePayload::new(kind)),
        )
    }

    /// Create an image element. The caller resolves natural dimensions
    /// before insertion (image decode happens outside the core).
    pub fn image(position: Point, payload: ImagePayload) -> Self {
        let (width, height) = (payload.natural_width, payload.natural_height);
        Self::new(
            "Image",
            Transform::new(position.x, position.y, width, height),
            ElementKind::Image(payload),
        )
    }

    /// Create a path element from a finished path payload. Points are
    /// relative to the element origin; the transform box is the path's
    /// extent.
    pub fn path(position: Point, payload: PathPayload) -> Self {
        let (width, height) = payload.extent();
        Self::new(
            "Path",
            Transform::new(position.x, position.y, width, height),
            ElementKind::Path(payload),
        )
    }

    /// Whether this element is a group.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group(_))
    }

    /// The group payload, if this element is a group.
    pub fn as_group(&self) -> Option<&GroupPayload> {
        match &self.kind {
            ElementKind::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Axis-aligned bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        self.transform.bounds()
    }

    /// Whether the element participates in top-level iteration.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Partial update merged into an element. All in-place mutation of
/// common fields flows through this single funnel; absent fields are
/// left untouched and out-of-range values are clamped rather than
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub opacity: Option<f64>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub z_index: Option<i32>,
    /// Full payload replacement (style/content changes).
    pub kind: Option<ElementKind>,
}

impl ElementPatch {
    /// Patch that only moves the element.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that replaces the whole transform.
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            x: Some(transform.x),
            y: Some(transform.y),
            width: Some(transform.width),
            height: Some(transform.height),
            rotation: Some(transform.rotation),
            scale_x: Some(transform.scale_x),
            scale_y: Some(transform.scale_y),
            ..Self::default()
        }
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge this patch into an element, clamping opacity to [0, 1]
    /// and dimensions to [`MIN_ELEMENT_SIZE`].
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(name) = &self.name {
            element.name = name.clone();
        }
        if let Some(x) = self.x {
            element.transform.x = x;
        }
        if let Some(y) = self.y {
            element.transform.y = y;
        }
        if let Some(width) = self.width {
            element.transform.width = width.max(MIN_ELEMENT_SIZE);
        }
        if let Some(height) = self.height {
            element.transform.height = height.max(MIN_ELEMENT_SIZE);
        }
        if let Some(rotation) = self.rotation {
            element.transform.rotation = rotation;
        }
        if let Some(scale_x) = self.scale_x {
            element.transform.scale_x = scale_x;
        }
        if let Some(scale_y) = self.scale_y {
            element.transform.scale_y = scale_y;
        }
        if let Some(opacity) = self.opacity {
            element.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(visible) = self.visible {
            element.visible = visible;
        }
        if let Some(locked) = self.locked {
            element.locked = locked;
        }
        if let Some(z_index) = self.z_index {
            element.z_index = z_index;
        }
        if let Some(kind) = &self.kind {
            element.kind = kind.clone();
        }
    }

    /// Capture the element's current values for exactly the fields
    /// `after` is about to change, so the pair forms a reversible
    /// before/after patch.
    pub fn before_for(element: &Element, after: &ElementPatch) -> Self {
        Self {
            name: after.name.as_ref().map(|_| element.name.clone()),
            x: after.x.map(|_| element.transform.x),
            y: after.y.map(|_| element.transform.y),
            width: after.width.map(|_| element.transform.width),
            height: after.height.map(|_| element.transform.height),
            rotation: after.rotation.map(|_| element.transform.rotation),
            scale_x: after.scale_x.map(|_| element.transform.scale_x),
            scale_y: after.scale_y.map(|_| element.transform.scale_y),
            opacity: after.opacity.map(|_| element.opacity),
            visible: after.visible.map(|_| element.visible),
            locked: after.locked.map(|_| element.locked),
            z_index: after.z_index.map(|_| element.z_index),
            kind: after.kind.as_ref().map(|_| element.kind.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_creation() {
        let element = Element::shape(ShapeKind::Rectangle, Rect::new(10.0, 20.0, 110.0, 70.0));
        assert!((element.transform.x - 10.0).abs() < f64::EPSILON);
        assert!((element.transform.width - 100.0).abs() < f64::EPSILON);
        assert!((element.transform.height - 50.0).abs() < f64::EPSILON);
        assert!(element.visible);
        assert!(!element.locked);
        assert_eq!(element.z_index, 0);
        assert!(element.parent_id.is_none());
    }

    #[test]
    fn test_transform_bounds() {
        let transform = Transform::new(5.0, 10.0, 40.0, 20.0);
        let bounds = transform.bounds();
        assert!((bounds.x1 - 45.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 30.0).abs() < f64::EPSILON);
        assert!((transform.center().x - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_patch_clamps_values() {
        let mut element = Element::shape(ShapeKind::Ellipse, Rect::new(0.0, 0.0, 50.0, 50.0));
        let patch = ElementPatch {
            opacity: Some(3.0),
            width: Some(-20.0),
            ..ElementPatch::default()
        };
        patch.apply_to(&mut element);
        assert!((element.opacity - 1.0).abs() < f64::EPSILON);
        assert!((element.transform.width - MIN_ELEMENT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_patch_before_for_captures_changed_fields_only() {
        let element = Element::text(Point::new(0.0, 0.0), "hello");
        let after = ElementPatch {
            x: Some(50.0),
            opacity: Some(0.5),
            ..ElementPatch::default()
        };
        let before = ElementPatch::before_for(&element, &after);
        assert_eq!(before.x, Some(element.transform.x));
        assert_eq!(before.opacity, Some(1.0));
        assert!(before.y.is_none());
        assert!(before.name.is_none());
    }

    #[test]
    fn test_patch_roundtrip() {
        let mut element = Element::text(Point::new(10.0, 10.0), "hi");
        let after = ElementPatch {
            x: Some(99.0),
            name: Some("renamed".to_string()),
            ..ElementPatch::default()
        };
        let before = ElementPatch::before_for(&element, &after);

        after.apply_to(&mut element);
        assert!((element.transform.x - 99.0).abs() < f64::EPSILON);
        assert_eq!(element.name, "renamed");

        before.apply_to(&mut element);
        assert!((element.transform.x - 10.0).abs() < f64::EPSILON);
        assert_eq!(element.name, "Text");
    }
}

//! Image element payload.

use serde::{Deserialize, Serialize};

/// Non-destructive image adjustments, applied at render time.
/// Percent-style values use 100.0 as the identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFilters {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    /// Blur radius in canvas units.
    pub blur: f64,
    /// Grayscale amount in [0, 100].
    pub grayscale: f64,
}

impl ImageFilters {
    /// Clamp each filter to its meaningful range.
    pub fn clamped(self) -> Self {
        Self {
            brightness: self.brightness.clamp(0.0, 200.0),
            contrast: self.contrast.clamp(0.0, 200.0),
            saturation: self.saturation.clamp(0.0, 200.0),
            blur: self.blur.clamp(0.0, 100.0),
            grayscale: self.grayscale.clamp(0.0, 100.0),
        }
    }

    /// True when every filter is at its identity value.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for ImageFilters {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            blur: 0.0,
            grayscale: 0.0,
        }
    }
}

/// Payload for image elements.
///
/// The core receives images fully resolved: decode happens outside the
/// boundary and natural dimensions are known before insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Source reference (URL or data URI), opaque to the core.
    pub source: String,
    pub natural_width: f64,
    pub natural_height: f64,
    #[serde(default)]
    pub filters: ImageFilters,
}

impl ImagePayload {
    /// Create a payload for a decoded image.
    pub fn new(source: impl Into<String>, natural_width: f64, natural_height: f64) -> Self {
        Self {
            source: source.into(),
            natural_width: natural_width.max(1.0),
            natural_height: natural_height.max(1.0),
            filters: ImageFilters::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_clamped() {
        let filters = ImageFilters {
            brightness: 500.0,
            contrast: -10.0,
            saturation: 100.0,
            blur: 1000.0,
            grayscale: 150.0,
        }
        .clamped();
        assert!((filters.brightness - 200.0).abs() < f64::EPSILON);
        assert!((filters.contrast - 0.0).abs() < f64::EPSILON);
        assert!((filters.blur - 100.0).abs() < f64::EPSILON);
        assert!((filters.grayscale - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_filters_are_identity() {
        assert!(ImageFilters::default().is_identity());
    }

    #[test]
    fn test_degenerate_natural_size_clamped() {
        let payload = ImagePayload::new("img.png", 0.0, -4.0);
        assert!(payload.natural_width >= 1.0);
        assert!(payload.natural_height >= 1.0);
    }
}

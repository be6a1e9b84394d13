//! Text element payload.

use super::Rgba;
use serde::{Deserialize, Serialize};

/// Font family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    /// Clean sans-serif (default).
    #[default]
    Sans,
    Serif,
    Mono,
    /// Hand-drawn display style.
    Script,
}

impl FontFamily {
    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            FontFamily::Sans => "Sans",
            FontFamily::Serif => "Serif",
            FontFamily::Mono => "Mono",
            FontFamily::Script => "Script",
        }
    }

    /// All available font families.
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Sans,
            FontFamily::Serif,
            FontFamily::Mono,
            FontFamily::Script,
        ]
    }
}

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Bold,
}

/// Horizontal text alignment within the element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Payload for text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    pub content: String,
    /// Font size in canvas units.
    pub font_size: f64,
    #[serde(default)]
    pub font_family: FontFamily,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub align: TextAlign,
    pub color: Rgba,
}

impl TextPayload {
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Create a payload with default styling.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: FontFamily::default(),
            font_weight: FontWeight::default(),
            align: TextAlign::default(),
            color: Rgba::black(),
        }
    }

    /// Rough box size for a fresh text element, before the renderer
    /// measures real glyphs. Width scales with the longest line.
    pub fn estimated_size(&self) -> (f64, f64) {
        let lines: Vec<&str> = self.content.lines().collect();
        let line_count = lines.len().max(1) as f64;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
        let width = (longest * self.font_size * 0.6).max(self.font_size);
        let height = line_count * self.font_size * 1.25;
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_size_scales_with_content() {
        let short = TextPayload::new("hi");
        let long = TextPayload::new("a much longer line of text");
        assert!(long.estimated_size().0 > short.estimated_size().0);
    }

    #[test]
    fn test_estimated_size_multiline() {
        let single = TextPayload::new("one");
        let multi = TextPayload::new("one\ntwo\nthree");
        assert!(multi.estimated_size().1 > single.estimated_size().1);
    }

    #[test]
    fn test_empty_content_keeps_minimum_box() {
        let empty = TextPayload::new("");
        let (width, height) = empty.estimated_size();
        assert!(width >= TextPayload::DEFAULT_FONT_SIZE);
        assert!(height > 0.0);
    }
}

//! Text styling and measurement.
//!
//! The engine never reads rendered pixels back except for text bounds: the
//! width of a readout decides where the trend arrow sits, and the width of
//! the marker labels decides how wide a round tank may be. [`TextMeasure`] is
//! the seam a rendering backend implements to answer those questions.

use crate::{Color, Size};
use serde::{Deserialize, Serialize};

/// Text style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family name
    pub family: String,
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Horizontal anchor relative to the text position
    pub anchor: TextAnchor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "Helvetica".to_string(),
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            anchor: TextAnchor::Start,
        }
    }
}

impl TextStyle {
    /// Create a style with the given family and size.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the weight.
    #[must_use]
    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set the anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Light (300)
    Light,
    /// Normal (400)
    #[default]
    Normal,
    /// Bold (700)
    Bold,
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Position marks the start of the text
    #[default]
    Start,
    /// Position marks the middle of the text
    Middle,
    /// Position marks the end of the text
    End,
}

/// Text bounding-box measurement service.
pub trait TextMeasure {
    /// Measure the bounding box of `text` rendered with `style`.
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        (**self).measure_text(text, style)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &mut T {
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        (**self).measure_text(text, style)
    }
}

/// Deterministic measurement: every glyph advances by a fixed fraction of
/// the font size, and the box is one font size tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Glyph advance as a fraction of the font size
    pub advance: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        let glyphs = text.chars().count() as f32;
        let weight = match style.weight {
            FontWeight::Bold => 1.1,
            FontWeight::Normal | FontWeight::Light => 1.0,
        };
        if glyphs == 0.0 {
            return Size::new(0.0, style.size);
        }
        Size::new(glyphs * style.size * self.advance * weight, style.size)
    }
}

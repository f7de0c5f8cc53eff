//! YAML manifest types for tank gauges.
//!
//! Every section and every field is optional; an empty document describes a
//! default tower gauge. Colours are kept as strings here and parsed when the
//! manifest is converted into a validated gauge configuration.

use crate::ParseError;
use serde::{Deserialize, Serialize};

/// Easing names accepted in `transition.easing`.
pub const EASING_NAMES: &[&str] = &[
    "linear",
    "quad_in",
    "quad_out",
    "quad_in_out",
    "cubic_in",
    "cubic_out",
    "cubic_in_out",
    "poly_in",
    "poly_out",
    "poly_in_out",
];

/// Arrow directions accepted in `arrow.direction`.
pub const ARROW_DIRECTIONS: &[&str] = &["up", "down", "none"];

/// Gauge manifest loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeManifest {
    /// Tank silhouette (`tower` or `round`)
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Initial fill value
    #[serde(default)]
    pub value: Option<f64>,
    /// Lower bound of the value domain
    #[serde(default)]
    pub min_value: f64,
    /// Upper bound of the value domain
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    /// Tank body
    #[serde(default)]
    pub tank: TankSection,
    /// Primary readout text
    #[serde(default)]
    pub text: TextSection,
    /// Wave clip
    #[serde(default)]
    pub wave: WaveSection,
    /// Value and colour transitions
    #[serde(default)]
    pub transition: TransitionSection,
    /// Min/max markers and threshold ticks
    #[serde(default)]
    pub markers: MarkerSection,
    /// Thresholds in display order
    #[serde(default)]
    pub thresholds: Vec<ThresholdEntry>,
    /// Support label at the bottom of the tank
    #[serde(default)]
    pub support_label: SupportLabelSection,
    /// Trend arrow
    #[serde(default)]
    pub arrow: ArrowSection,
    /// Threshold tooltips
    #[serde(default)]
    pub tooltip: TooltipSection,
    /// Lookup-table readout; present means enabled
    #[serde(default)]
    pub lookup: Option<ReadoutSection>,
    /// Change-rate readout; present means enabled
    #[serde(default)]
    pub change_rate: Option<ReadoutSection>,
}

fn default_variant() -> String {
    "tower".to_string()
}

fn default_max_value() -> f64 {
    100.0
}

impl Default for GaugeManifest {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            value: None,
            min_value: 0.0,
            max_value: default_max_value(),
            tank: TankSection::default(),
            text: TextSection::default(),
            wave: WaveSection::default(),
            transition: TransitionSection::default(),
            markers: MarkerSection::default(),
            thresholds: Vec::new(),
            support_label: SupportLabelSection::default(),
            arrow: ArrowSection::default(),
            tooltip: TooltipSection::default(),
            lookup: None,
            change_rate: None,
        }
    }
}

/// Tank body configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankSection {
    /// Perimeter width
    #[serde(default = "default_border_width")]
    pub border_width: f32,
    /// Perimeter colour
    #[serde(default = "default_border_color")]
    pub border_color: String,
    /// Water colour
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    /// Background inside the tank where there is no water
    #[serde(default = "default_back_fill_color")]
    pub back_fill_color: String,
    /// Background opacity
    #[serde(default = "default_one")]
    pub back_fill_opacity: f32,
    /// Corner radius of the fill area
    #[serde(default = "default_inner_corner_radius")]
    pub inner_corner_radius: f32,
    /// Corner radius of the border
    #[serde(default = "default_border_corner_radius")]
    pub border_corner_radius: f32,
    /// Gap between perimeter and water
    #[serde(default)]
    pub fill_padding: Option<f32>,
    /// Neck band height (round tanks)
    #[serde(default = "default_neck_height")]
    pub neck_height: f32,
    /// Neck opening width (round tanks); derived from the body when absent
    #[serde(default)]
    pub neck_width: Option<f32>,
}

fn default_border_width() -> f32 {
    2.0
}

fn default_border_color() -> String {
    "#333".to_string()
}

fn default_fill_color() -> String {
    "#3fabd4".to_string()
}

fn default_back_fill_color() -> String {
    "#fafafa".to_string()
}

fn default_one() -> f32 {
    1.0
}

fn default_inner_corner_radius() -> f32 {
    3.0
}

fn default_border_corner_radius() -> f32 {
    5.0
}

fn default_neck_height() -> f32 {
    50.0
}

impl Default for TankSection {
    fn default() -> Self {
        Self {
            border_width: default_border_width(),
            border_color: default_border_color(),
            fill_color: default_fill_color(),
            back_fill_color: default_back_fill_color(),
            back_fill_opacity: default_one(),
            inner_corner_radius: default_inner_corner_radius(),
            border_corner_radius: default_border_corner_radius(),
            fill_padding: None,
            neck_height: default_neck_height(),
            neck_width: None,
        }
    }
}

/// Primary readout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSection {
    /// Unit appended to the value
    pub unit: Option<String>,
    /// Decimal places
    pub decimal: u32,
    /// Font family
    pub font_family: String,
    /// Font weight (`light`, `normal`, `bold`)
    pub font_weight: String,
    /// Font size in pixels
    pub font_size: f32,
    /// Colour of text drawn over the empty part; defaults to the fill colour
    pub back_font_color: Option<String>,
    /// Colour of text drawn over the water; defaults to white
    pub front_font_color: Option<String>,
    /// Opacity of text drawn over the water
    pub overlay_opacity: f32,
}

impl Default for TextSection {
    fn default() -> Self {
        Self {
            unit: None,
            decimal: 1,
            font_family: "Helvetica".to_string(),
            font_weight: "bold".to_string(),
            font_size: 20.0,
            back_font_color: None,
            front_font_color: None,
            overlay_opacity: 0.8,
        }
    }
}

/// Wave clip configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSection {
    /// Wavelength in pixels
    pub wavelength: f32,
    /// Peak-to-trough amplitude in pixels
    pub amplitude: f32,
    /// Duration of one horizontal scroll cycle
    pub duration_ms: f64,
}

impl Default for WaveSection {
    fn default() -> Self {
        Self {
            wavelength: 100.0,
            amplitude: 3.0,
            duration_ms: 2000.0,
        }
    }
}

/// Value and colour transition configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSection {
    /// Duration in milliseconds
    pub duration_ms: f64,
    /// Delay in milliseconds
    pub delay_ms: f64,
    /// Easing name, one of [`EASING_NAMES`]
    pub easing: String,
    /// Exponent for the `poly_*` easings
    pub exponent: i32,
}

impl Default for TransitionSection {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            delay_ms: 0.0,
            easing: "poly_in_out".to_string(),
            exponent: 4,
        }
    }
}

/// Marker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSection {
    /// Draw marker labels
    pub enabled: bool,
    /// Threshold tick stroke width
    pub width: f32,
    /// Threshold tick length
    pub length: f32,
    /// Label font family
    pub font_family: String,
    /// Label font weight
    pub font_weight: String,
    /// Label font size
    pub font_size: f32,
    /// Horizontal label offset
    pub label_x_offset: f32,
    /// Vertical label offset
    pub label_y_offset: f32,
    /// Gap between a round tank and its marker bar
    pub bar_x_offset: f32,
    /// Top label text; defaults to the max value
    pub top_text: Option<String>,
    /// Bottom label text; defaults to the min value
    pub bottom_text: Option<String>,
}

impl Default for MarkerSection {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 2.0,
            length: 10.0,
            font_family: "Helvetica".to_string(),
            font_weight: "bold".to_string(),
            font_size: 10.0,
            label_x_offset: 0.0,
            label_y_offset: 0.0,
            bar_x_offset: 3.0,
            top_text: None,
            bottom_text: None,
        }
    }
}

/// One threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    /// Display name
    pub name: String,
    /// Domain value
    pub value: f64,
    /// Free-form kind shown in the tooltip (e.g. `High`, `Low`)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Alarm thresholds are always drawn red
    #[serde(default)]
    pub alarm: bool,
}

/// Support label configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportLabelSection {
    /// Draw the support label
    pub enabled: bool,
    /// Bottom (or only) label text
    pub text: String,
    /// Top label text; present means dual-label mode
    pub top_text: Option<String>,
    /// Font family
    pub font_family: String,
    /// Font weight
    pub font_weight: String,
    /// Font colour
    pub font_color: String,
    /// Bottom label font size
    pub font_size: f32,
    /// Bottom label vertical offset
    pub y_offset: f32,
    /// Top label font size
    pub top_font_size: f32,
    /// Top label vertical offset
    pub top_y_offset: f32,
    /// Background fill colour
    pub background_color: String,
    /// Background fill opacity
    pub background_opacity: f32,
    /// Background border width
    pub border_width: f32,
    /// Padding around the label text
    pub padding: f32,
}

impl Default for SupportLabelSection {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "NA".to_string(),
            top_text: None,
            font_family: "Helvetica".to_string(),
            font_weight: "bold".to_string(),
            font_color: "#133440".to_string(),
            font_size: 14.0,
            y_offset: -1.0,
            top_font_size: 14.0,
            top_y_offset: -1.0,
            background_color: "#fafafa".to_string(),
            background_opacity: 0.7,
            border_width: 1.0,
            padding: 0.0,
        }
    }
}

/// Trend arrow configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowSection {
    /// Show the arrow
    pub enabled: bool,
    /// Initial direction, one of [`ARROW_DIRECTIONS`]
    pub direction: String,
    /// Glyph font family
    pub font_family: String,
    /// Glyph font size
    pub font_size: f32,
    /// Horizontal gap to the readout
    pub x_offset: f32,
    /// Vertical offset
    pub y_offset: f32,
    /// Glyph for an upward trend
    pub up_glyph: String,
    /// Glyph for a downward trend
    pub down_glyph: String,
    /// Glyph for no trend
    pub none_glyph: String,
    /// Colour over the empty part; defaults to the fill colour
    pub back_color: Option<String>,
    /// Colour over the water; defaults to the front font colour
    pub front_color: Option<String>,
    /// Anchor next to the change-rate readout instead of the primary readout
    pub follow_change_rate: bool,
}

impl Default for ArrowSection {
    fn default() -> Self {
        Self {
            enabled: true,
            direction: "none".to_string(),
            font_family: "FontAwesome".to_string(),
            font_size: 12.0,
            x_offset: 3.0,
            y_offset: -1.0,
            up_glyph: "\u{f176}".to_string(),
            down_glyph: "\u{f175}".to_string(),
            none_glyph: "\u{f07e}".to_string(),
            back_color: None,
            front_color: None,
            follow_change_rate: false,
        }
    }
}

/// Threshold tooltip configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipSection {
    /// Tooltip font size
    pub font_size: f32,
}

impl Default for TooltipSection {
    fn default() -> Self {
        Self { font_size: 10.0 }
    }
}

/// Secondary numeric readout (lookup value or change rate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadoutSection {
    /// Initial value
    pub value: f64,
    /// Unit appended to the value
    pub unit: Option<String>,
    /// Decimal places
    pub decimal: u32,
    /// Font size
    pub font_size: f32,
    /// Gap below the readout above it
    pub y_offset: f32,
}

impl Default for ReadoutSection {
    fn default() -> Self {
        Self {
            value: 0.0,
            unit: None,
            decimal: 0,
            font_size: 14.0,
            y_offset: 2.0,
        }
    }
}

impl GaugeManifest {
    /// Parse manifest from YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or names an unknown easing
    /// or arrow direction.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.check_names()?;
        Ok(manifest)
    }

    /// Serialize manifest to YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Whether the manifest starts in dual support-label mode.
    #[must_use]
    pub fn has_dual_support_label(&self) -> bool {
        self.support_label.top_text.is_some()
    }

    fn check_names(&self) -> Result<(), ParseError> {
        if !EASING_NAMES.contains(&self.transition.easing.as_str()) {
            return Err(ParseError::invalid(
                "transition.easing",
                format!("unknown easing '{}'", self.transition.easing),
            ));
        }
        if !ARROW_DIRECTIONS.contains(&self.arrow.direction.as_str()) {
            return Err(ParseError::invalid(
                "arrow.direction",
                format!("expected up, down or none, got '{}'", self.arrow.direction),
            ));
        }
        Ok(())
    }
}

//! Validated gauge configuration.
//!
//! [`GaugeConfig`] is immutable once a gauge is built. Every optional field
//! has its own default, so a config can be assembled field by field with the
//! `with_*` builders or converted from a YAML [`GaugeManifest`].

use crate::error::{GaugeError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tankgauge_core::{Color, Easing, FontWeight, Timing};
use tankgauge_yaml::{GaugeManifest, ReadoutSection, ThresholdEntry};

/// Largest decimal precision a readout accepts.
pub const MAX_DECIMAL: u32 = 15;

/// Tank silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankVariant {
    /// Rounded rectangle
    #[default]
    Tower,
    /// Ellipse with a neck at the bottom
    Round,
}

impl TankVariant {
    /// Colour of marker labels, ticks and non-alarm thresholds.
    #[must_use]
    pub fn marker_color(self) -> Color {
        match self {
            Self::Tower => Color::BLACK,
            Self::Round => Color::from_rgb8(0xfa, 0xfa, 0xfa),
        }
    }
}

impl FromStr for TankVariant {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tower" => Ok(Self::Tower),
            "round" => Ok(Self::Round),
            other => Err(GaugeError::config(format!(
                "unknown tank variant '{other}', expected 'tower' or 'round'"
            ))),
        }
    }
}

/// Threshold severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Drawn in the theme colour
    #[default]
    Normal,
    /// Always drawn red
    Alarm,
}

/// A named boundary on the value axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Display name
    pub name: String,
    /// Domain value
    pub value: f64,
    /// Free-form kind shown in the tooltip
    pub kind: String,
    /// Severity
    pub severity: Severity,
}

impl Threshold {
    /// Create a normal threshold.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            kind: String::new(),
            severity: Severity::Normal,
        }
    }

    /// Set the kind.
    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Mark as an alarm.
    #[must_use]
    pub fn alarm(mut self) -> Self {
        self.severity = Severity::Alarm;
        self
    }

    /// Whether this is an alarm threshold.
    #[must_use]
    pub fn is_alarm(&self) -> bool {
        self.severity == Severity::Alarm
    }
}

impl From<&ThresholdEntry> for Threshold {
    fn from(entry: &ThresholdEntry) -> Self {
        Self {
            name: entry.name.clone(),
            value: entry.value,
            kind: entry.kind.clone(),
            severity: if entry.alarm {
                Severity::Alarm
            } else {
                Severity::Normal
            },
        }
    }
}

/// Trend arrow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    /// Rising
    Up,
    /// Falling
    Down,
    /// Steady
    #[default]
    None,
}

impl FromStr for ArrowDirection {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "none" => Ok(Self::None),
            other => Err(GaugeError::argument(format!(
                "unknown arrow direction '{other}'"
            ))),
        }
    }
}

/// Tank body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankSpec {
    /// Perimeter width
    pub border_width: f32,
    /// Perimeter colour
    pub border_color: Color,
    /// Initial water colour
    pub fill_color: Color,
    /// Background where there is no water
    pub back_fill_color: Color,
    /// Background opacity
    pub back_fill_opacity: f32,
    /// Fill area corner radius
    pub inner_corner_radius: f32,
    /// Border corner radius
    pub border_corner_radius: f32,
    /// Gap between perimeter and water
    pub fill_padding: Option<f32>,
    /// Neck band height (round)
    pub neck_height: f32,
    /// Neck opening width (round); a quarter of the body width when absent
    pub neck_width: Option<f32>,
}

impl Default for TankSpec {
    fn default() -> Self {
        Self {
            border_width: 2.0,
            border_color: Color::from_rgb8(0x33, 0x33, 0x33),
            fill_color: Color::from_rgb8(0x3f, 0xab, 0xd4),
            back_fill_color: Color::from_rgb8(0xfa, 0xfa, 0xfa),
            back_fill_opacity: 1.0,
            inner_corner_radius: 3.0,
            border_corner_radius: 5.0,
            fill_padding: None,
            neck_height: 50.0,
            neck_width: None,
        }
    }
}

/// Primary readout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    /// Unit appended to the value
    pub unit: Option<String>,
    /// Initial decimal precision
    pub decimal: u32,
    /// Font family
    pub font_family: String,
    /// Font weight
    pub font_weight: FontWeight,
    /// Font size
    pub font_size: f32,
    /// Colour over the empty part; defaults to the fill colour
    pub back_font_color: Option<Color>,
    /// Colour over the water; defaults to white
    pub front_font_color: Option<Color>,
    /// Opacity of text over the water
    pub overlay_opacity: f32,
}

impl Default for TextSpec {
    fn default() -> Self {
        Self {
            unit: None,
            decimal: 1,
            font_family: "Helvetica".to_string(),
            font_weight: FontWeight::Bold,
            font_size: 20.0,
            back_font_color: None,
            front_font_color: None,
            overlay_opacity: 0.8,
        }
    }
}

/// Wave clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    /// Wavelength
    pub wavelength: f32,
    /// Amplitude
    pub amplitude: f32,
    /// One horizontal scroll cycle
    pub duration_ms: f64,
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self {
            wavelength: 100.0,
            amplitude: 3.0,
            duration_ms: 2000.0,
        }
    }
}

/// Min/max labels and threshold ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Draw the min/max labels
    pub enabled: bool,
    /// Tick stroke width at rest
    pub width: f32,
    /// Tick length at rest
    pub length: f32,
    /// Label font family
    pub font_family: String,
    /// Label font weight
    pub font_weight: FontWeight,
    /// Label font size
    pub font_size: f32,
    /// Horizontal label offset
    pub label_x_offset: f32,
    /// Vertical label offset
    pub label_y_offset: f32,
    /// Gap between a round body and its marker bar
    pub bar_x_offset: f32,
    /// Top label; the max value when absent
    pub top_text: Option<String>,
    /// Bottom label; the min value when absent
    pub bottom_text: Option<String>,
}

impl Default for MarkerSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 2.0,
            length: 10.0,
            font_family: "Helvetica".to_string(),
            font_weight: FontWeight::Bold,
            font_size: 10.0,
            label_x_offset: 0.0,
            label_y_offset: 0.0,
            bar_x_offset: 3.0,
            top_text: None,
            bottom_text: None,
        }
    }
}

/// Support label at the bottom of the tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportLabelSpec {
    /// Draw the support label
    pub enabled: bool,
    /// Bottom (or only) label
    pub text: String,
    /// Top label; dual-label mode when present
    pub top_text: Option<String>,
    /// Font family
    pub font_family: String,
    /// Font weight
    pub font_weight: FontWeight,
    /// Font colour
    pub font_color: Color,
    /// Bottom label font size
    pub font_size: f32,
    /// Bottom label vertical offset
    pub y_offset: f32,
    /// Top label font size
    pub top_font_size: f32,
    /// Top label vertical offset
    pub top_y_offset: f32,
    /// Background fill
    pub background_color: Color,
    /// Background opacity
    pub background_opacity: f32,
    /// Background border width
    pub border_width: f32,
    /// Padding around the text
    pub padding: f32,
}

impl Default for SupportLabelSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "NA".to_string(),
            top_text: None,
            font_family: "Helvetica".to_string(),
            font_weight: FontWeight::Bold,
            font_color: Color::from_rgb8(0x13, 0x34, 0x40),
            font_size: 14.0,
            y_offset: -1.0,
            top_font_size: 14.0,
            top_y_offset: -1.0,
            background_color: Color::from_rgb8(0xfa, 0xfa, 0xfa),
            background_opacity: 0.7,
            border_width: 1.0,
            padding: 0.0,
        }
    }
}

/// Trend arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowSpec {
    /// Visible at start
    pub enabled: bool,
    /// Initial direction
    pub direction: ArrowDirection,
    /// Glyph font family
    pub font_family: String,
    /// Glyph font size
    pub font_size: f32,
    /// Horizontal gap to the readout
    pub x_offset: f32,
    /// Vertical offset
    pub y_offset: f32,
    /// Glyph for [`ArrowDirection::Up`]
    pub up_glyph: String,
    /// Glyph for [`ArrowDirection::Down`]
    pub down_glyph: String,
    /// Glyph for [`ArrowDirection::None`]
    pub none_glyph: String,
    /// Colour over the empty part; defaults to the fill colour
    pub back_color: Option<Color>,
    /// Colour over the water; defaults to the front font colour
    pub front_color: Option<Color>,
    /// Anchor next to the change-rate readout
    pub follow_change_rate: bool,
}

impl Default for ArrowSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            direction: ArrowDirection::None,
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

impl ArrowSpec {
    /// Glyph for a direction.
    #[must_use]
    pub fn glyph(&self, direction: ArrowDirection) -> &str {
        match direction {
            ArrowDirection::Up => &self.up_glyph,
            ArrowDirection::Down => &self.down_glyph,
            ArrowDirection::None => &self.none_glyph,
        }
    }
}

/// Secondary numeric readout below the primary one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadoutSpec {
    /// Initial value
    pub value: f64,
    /// Unit appended to the value
    pub unit: Option<String>,
    /// Decimal precision
    pub decimal: u32,
    /// Font size
    pub font_size: f32,
    /// Gap below the readout above
    pub y_offset: f32,
}

impl Default for ReadoutSpec {
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

impl ReadoutSpec {
    /// Create a readout with an initial value and unit.
    #[must_use]
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: Some(unit.into()),
            ..Self::default()
        }
    }

    /// Set the decimal precision.
    #[must_use]
    pub fn decimal(mut self, decimal: u32) -> Self {
        self.decimal = decimal;
        self
    }
}

impl From<&ReadoutSection> for ReadoutSpec {
    fn from(section: &ReadoutSection) -> Self {
        Self {
            value: section.value,
            unit: section.unit.clone(),
            decimal: section.decimal,
            font_size: section.font_size,
            y_offset: section.y_offset,
        }
    }
}

/// Complete gauge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeConfig {
    /// Tank silhouette
    pub variant: TankVariant,
    /// Domain minimum
    pub min: f64,
    /// Domain maximum
    pub max: f64,
    /// Initial value; the fill rests at `min` when absent
    pub value: Option<f64>,
    /// Tank body
    pub tank: TankSpec,
    /// Primary readout
    pub text: TextSpec,
    /// Wave clip
    pub wave: WaveSpec,
    /// Value, colour and readout transitions
    pub timing: Timing,
    /// Labels and ticks
    pub markers: MarkerSpec,
    /// Thresholds in display order
    pub thresholds: Vec<Threshold>,
    /// Support label
    pub support_label: SupportLabelSpec,
    /// Trend arrow
    pub arrow: ArrowSpec,
    /// Tooltip font size
    pub tooltip_font_size: f32,
    /// Lookup-table readout
    pub lookup: Option<ReadoutSpec>,
    /// Change-rate readout
    pub change_rate: Option<ReadoutSpec>,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            variant: TankVariant::Tower,
            min: 0.0,
            max: 100.0,
            value: None,
            tank: TankSpec::default(),
            text: TextSpec::default(),
            wave: WaveSpec::default(),
            timing: Timing::default(),
            markers: MarkerSpec::default(),
            thresholds: Vec::new(),
            support_label: SupportLabelSpec::default(),
            arrow: ArrowSpec::default(),
            tooltip_font_size: 10.0,
            lookup: None,
            change_rate: None,
        }
    }
}

impl GaugeConfig {
    /// Default configuration for a variant.
    #[must_use]
    pub fn new(variant: TankVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Set the value domain.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the initial value.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the border width.
    #[must_use]
    pub fn with_border_width(mut self, width: f32) -> Self {
        self.tank.border_width = width;
        self
    }

    /// Set the fill padding.
    #[must_use]
    pub fn with_fill_padding(mut self, padding: f32) -> Self {
        self.tank.fill_padding = Some(padding);
        self
    }

    /// Set the wave shape.
    #[must_use]
    pub fn with_wave(mut self, wavelength: f32, amplitude: f32) -> Self {
        self.wave.wavelength = wavelength;
        self.wave.amplitude = amplitude;
        self
    }

    /// Set the transition timing.
    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Set the readout unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.text.unit = Some(unit.into());
        self
    }

    /// Set the readout precision.
    #[must_use]
    pub fn with_decimal(mut self, decimal: u32) -> Self {
        self.text.decimal = decimal;
        self
    }

    /// Set the thresholds, in display order.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Vec<Threshold>) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Enable the lookup-table readout.
    #[must_use]
    pub fn with_lookup(mut self, readout: ReadoutSpec) -> Self {
        self.lookup = Some(readout);
        self
    }

    /// Enable the change-rate readout.
    #[must_use]
    pub fn with_change_rate(mut self, readout: ReadoutSpec) -> Self {
        self.change_rate = Some(readout);
        self
    }

    /// Show or hide the trend arrow.
    #[must_use]
    pub fn with_arrow(mut self, enabled: bool) -> Self {
        self.arrow.enabled = enabled;
        self
    }

    /// Text of the top marker label.
    #[must_use]
    pub fn top_marker_text(&self) -> String {
        self.markers
            .top_text
            .clone()
            .unwrap_or_else(|| self.max.to_string())
    }

    /// Text of the bottom marker label.
    #[must_use]
    pub fn bottom_marker_text(&self) -> String {
        self.markers
            .bottom_text
            .clone()
            .unwrap_or_else(|| self.min.to_string())
    }

    /// Check every invariant a gauge relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(GaugeError::config("min and max must be finite"));
        }
        if self.min >= self.max {
            return Err(GaugeError::config(format!(
                "min ({}) must be less than max ({})",
                self.min, self.max
            )));
        }
        if let Some(value) = self.value {
            if !value.is_finite() {
                return Err(GaugeError::config("initial value must be finite"));
            }
        }
        non_negative("tank.border_width", self.tank.border_width)?;
        non_negative("tank.neck_height", self.tank.neck_height)?;
        if let Some(padding) = self.tank.fill_padding {
            non_negative("tank.fill_padding", padding)?;
        }
        if let Some(neck) = self.tank.neck_width {
            non_negative("tank.neck_width", neck)?;
        }
        if !(self.wave.wavelength.is_finite() && self.wave.wavelength > 0.0) {
            return Err(GaugeError::config("wave.wavelength must be positive"));
        }
        non_negative("wave.amplitude", self.wave.amplitude)?;
        if !(self.wave.duration_ms.is_finite() && self.wave.duration_ms > 0.0) {
            return Err(GaugeError::config("wave.duration_ms must be positive"));
        }
        if !(self.timing.duration_ms >= 0.0 && self.timing.delay_ms >= 0.0) {
            return Err(GaugeError::config(
                "transition duration and delay must be non-negative",
            ));
        }
        check_decimal("text.decimal", self.text.decimal)?;
        for (name, readout) in [("lookup", &self.lookup), ("change_rate", &self.change_rate)] {
            if let Some(readout) = readout {
                check_decimal(name, readout.decimal)?;
            }
        }
        if let Some(t) = self.thresholds.iter().find(|t| !t.value.is_finite()) {
            return Err(GaugeError::config(format!(
                "threshold '{}' has a non-finite value",
                t.name
            )));
        }
        Ok(())
    }

    /// Convert and validate a YAML manifest.
    pub fn from_manifest(manifest: &GaugeManifest) -> Result<Self> {
        let tank = &manifest.tank;
        let text = &manifest.text;
        let markers = &manifest.markers;
        let label = &manifest.support_label;
        let arrow = &manifest.arrow;

        let config = Self {
            variant: manifest.variant.parse()?,
            min: manifest.min_value,
            max: manifest.max_value,
            value: manifest.value,
            tank: TankSpec {
                border_width: tank.border_width,
                border_color: Color::parse(&tank.border_color)?,
                fill_color: Color::parse(&tank.fill_color)?,
                back_fill_color: Color::parse(&tank.back_fill_color)?,
                back_fill_opacity: tank.back_fill_opacity,
                inner_corner_radius: tank.inner_corner_radius,
                border_corner_radius: tank.border_corner_radius,
                fill_padding: tank.fill_padding,
                neck_height: tank.neck_height,
                neck_width: tank.neck_width,
            },
            text: TextSpec {
                unit: text.unit.clone(),
                decimal: text.decimal,
                font_family: text.font_family.clone(),
                font_weight: parse_weight(&text.font_weight)?,
                font_size: text.font_size,
                back_font_color: parse_optional(text.back_font_color.as_deref())?,
                front_font_color: parse_optional(text.front_font_color.as_deref())?,
                overlay_opacity: text.overlay_opacity,
            },
            wave: WaveSpec {
                wavelength: manifest.wave.wavelength,
                amplitude: manifest.wave.amplitude,
                duration_ms: manifest.wave.duration_ms,
            },
            timing: Timing {
                duration_ms: manifest.transition.duration_ms,
                delay_ms: manifest.transition.delay_ms,
                easing: parse_easing(&manifest.transition.easing, manifest.transition.exponent)?,
            },
            markers: MarkerSpec {
                enabled: markers.enabled,
                width: markers.width,
                length: markers.length,
                font_family: markers.font_family.clone(),
                font_weight: parse_weight(&markers.font_weight)?,
                font_size: markers.font_size,
                label_x_offset: markers.label_x_offset,
                label_y_offset: markers.label_y_offset,
                bar_x_offset: markers.bar_x_offset,
                top_text: markers.top_text.clone(),
                bottom_text: markers.bottom_text.clone(),
            },
            thresholds: manifest.thresholds.iter().map(Threshold::from).collect(),
            support_label: SupportLabelSpec {
                enabled: label.enabled,
                text: label.text.clone(),
                top_text: label.top_text.clone(),
                font_family: label.font_family.clone(),
                font_weight: parse_weight(&label.font_weight)?,
                font_color: Color::parse(&label.font_color)?,
                font_size: label.font_size,
                y_offset: label.y_offset,
                top_font_size: label.top_font_size,
                top_y_offset: label.top_y_offset,
                background_color: Color::parse(&label.background_color)?,
                background_opacity: label.background_opacity,
                border_width: label.border_width,
                padding: label.padding,
            },
            arrow: ArrowSpec {
                enabled: arrow.enabled,
                direction: arrow
                    .direction
                    .parse()
                    .map_err(|e: GaugeError| GaugeError::config(e.to_string()))?,
                font_family: arrow.font_family.clone(),
                font_size: arrow.font_size,
                x_offset: arrow.x_offset,
                y_offset: arrow.y_offset,
                up_glyph: arrow.up_glyph.clone(),
                down_glyph: arrow.down_glyph.clone(),
                none_glyph: arrow.none_glyph.clone(),
                back_color: parse_optional(arrow.back_color.as_deref())?,
                front_color: parse_optional(arrow.front_color.as_deref())?,
                follow_change_rate: arrow.follow_change_rate,
            },
            tooltip_font_size: manifest.tooltip.font_size,
            lookup: manifest.lookup.as_ref().map(ReadoutSpec::from),
            change_rate: manifest.change_rate.as_ref().map(ReadoutSpec::from),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document straight into a validated config.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_manifest(&GaugeManifest::from_yaml(yaml)?)
    }
}

fn non_negative(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GaugeError::config(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

fn check_decimal(field: &str, decimal: u32) -> Result<()> {
    if decimal > MAX_DECIMAL {
        return Err(GaugeError::config(format!(
            "{field} precision {decimal} exceeds {MAX_DECIMAL}"
        )));
    }
    Ok(())
}

fn parse_optional(color: Option<&str>) -> Result<Option<Color>> {
    color.map(Color::parse).transpose().map_err(GaugeError::from)
}

fn parse_weight(weight: &str) -> Result<FontWeight> {
    match weight {
        "light" => Ok(FontWeight::Light),
        "normal" => Ok(FontWeight::Normal),
        "bold" => Ok(FontWeight::Bold),
        other => Err(GaugeError::config(format!("unknown font weight '{other}'"))),
    }
}

fn parse_easing(name: &str, exponent: i32) -> Result<Easing> {
    let easing = match name {
        "linear" => Easing::Linear,
        "quad_in" => Easing::QuadIn,
        "quad_out" => Easing::QuadOut,
        "quad_in_out" => Easing::QuadInOut,
        "cubic_in" => Easing::CubicIn,
        "cubic_out" => Easing::CubicOut,
        "cubic_in_out" => Easing::CubicInOut,
        "poly_in" => Easing::PolyIn(exponent),
        "poly_out" => Easing::PolyOut(exponent),
        "poly_in_out" => Easing::PolyInOut(exponent),
        other => return Err(GaugeError::config(format!("unknown easing '{other}'"))),
    };
    Ok(easing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_widget_defaults() {
        let config = GaugeConfig::default();
        assert_eq!(config.variant, TankVariant::Tower);
        assert_eq!(config.tank.border_color.to_hex(), "#333333");
        assert_eq!(config.tank.fill_color.to_hex(), "#3fabd4");
        assert_eq!(config.timing.easing, Easing::PolyInOut(4));
        assert_eq!(config.wave.wavelength, 100.0);
        assert_eq!(config.arrow.glyph(ArrowDirection::Up), "\u{f176}");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_variant_marker_color() {
        assert_eq!(TankVariant::Tower.marker_color(), Color::BLACK);
        assert_eq!(TankVariant::Round.marker_color().to_hex(), "#fafafa");
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("round".parse::<TankVariant>().unwrap(), TankVariant::Round);
        let err = "sphere".parse::<TankVariant>().unwrap_err();
        assert!(matches!(err, GaugeError::Configuration(_)));
    }

    #[test]
    fn test_validate_rejects_empty_domain() {
        let err = GaugeConfig::default()
            .with_range(5.0, 5.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("less than"));
        assert!(GaugeConfig::default()
            .with_range(10.0, 0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_bad_wave_and_precision() {
        assert!(GaugeConfig::default().with_wave(0.0, 3.0).validate().is_err());
        assert!(GaugeConfig::default().with_wave(100.0, -1.0).validate().is_err());
        assert!(GaugeConfig::default().with_decimal(16).validate().is_err());
        assert!(GaugeConfig::default()
            .with_lookup(ReadoutSpec::new(1.0, "gal").decimal(40))
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_threshold() {
        let config =
            GaugeConfig::default().with_thresholds(vec![Threshold::new("bad", f64::NAN)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_marker_text_defaults_to_range() {
        let config = GaugeConfig::default().with_range(0.0, 250.0);
        assert_eq!(config.top_marker_text(), "250");
        assert_eq!(config.bottom_marker_text(), "0");
    }

    #[test]
    fn test_from_manifest_converts_colors_and_easing() {
        let manifest = GaugeManifest::from_yaml(
            "variant: round\ntext:\n  front_font_color: '#003B42'\ntransition:\n  easing: cubic_out\n",
        )
        .unwrap();
        let config = GaugeConfig::from_manifest(&manifest).unwrap();
        assert_eq!(config.variant, TankVariant::Round);
        assert_eq!(
            config.text.front_font_color.map(|c| c.to_hex()).as_deref(),
            Some("#003b42")
        );
        assert_eq!(config.timing.easing, Easing::CubicOut);
    }

    #[test]
    fn test_from_manifest_unknown_variant() {
        let mut manifest = GaugeManifest::default();
        manifest.variant = "sphere".to_string();
        assert!(matches!(
            GaugeConfig::from_manifest(&manifest),
            Err(GaugeError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_manifest_bad_color() {
        let mut manifest = GaugeManifest::default();
        manifest.tank.fill_color = "#12".to_string();
        assert!(matches!(
            GaugeConfig::from_manifest(&manifest),
            Err(GaugeError::Color(_))
        ));
    }

    #[test]
    fn test_from_yaml_reports_manifest_errors() {
        assert!(matches!(
            GaugeConfig::from_yaml("tank: [1"),
            Err(GaugeError::Manifest(_))
        ));
    }

    #[test]
    fn test_threshold_builder() {
        let t = Threshold::new("Alarm High", 90.0).kind("High").alarm();
        assert!(t.is_alarm());
        assert_eq!(t.kind, "High");
    }
}

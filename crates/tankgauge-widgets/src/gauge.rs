//! The tank gauge: animation orchestrator and public operations.
//!
//! A [`TankGauge`] owns its scene. Every operation updates the runtime
//! state, starts the transitions it implies and redraws whatever changed
//! immediately; [`TankGauge::tick`] advances the transitions and redraws the
//! elements they drive.

use crate::config::{ArrowDirection, GaugeConfig, TankVariant, MAX_DECIMAL};
use crate::element::{Element, Property, Readout};
use crate::error::{GaugeError, Result};
use crate::format::ReadoutFormat;
use crate::hover::{self, MarkerEmphasis, HOVER_TIMING};
use crate::layout::{Layout, ReadoutOffsets};
use crate::scale::LinearScale;
use crate::threshold::ThresholdIndex;
use crate::wave::{self, WavePath};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fmt;
use tankgauge_core::{
    Color, Event, NodeId, Point, Scene, Size, TextMeasure, TextStyle, Timing, TransitionSet,
    TweenValue,
};

/// Support label text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportLabels {
    /// Bottom (or only) label
    pub bottom: String,
    /// Top label; present in dual-label mode
    pub top: Option<String>,
}

impl SupportLabels {
    /// Whether two labels are shown.
    #[must_use]
    pub fn is_dual(&self) -> bool {
        self.top.is_some()
    }
}

/// Runtime state of a gauge.
///
/// Only gauge operations write it. It survives resize and redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeState {
    /// Fill value; the fill rests at `min` when absent
    pub value: Option<f64>,
    /// Water colour
    pub fill_color: Color,
    /// Readout colour behind the water, when overridden
    pub back_font_color: Option<Color>,
    /// Readout colour over the water, when overridden
    pub front_font_color: Option<Color>,
    /// Arrow colour behind the water, when overridden
    pub back_arrow_color: Option<Color>,
    /// Arrow colour over the water, when overridden
    pub front_arrow_color: Option<Color>,
    /// Opacity of readouts over the water
    pub overlay_opacity: f32,
    /// Arrow shown
    pub arrow_visible: bool,
    /// Arrow glyph
    pub arrow_direction: ArrowDirection,
    /// Arrow anchored at the change-rate readout
    pub follow_change_rate: bool,
    /// Support label text
    pub support_labels: SupportLabels,
    /// Primary readout precision
    pub decimal: u32,
    /// Lookup-table value
    pub lookup_value: f64,
    /// Change-rate value
    pub change_rate_value: f64,
    /// Max marker label
    pub top_marker_text: String,
    /// Min marker label
    pub bottom_marker_text: String,
    /// Highlighted threshold
    pub hovered: Option<usize>,
}

impl GaugeState {
    fn from_config(config: &GaugeConfig) -> Self {
        Self {
            value: config.value,
            fill_color: config.tank.fill_color,
            back_font_color: config.text.back_font_color,
            front_font_color: config.text.front_font_color,
            back_arrow_color: config.arrow.back_color,
            front_arrow_color: config.arrow.front_color,
            overlay_opacity: config.text.overlay_opacity,
            arrow_visible: config.arrow.enabled,
            arrow_direction: config.arrow.direction,
            follow_change_rate: config.arrow.follow_change_rate,
            support_labels: SupportLabels {
                bottom: config.support_label.text.clone(),
                top: config.support_label.top_text.clone(),
            },
            decimal: config.text.decimal,
            lookup_value: config.lookup.as_ref().map_or(0.0, |l| l.value),
            change_rate_value: config.change_rate.as_ref().map_or(0.0, |r| r.value),
            top_marker_text: config.top_marker_text(),
            bottom_marker_text: config.bottom_marker_text(),
            hovered: None,
        }
    }

    /// Target colour of readouts behind the water.
    #[must_use]
    pub fn back_font_target(&self) -> Color {
        self.back_font_color.unwrap_or(self.fill_color)
    }

    /// Target colour of readouts over the water.
    #[must_use]
    pub fn front_font_target(&self) -> Color {
        self.front_font_color.unwrap_or(Color::WHITE)
    }

    /// Target arrow colour behind the water.
    #[must_use]
    pub fn back_arrow_target(&self) -> Color {
        self.back_arrow_color.unwrap_or(self.fill_color)
    }

    /// Target arrow colour over the water.
    #[must_use]
    pub fn front_arrow_target(&self) -> Color {
        self.front_arrow_color
            .unwrap_or_else(|| self.front_font_target())
    }
}

/// Partial colour update; absent fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FillAttributes {
    /// Water colour
    pub fill_color: Option<Color>,
    /// Opacity of readouts over the water
    pub overlay_opacity: Option<f32>,
    /// Readout colour behind the water
    pub back_font_color: Option<Color>,
    /// Readout colour over the water
    pub front_font_color: Option<Color>,
    /// Arrow colour behind the water
    pub back_arrow_color: Option<Color>,
    /// Arrow colour over the water
    pub front_arrow_color: Option<Color>,
}

/// Partial arrow update; absent fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArrowUpdate {
    /// Show or hide
    pub visible: Option<bool>,
    /// Glyph
    pub direction: Option<ArrowDirection>,
    /// Colour behind the water
    pub back_color: Option<Color>,
    /// Colour over the water
    pub front_color: Option<Color>,
    /// Anchor at the change-rate readout
    pub follow_change_rate: Option<bool>,
}

impl ArrowUpdate {
    /// Show the arrow.
    #[must_use]
    pub fn show() -> Self {
        Self {
            visible: Some(true),
            ..Self::default()
        }
    }

    /// Hide the arrow without removing it from the layout.
    #[must_use]
    pub fn hide() -> Self {
        Self {
            visible: Some(false),
            ..Self::default()
        }
    }

    /// Change the glyph.
    #[must_use]
    pub fn direction(mut self, direction: ArrowDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Everything derived from the configuration and the container size.
#[derive(Debug, Clone)]
pub(crate) struct Geometry {
    pub(crate) layout: Layout,
    pub(crate) scale: LinearScale,
    pub(crate) wave: WavePath,
    pub(crate) scroll: (f64, f64),
    pub(crate) thresholds: ThresholdIndex,
    pub(crate) marker_label_width: f32,
    pub(crate) readouts: ReadoutOffsets,
}

impl Geometry {
    fn compute<M: TextMeasure + ?Sized>(
        config: &GaugeConfig,
        container: Size,
        measure: &M,
        state: &GaugeState,
    ) -> Result<Self> {
        let marker_label_width = if config.markers.enabled {
            let style = marker_style(config);
            measure
                .measure_text(&state.top_marker_text, &style)
                .width
                .max(measure.measure_text(&state.bottom_marker_text, &style).width)
        } else {
            0.0
        };
        let layout = Layout::compute(config, container, marker_label_width)?;
        let scale = LinearScale::for_fill(
            config.min,
            config.max,
            layout.inner.height,
            config.wave.amplitude,
        )?;
        let wave = wave::wave_path(
            config.wave.wavelength,
            config.wave.amplitude,
            container,
            config.tank.border_width,
        )?;
        let thresholds =
            ThresholdIndex::build(&config.thresholds, &scale, config.variant.marker_color());
        Ok(Self {
            scroll: wave::scroll_range(container.width, config.wave.wavelength),
            readouts: ReadoutOffsets::new(
                config.text.font_size,
                config.lookup.as_ref(),
                config.change_rate.as_ref(),
            ),
            layout,
            scale,
            wave,
            thresholds,
            marker_label_width,
        })
    }
}

pub(crate) fn marker_style(config: &GaugeConfig) -> TextStyle {
    TextStyle::new(config.markers.font_family.clone(), config.markers.font_size)
        .weight(config.markers.font_weight)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Ready,
    Destroyed,
}

type ClickHandler = Box<dyn FnMut(Point)>;

/// An animated tank gauge rendering into a [`Scene`].
pub struct TankGauge<S: Scene> {
    pub(crate) config: GaugeConfig,
    pub(crate) scene: S,
    pub(crate) geometry: Geometry,
    pub(crate) state: GaugeState,
    pub(crate) anim: TransitionSet<Property, TweenValue>,
    clock: f64,
    lifecycle: Lifecycle,
    click: Option<ClickHandler>,
}

impl<S: Scene + fmt::Debug> fmt::Debug for TankGauge<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TankGauge")
            .field("config", &self.config)
            .field("scene", &self.scene)
            .field("state", &self.state)
            .field("layout", &self.geometry.layout)
            .field("clock", &self.clock)
            .field("lifecycle", &self.lifecycle)
            .field("has_click_handler", &self.click.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: Scene> TankGauge<S> {
    /// Build a gauge with its clock at 0.
    ///
    /// On error nothing has been written to `scene`.
    pub fn new(config: GaugeConfig, container: Size, scene: S) -> Result<Self> {
        Self::new_at(config, container, scene, 0.0)
    }

    /// Build a gauge whose initial transitions start at `now_ms`.
    pub fn new_at(config: GaugeConfig, container: Size, scene: S, now_ms: f64) -> Result<Self> {
        config.validate()?;
        let state = GaugeState::from_config(&config);
        let geometry = Geometry::compute(&config, container, &scene, &state)?;
        let mut gauge = Self {
            config,
            scene,
            geometry,
            state,
            anim: TransitionSet::new(),
            clock: now_ms,
            lifecycle: Lifecycle::Ready,
            click: None,
        };
        gauge.rebuild();
        debug!(
            "{:?} gauge ready: container {}x{}, inner {}x{}",
            gauge.config.variant,
            container.width,
            container.height,
            gauge.geometry.layout.inner.width,
            gauge.geometry.layout.inner.height
        );
        Ok(gauge)
    }

    /// Parse a YAML manifest and build a gauge from it.
    pub fn from_yaml(yaml: &str, container: Size, scene: S) -> Result<Self> {
        Self::new(GaugeConfig::from_yaml(yaml)?, container, scene)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Runtime state.
    #[must_use]
    pub fn state(&self) -> &GaugeState {
        &self.state
    }

    /// Current layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.geometry.layout
    }

    /// Current value scale.
    #[must_use]
    pub fn scale(&self) -> &LinearScale {
        &self.geometry.scale
    }

    /// Current threshold index.
    #[must_use]
    pub fn thresholds(&self) -> &ThresholdIndex {
        &self.geometry.thresholds
    }

    /// Container size.
    #[must_use]
    pub fn container(&self) -> Size {
        self.geometry.layout.container
    }

    /// Time of the last tick.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.clock
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// The scene, mutably.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Give the scene back.
    pub fn into_scene(self) -> S {
        self.scene
    }

    /// Scene node of `element`.
    #[must_use]
    pub fn node_id(&self, element: Element) -> NodeId {
        element.node_id()
    }

    /// Last rendered value of an animated property.
    #[must_use]
    pub fn animated(&self, property: Property) -> Option<TweenValue> {
        self.anim.value(&property).copied()
    }

    /// Whether `property` has a running transition.
    #[must_use]
    pub fn is_animating(&self, property: Property) -> bool {
        self.anim.is_animating(&property)
    }

    /// Whether everything but the wave scroll has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.anim.active_keys().all(|k| *k == Property::WaveScroll)
    }

    /// Whether [`Self::destroy`] was called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Ready => Ok(()),
            Lifecycle::Destroyed => Err(GaugeError::Destroyed),
        }
    }

    // =========================================================================
    // Frame clock
    // =========================================================================

    /// Advance every transition to `now_ms` and redraw what they drive.
    pub fn tick(&mut self, now_ms: f64) -> Result<()> {
        self.ensure_ready()?;
        self.clock = now_ms;
        let frames = self.anim.tick(now_ms);
        let dirty: BTreeSet<Element> = frames
            .iter()
            .flat_map(|frame| self.driven_by(frame.key))
            .collect();
        for element in dirty {
            self.render(element);
        }
        Ok(())
    }

    /// Elements redrawn when `property` changes.
    fn driven_by(&self, property: Property) -> Vec<Element> {
        match property {
            Property::WaveScroll | Property::FillLevel => vec![Element::WaveClip],
            Property::FillColor => vec![Element::WaterFill],
            Property::LabelStroke => vec![Element::SupportLabelBackground],
            Property::NeckColor => vec![Element::NeckFill],
            Property::BackFont => Readout::ALL.iter().map(|r| r.behind()).collect(),
            Property::FrontFont => Readout::ALL.iter().map(|r| r.overlay()).collect(),
            Property::BackArrow => vec![Element::BehindArrow],
            Property::FrontArrow => vec![Element::OverlayArrow],
            Property::Readout(readout) => {
                let mut elements = vec![readout.behind(), readout.overlay()];
                if self.arrow_tracks(readout) {
                    elements.extend([Element::BehindArrow, Element::OverlayArrow]);
                }
                elements
            }
            Property::MarkerWidth(i) | Property::MarkerX1(i) => vec![Element::ThresholdMarker(i)],
        }
    }

    /// Whether the arrow is anchored next to `readout`.
    pub(crate) fn arrow_tracks(&self, readout: Readout) -> bool {
        match readout {
            Readout::Primary => !self.arrow_follows_rate(),
            Readout::ChangeRate => self.arrow_follows_rate(),
            Readout::Lookup => false,
        }
    }

    pub(crate) fn arrow_follows_rate(&self) -> bool {
        self.state.follow_change_rate && self.config.change_rate.is_some()
    }

    // =========================================================================
    // Build and rebuild
    // =========================================================================

    /// Reset all transitions, animate from zero and redraw everything.
    fn rebuild(&mut self) {
        self.anim.reset();
        let now = self.clock;

        let colors = [
            (Property::FillColor, self.state.fill_color),
            (Property::LabelStroke, self.state.fill_color),
            (Property::NeckColor, self.state.fill_color),
            (Property::BackFont, self.state.back_font_target()),
            (Property::FrontFont, self.state.front_font_target()),
            (Property::BackArrow, self.state.back_arrow_target()),
            (Property::FrontArrow, self.state.front_arrow_target()),
        ];
        for (property, color) in colors {
            self.anim.set(property, TweenValue::Color(color));
        }
        for readout in Readout::ALL {
            self.anim
                .set(Property::Readout(readout), TweenValue::TextNumber(0.0));
        }
        let rest = MarkerEmphasis::rest(&self.config.markers);
        for i in 0..self.geometry.thresholds.len() {
            self.anim
                .set(Property::MarkerWidth(i), TweenValue::Number(f64::from(rest.width)));
            self.anim
                .set(Property::MarkerX1(i), TweenValue::Number(f64::from(rest.x1)));
        }
        self.state.hovered = None;

        let (scroll_from, scroll_to) = self.geometry.scroll;
        self.anim.start_looping(
            Property::WaveScroll,
            TweenValue::Number(scroll_from),
            TweenValue::Number(scroll_to),
            now,
            Timing::new(self.config.wave.duration_ms),
        );
        let empty = self.geometry.scale.map(self.config.min) + f64::from(self.config.wave.amplitude);
        self.anim.set(Property::FillLevel, TweenValue::Number(empty));
        self.anim.start(
            Property::FillLevel,
            TweenValue::Number(self.level_target()),
            now,
            self.config.timing,
        );
        self.tween_elements();

        self.scene.clear();
        for element in self.all_elements() {
            self.render(element);
        }
    }

    fn all_elements(&self) -> Vec<Element> {
        let mut elements = Element::FIXED.to_vec();
        for i in 0..self.geometry.thresholds.len() {
            elements.push(Element::ThresholdMarker(i));
            elements.push(Element::ThresholdTooltip(i));
        }
        elements
    }

    fn level_target(&self) -> f64 {
        self.geometry
            .scale
            .map(self.state.value.unwrap_or(self.config.min))
    }

    /// Start the colour and readout transitions toward the current state.
    fn tween_elements(&mut self) {
        let now = self.clock;
        let timing = self.config.timing;
        let fill = TweenValue::Color(self.state.fill_color);
        self.anim.start(Property::FillColor, fill, now, timing);
        self.anim.start(Property::LabelStroke, fill, now, timing);
        if self.config.variant == TankVariant::Round {
            self.anim.start(Property::NeckColor, fill, now, timing);
        }
        self.anim.start(
            Property::BackFont,
            TweenValue::Color(self.state.back_font_target()),
            now,
            timing,
        );
        self.anim.start(
            Property::FrontFont,
            TweenValue::Color(self.state.front_font_target()),
            now,
            timing,
        );
        if self.state.arrow_visible {
            self.anim.start(
                Property::BackArrow,
                TweenValue::Color(self.state.back_arrow_target()),
                now,
                timing,
            );
            self.anim.start(
                Property::FrontArrow,
                TweenValue::Color(self.state.front_arrow_target()),
                now,
                timing,
            );
        }
        for readout in Readout::ALL {
            if self.readout_enabled(readout) {
                let shown = self.shown_number(readout, &self.readout_format(readout));
                self.tween_readout(readout, shown);
            }
        }
    }

    /// Animate a readout from the number it shows toward its target.
    fn tween_readout(&mut self, readout: Readout, from: f64) {
        let to = self.readout_target(readout);
        self.anim.start_from(
            Property::Readout(readout),
            TweenValue::TextNumber(from),
            TweenValue::TextNumber(to),
            self.clock,
            self.config.timing,
        );
    }

    /// Number currently displayed by `readout` when formatted with `format`.
    fn shown_number(&self, readout: Readout, format: &ReadoutFormat) -> f64 {
        let current = self
            .anim
            .value(&Property::Readout(readout))
            .and_then(TweenValue::as_number)
            .unwrap_or(0.0);
        format.parse_displayed(&format.format(current))
    }

    pub(crate) fn readout_enabled(&self, readout: Readout) -> bool {
        match readout {
            Readout::Primary => true,
            Readout::Lookup => self.config.lookup.is_some(),
            Readout::ChangeRate => self.config.change_rate.is_some(),
        }
    }

    fn readout_target(&self, readout: Readout) -> f64 {
        match readout {
            Readout::Primary => self.state.value.unwrap_or(self.config.min),
            Readout::Lookup => self.state.lookup_value,
            Readout::ChangeRate => self.state.change_rate_value,
        }
    }

    pub(crate) fn readout_format(&self, readout: Readout) -> ReadoutFormat {
        match readout {
            Readout::Primary => ReadoutFormat::new(self.state.decimal, self.config.text.unit.clone()),
            Readout::Lookup => self
                .config
                .lookup
                .as_ref()
                .map(|l| ReadoutFormat::new(l.decimal, l.unit.clone()))
                .unwrap_or_default(),
            Readout::ChangeRate => self
                .config
                .change_rate
                .as_ref()
                .map(|r| ReadoutFormat::new(r.decimal, r.unit.clone()))
                .unwrap_or_default(),
        }
    }

    fn render_all(&mut self, elements: &[Element]) {
        for element in elements {
            self.render(*element);
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Animate the fill level and primary readout to `value`.
    pub fn update_value(&mut self, value: f64) -> Result<()> {
        self.ensure_ready()?;
        if !value.is_finite() {
            return Err(GaugeError::argument(format!(
                "value must be finite, got {value}"
            )));
        }
        self.state.value = Some(value);
        self.anim.start(
            Property::FillLevel,
            TweenValue::Number(self.level_target()),
            self.clock,
            self.config.timing,
        );
        self.tween_elements();
        Ok(())
    }

    /// Animate the water, readouts behind the water and back arrow to `color`.
    pub fn update_color(&mut self, color: Color) -> Result<()> {
        self.ensure_ready()?;
        self.state.fill_color = color;
        self.state.back_font_color = Some(color);
        self.state.back_arrow_color = Some(color);
        self.tween_elements();
        Ok(())
    }

    /// Apply a partial colour update and animate toward it.
    pub fn update_fill_attributes(&mut self, attributes: FillAttributes) -> Result<()> {
        self.ensure_ready()?;
        if let Some(color) = attributes.fill_color {
            self.state.fill_color = color;
        }
        if let Some(opacity) = attributes.overlay_opacity {
            self.state.overlay_opacity = opacity.clamp(0.0, 1.0);
            self.render_all(&Readout::ALL.map(Readout::overlay));
        }
        if let Some(color) = attributes.back_font_color {
            self.state.back_font_color = Some(color);
        }
        if let Some(color) = attributes.front_font_color {
            self.state.front_font_color = Some(color);
        }
        if let Some(color) = attributes.back_arrow_color {
            self.state.back_arrow_color = Some(color);
        }
        if let Some(color) = attributes.front_arrow_color {
            self.state.front_arrow_color = Some(color);
        }
        self.tween_elements();
        Ok(())
    }

    /// Show, hide, restyle or re-anchor the trend arrow.
    pub fn update_arrow(&mut self, update: ArrowUpdate) -> Result<()> {
        self.ensure_ready()?;
        if let Some(visible) = update.visible {
            self.state.arrow_visible = visible;
        }
        if let Some(direction) = update.direction {
            self.state.arrow_direction = direction;
        }
        if let Some(color) = update.back_color {
            self.state.back_arrow_color = Some(color);
        }
        if let Some(color) = update.front_color {
            self.state.front_arrow_color = Some(color);
        }
        if let Some(follow) = update.follow_change_rate {
            self.state.follow_change_rate = follow;
        }
        self.tween_elements();
        self.render_all(&[Element::BehindArrow, Element::OverlayArrow]);
        Ok(())
    }

    /// Change the primary readout precision.
    ///
    /// The readout restarts from the number it was showing.
    pub fn set_decimal_precision(&mut self, decimal: u32) -> Result<()> {
        self.ensure_ready()?;
        if decimal > MAX_DECIMAL {
            return Err(GaugeError::argument(format!(
                "precision {decimal} exceeds {MAX_DECIMAL}"
            )));
        }
        let shown = self.shown_number(Readout::Primary, &self.readout_format(Readout::Primary));
        self.state.decimal = decimal;
        self.tween_readout(Readout::Primary, shown);
        self.render_all(&[
            Element::BehindText,
            Element::OverlayText,
            Element::BehindArrow,
            Element::OverlayArrow,
        ]);
        Ok(())
    }

    /// Set one label (single mode) or top and bottom labels (dual mode).
    pub fn set_support_label(&mut self, labels: &[&str]) -> Result<()> {
        self.ensure_ready()?;
        let labels = match *labels {
            [bottom] => SupportLabels {
                bottom: bottom.to_string(),
                top: None,
            },
            [top, bottom] => SupportLabels {
                bottom: bottom.to_string(),
                top: Some(top.to_string()),
            },
            _ => {
                return Err(GaugeError::argument(format!(
                    "expected 1 or 2 support labels, got {}",
                    labels.len()
                )))
            }
        };
        if !self.config.support_label.enabled {
            warn!("support labels are not enabled; ignoring update");
            return Ok(());
        }
        self.state.support_labels = labels;
        self.render_all(&[
            Element::SupportLabelBackground,
            Element::SupportLabel,
            Element::TopSupportLabel,
        ]);
        Ok(())
    }

    /// Replace the min/max marker labels.
    pub fn set_marker_text(&mut self, top: &str, bottom: &str) -> Result<()> {
        self.ensure_ready()?;
        if !self.config.markers.enabled {
            warn!("markers are not enabled; ignoring marker text");
            return Ok(());
        }
        self.state.top_marker_text = top.to_string();
        self.state.bottom_marker_text = bottom.to_string();
        self.render_all(&[Element::TopMarkerLabel, Element::BottomMarkerLabel]);
        Ok(())
    }

    /// Animate the lookup-table readout to `value`.
    pub fn update_lookup_value(&mut self, value: f64) -> Result<()> {
        self.update_secondary(Readout::Lookup, value)
    }

    /// Animate the change-rate readout to `value`.
    pub fn update_change_rate_value(&mut self, value: f64) -> Result<()> {
        self.update_secondary(Readout::ChangeRate, value)
    }

    fn update_secondary(&mut self, readout: Readout, value: f64) -> Result<()> {
        self.ensure_ready()?;
        if !value.is_finite() {
            return Err(GaugeError::argument(format!(
                "{readout:?} value must be finite, got {value}"
            )));
        }
        match readout {
            Readout::Lookup => self.state.lookup_value = value,
            Readout::ChangeRate => self.state.change_rate_value = value,
            Readout::Primary => return self.update_value(value),
        }
        if self.readout_enabled(readout) {
            let shown = self.shown_number(readout, &self.readout_format(readout));
            self.tween_readout(readout, shown);
        } else {
            warn!("{readout:?} readout is not enabled; value stored only");
        }
        Ok(())
    }

    /// Rebuild for a new container size.
    ///
    /// Runtime state is kept; transitions restart from zero. On error the
    /// gauge is unchanged.
    pub fn resize(&mut self, container: Size) -> Result<()> {
        self.ensure_ready()?;
        let geometry = Geometry::compute(&self.config, container, &self.scene, &self.state)?;
        self.geometry = geometry;
        self.rebuild();
        debug!(
            "gauge resized to {}x{}, inner {}x{}",
            container.width,
            container.height,
            self.geometry.layout.inner.width,
            self.geometry.layout.inner.height
        );
        Ok(())
    }

    /// Rebuild at the current size.
    pub fn redraw(&mut self) -> Result<()> {
        self.resize(self.container())
    }

    /// Stop all transitions and clear the scene. Every later call fails.
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.anim.cancel_all();
        self.scene.clear();
        self.click = None;
        self.lifecycle = Lifecycle::Destroyed;
        debug!("gauge destroyed");
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Register the click handler, replacing any previous one.
    pub fn on_click<F>(&mut self, handler: F) -> Result<()>
    where
        F: FnMut(Point) + 'static,
    {
        self.ensure_ready()?;
        self.click = Some(Box::new(handler));
        Ok(())
    }

    /// Deliver a click.
    pub fn handle_click(&mut self, position: Point) -> Result<()> {
        self.ensure_ready()?;
        if let Some(handler) = self.click.as_mut() {
            handler(position);
        }
        Ok(())
    }

    /// Highlight the threshold band under the pointer.
    ///
    /// Returns the highlighted threshold, or `None` when there are none.
    pub fn handle_pointer_move(&mut self, position: Point) -> Result<Option<usize>> {
        self.ensure_ready()?;
        let y = f64::from(self.geometry.layout.to_marker_space(position.y));
        let index = &self.geometry.thresholds;
        let selected = hover::resolve(index.boundaries(), index.len(), y);
        if selected.is_some() {
            self.apply_emphasis(selected);
        }
        Ok(selected)
    }

    /// Reset every marker and hide every tooltip.
    pub fn handle_pointer_leave(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.apply_emphasis(None);
        Ok(())
    }

    fn apply_emphasis(&mut self, selected: Option<usize>) {
        let count = self.geometry.thresholds.len();
        let plan = hover::emphasis_plan(count, selected, &self.config.markers);
        for (i, (emphasis, _)) in plan.into_iter().enumerate() {
            self.anim.start(
                Property::MarkerWidth(i),
                TweenValue::Number(f64::from(emphasis.width)),
                self.clock,
                HOVER_TIMING,
            );
            self.anim.start(
                Property::MarkerX1(i),
                TweenValue::Number(f64::from(emphasis.x1)),
                self.clock,
                HOVER_TIMING,
            );
        }
        let previous = std::mem::replace(&mut self.state.hovered, selected);
        if previous != selected {
            for i in previous.into_iter().chain(selected) {
                self.render(Element::ThresholdTooltip(i));
            }
        }
    }

    /// Dispatch a host event.
    pub fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::PointerMove { position } => self.handle_pointer_move(*position).map(|_| ()),
            Event::PointerLeave => self.handle_pointer_leave(),
            Event::Click { position } => self.handle_click(*position),
            Event::Resize { width, height } => self.resize(Size::new(*width, *height)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ReadoutSpec, Threshold};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tankgauge_core::{DrawCommand, RecordingScene};

    fn tower() -> TankGauge<RecordingScene> {
        let config = GaugeConfig::default().with_unit("ft").with_value(55.0);
        TankGauge::new(config, Size::new(100.0, 300.0), RecordingScene::new()).unwrap()
    }

    fn text_of(gauge: &TankGauge<RecordingScene>, element: Element) -> Option<String> {
        gauge
            .scene()
            .node(element.node_id())
            .and_then(DrawCommand::text_content)
            .map(str::to_string)
    }

    fn number(gauge: &TankGauge<RecordingScene>, property: Property) -> f64 {
        gauge.animated(property).and_then(|v| v.as_number()).unwrap()
    }

    #[test]
    fn test_new_draws_and_animates_from_zero() {
        let gauge = tower();
        assert!(!gauge.scene().is_empty());
        assert_eq!(text_of(&gauge, Element::BehindText).as_deref(), Some("0.0 ft"));
        let empty = gauge.scale().map(0.0) + 3.0;
        assert_eq!(number(&gauge, Property::FillLevel), empty);
        assert!(gauge.is_animating(Property::FillLevel));
        assert!(gauge.is_animating(Property::WaveScroll));
        assert!(!gauge.is_settled());
    }

    #[test]
    fn test_tick_commits_exact_targets() {
        let mut gauge = tower();
        gauge.tick(500.0).unwrap();
        assert!(!gauge.is_settled());
        gauge.tick(1000.0).unwrap();
        assert!(gauge.is_settled());
        assert_eq!(number(&gauge, Property::FillLevel), gauge.scale().map(55.0));
        assert_eq!(text_of(&gauge, Element::OverlayText).as_deref(), Some("55.0 ft"));
    }

    #[test]
    fn test_update_value_supersedes_from_live_level() {
        let mut gauge = tower();
        gauge.tick(1000.0).unwrap();
        gauge.update_value(10.0).unwrap();
        gauge.tick(1200.0).unwrap();
        let mid = number(&gauge, Property::FillLevel);
        gauge.update_value(90.0).unwrap();
        assert_eq!(number(&gauge, Property::FillLevel), mid);
        gauge.tick(2200.0).unwrap();
        assert_eq!(number(&gauge, Property::FillLevel), gauge.scale().map(90.0));
    }

    #[test]
    fn test_update_value_rejects_non_finite() {
        let mut gauge = tower();
        assert!(matches!(
            gauge.update_value(f64::NAN),
            Err(GaugeError::InvalidArgument(_))
        ));
        assert_eq!(gauge.state().value, Some(55.0));
    }

    #[test]
    fn test_update_color_targets() {
        let mut gauge = tower();
        gauge.update_color(Color::RED).unwrap();
        assert_eq!(gauge.state().back_font_target(), Color::RED);
        assert_eq!(gauge.state().front_font_target(), Color::WHITE);
        gauge.tick(1000.0).unwrap();
        assert_eq!(
            gauge.animated(Property::FillColor),
            Some(TweenValue::Color(Color::RED))
        );
        assert_eq!(
            gauge.animated(Property::LabelStroke),
            Some(TweenValue::Color(Color::RED))
        );
    }

    #[test]
    fn test_fill_attributes_are_partial() {
        let mut gauge = tower();
        gauge
            .update_fill_attributes(FillAttributes {
                front_font_color: Some(Color::BLACK),
                overlay_opacity: Some(0.5),
                ..FillAttributes::default()
            })
            .unwrap();
        let state = gauge.state();
        assert_eq!(state.front_font_target(), Color::BLACK);
        assert_eq!(state.front_arrow_target(), Color::BLACK);
        assert_eq!(state.fill_color, GaugeConfig::default().tank.fill_color);
        let overlay = gauge.scene().node(Element::OverlayText.node_id()).unwrap();
        assert_eq!(overlay.opacity(), 0.5);
    }

    #[test]
    fn test_decimal_precision() {
        let mut gauge = tower();
        gauge.tick(1000.0).unwrap();
        gauge.set_decimal_precision(2).unwrap();
        assert_eq!(text_of(&gauge, Element::BehindText).as_deref(), Some("55.00 ft"));
        assert!(gauge.set_decimal_precision(16).is_err());
        assert_eq!(gauge.state().decimal, 2);
    }

    #[test]
    fn test_support_label_arity() {
        let mut gauge = tower();
        assert!(gauge.set_support_label(&[]).is_err());
        assert!(gauge.set_support_label(&["a", "b", "c"]).is_err());
        gauge.set_support_label(&["Tank 1", "North"]).unwrap();
        assert!(gauge.state().support_labels.is_dual());
        assert_eq!(gauge.state().support_labels.bottom, "North");
    }

    #[test]
    fn test_marker_text_ignored_when_disabled() {
        let mut config = GaugeConfig::default();
        config.markers.enabled = false;
        let mut gauge = TankGauge::new(config, Size::new(100.0, 300.0), RecordingScene::new()).unwrap();
        gauge.set_marker_text("full", "empty").unwrap();
        assert_eq!(gauge.state().top_marker_text, "100");
        assert!(gauge.scene().node(Element::TopMarkerLabel.node_id()).is_none());
    }

    #[test]
    fn test_disabled_readout_stores_value() {
        let mut gauge = tower();
        gauge.update_lookup_value(12.0).unwrap();
        assert_eq!(gauge.state().lookup_value, 12.0);
        assert!(!gauge.is_animating(Property::Readout(Readout::Lookup)));
    }

    #[test]
    fn test_lookup_readout_animates() {
        let config = GaugeConfig::default()
            .with_lookup(ReadoutSpec::new(1700.0, "gal").decimal(1));
        let mut gauge =
            TankGauge::new(config, Size::new(100.0, 300.0), RecordingScene::new()).unwrap();
        gauge.tick(1000.0).unwrap();
        assert_eq!(
            text_of(&gauge, Element::LookupBehindText).as_deref(),
            Some("1700.0 gal")
        );
        gauge.update_lookup_value(1650.0).unwrap();
        gauge.tick(2000.0).unwrap();
        assert_eq!(
            text_of(&gauge, Element::LookupOverlayText).as_deref(),
            Some("1650.0 gal")
        );
    }

    #[test]
    fn test_hover_and_leave() {
        let config = GaugeConfig::default().with_thresholds(vec![
            Threshold::new("High", 80.0),
            Threshold::new("Low", 20.0),
        ]);
        let mut gauge =
            TankGauge::new(config, Size::new(100.0, 300.0), RecordingScene::new()).unwrap();
        let near_bottom = Point::new(50.0, 280.0);
        assert_eq!(gauge.handle_pointer_move(near_bottom).unwrap(), Some(1));
        assert_eq!(gauge.state().hovered, Some(1));
        gauge.tick(200.0).unwrap();
        assert_eq!(number(&gauge, Property::MarkerWidth(1)), 5.0);
        assert_eq!(number(&gauge, Property::MarkerX1(1)), -13.0);
        assert_eq!(number(&gauge, Property::MarkerWidth(0)), 2.0);
        let tooltip = gauge.scene().node(Element::ThresholdTooltip(1).node_id()).unwrap();
        assert_eq!(tooltip.opacity(), 1.0);

        gauge.handle_pointer_leave().unwrap();
        gauge.tick(400.0).unwrap();
        assert_eq!(number(&gauge, Property::MarkerWidth(1)), 2.0);
        assert_eq!(gauge.state().hovered, None);
        let tooltip = gauge.scene().node(Element::ThresholdTooltip(1).node_id()).unwrap();
        assert_eq!(tooltip.opacity(), 0.0);
    }

    #[test]
    fn test_hover_without_thresholds() {
        let mut gauge = tower();
        assert_eq!(gauge.handle_pointer_move(Point::new(10.0, 10.0)).unwrap(), None);
    }

    #[test]
    fn test_click_handler() {
        let mut gauge = tower();
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicks);
        gauge.on_click(move |p| sink.borrow_mut().push(p)).unwrap();
        gauge
            .handle_event(&Event::Click {
                position: Point::new(4.0, 5.0),
            })
            .unwrap();
        assert_eq!(clicks.borrow().as_slice(), &[Point::new(4.0, 5.0)]);
    }

    #[test]
    fn test_resize_keeps_state_and_restarts() {
        let mut gauge = tower();
        gauge.tick(1000.0).unwrap();
        gauge.update_color(Color::RED).unwrap();
        gauge.resize(Size::new(200.0, 400.0)).unwrap();
        assert_eq!(gauge.container(), Size::new(200.0, 400.0));
        assert_eq!(gauge.state().fill_color, Color::RED);
        assert_eq!(
            gauge.animated(Property::FillColor),
            Some(TweenValue::Color(Color::RED))
        );
        assert!(gauge.is_animating(Property::FillLevel));
        assert_eq!(text_of(&gauge, Element::BehindText).as_deref(), Some("0.0 ft"));
    }

    #[test]
    fn test_failed_resize_leaves_gauge_intact() {
        let mut gauge = tower();
        let before = gauge.layout().clone();
        let writes = gauge.scene().write_count();
        assert!(gauge.resize(Size::new(1.0, 1.0)).is_err());
        assert_eq!(gauge.layout(), &before);
        assert_eq!(gauge.scene().write_count(), writes);
    }

    #[test]
    fn test_destroy() {
        let mut gauge = tower();
        gauge.destroy().unwrap();
        assert!(gauge.is_destroyed());
        assert!(gauge.scene().is_empty());
        assert!(matches!(gauge.tick(10.0), Err(GaugeError::Destroyed)));
        assert!(matches!(gauge.update_value(1.0), Err(GaugeError::Destroyed)));
        assert!(matches!(gauge.redraw(), Err(GaugeError::Destroyed)));
        assert!(matches!(gauge.destroy(), Err(GaugeError::Destroyed)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GaugeConfig::default().with_range(10.0, 10.0);
        let result = TankGauge::new(config, Size::new(100.0, 300.0), RecordingScene::new());
        assert!(matches!(result, Err(GaugeError::Configuration(_))));
    }
}

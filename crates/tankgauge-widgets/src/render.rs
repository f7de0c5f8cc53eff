//! Draw commands for each gauge element.
//!
//! Rendering is a pure function of the configuration, the geometry, the
//! runtime state and the last sampled transition values. Elements that the
//! configuration disables produce no command.

use crate::config::TankVariant;
use crate::element::{Element, Property, Readout};
use crate::gauge::{marker_style, TankGauge};
use crate::layout::{arrow_anchor, arrow_anchor_following, SupportLabelBox};
use crate::wave;
use tankgauge_core::{
    BoxStyle, Color, DrawCommand, Point, Rect, Scene, Size, StrokeStyle, TextAnchor, TextStyle,
    Transform2D, TweenValue,
};

const TOOLTIP_FONT: &str = "Roboto";
const TOOLTIP_PADDING: f32 = 8.0;
const TOOLTIP_LIFT: f32 = 30.0;
const EDGE_TICK_OVERHANG: f32 = 4.0;

fn tooltip_background() -> Color {
    Color::from_rgb8(97, 97, 97).with_alpha(0.9)
}

impl<S: Scene> TankGauge<S> {
    /// Write the current command for `element` to the scene.
    pub(crate) fn render(&mut self, element: Element) {
        if let Some(command) = self.command(element) {
            self.scene.set_node(element.node_id(), command);
        }
    }

    fn color_of(&self, property: Property) -> Color {
        self.anim
            .value(&property)
            .and_then(TweenValue::as_color)
            .unwrap_or(Color::BLACK)
    }

    fn number_of(&self, property: Property) -> f64 {
        self.anim
            .value(&property)
            .and_then(TweenValue::as_number)
            .unwrap_or(0.0)
    }

    /// Text a readout is currently showing.
    #[must_use]
    pub fn displayed_text(&self, readout: Readout) -> String {
        self.readout_format(readout)
            .format(self.number_of(Property::Readout(readout)))
    }

    fn is_round(&self) -> bool {
        self.config.variant == TankVariant::Round
    }

    fn over_water(&self, command: DrawCommand) -> DrawCommand {
        command.clipped_by(Element::WaveClip.node_id())
    }

    fn command(&self, element: Element) -> Option<DrawCommand> {
        let tank = self.geometry.layout.tank_transform();
        match element {
            Element::WaveClip => Some(self.wave_clip()),
            Element::BackFill => {
                let fill = self
                    .config
                    .tank
                    .back_fill_color
                    .with_alpha(self.config.tank.back_fill_color.a * self.config.tank.back_fill_opacity);
                Some(
                    self.body_shape(
                        self.geometry.layout.inner,
                        self.config.tank.inner_corner_radius,
                        BoxStyle::fill(fill),
                    )
                    .with_transform(tank),
                )
            }
            Element::Border => Some(
                self.body_shape(
                    self.geometry.layout.tank,
                    self.config.tank.border_corner_radius,
                    BoxStyle::stroke(self.border_stroke()),
                )
                .with_transform(tank),
            ),
            Element::WaterFill => Some(
                self.over_water(
                    self.body_shape(
                        self.geometry.layout.inner,
                        self.config.tank.inner_corner_radius,
                        BoxStyle::fill(self.color_of(Property::FillColor)),
                    )
                    .with_transform(tank),
                ),
            ),
            Element::NeckBackFill => {
                self.neck(BoxStyle::fill(self.config.tank.back_fill_color), false, false)
            }
            Element::NeckFill => {
                self.neck(BoxStyle::fill(self.color_of(Property::NeckColor)), false, true)
            }
            Element::NeckBorder => self.neck(BoxStyle::stroke(self.border_stroke()), true, false),
            Element::BehindText => self.readout_text(Readout::Primary, false),
            Element::OverlayText => self.readout_text(Readout::Primary, true),
            Element::LookupBehindText => self.readout_text(Readout::Lookup, false),
            Element::LookupOverlayText => self.readout_text(Readout::Lookup, true),
            Element::RateBehindText => self.readout_text(Readout::ChangeRate, false),
            Element::RateOverlayText => self.readout_text(Readout::ChangeRate, true),
            Element::BehindArrow => self.arrow(false),
            Element::OverlayArrow => self.arrow(true),
            Element::SupportLabelBackground => self.support_background(),
            Element::SupportLabel => self.support_text(false),
            Element::TopSupportLabel => self.support_text(true),
            Element::TopMarkerLabel => self.marker_label(true),
            Element::BottomMarkerLabel => self.marker_label(false),
            Element::TopEdgeMarker => self.edge_marker(true),
            Element::BottomEdgeMarker => self.edge_marker(false),
            Element::MarkerBar => self.marker_bar(),
            Element::ThresholdMarker(i) => self.threshold_marker(i),
            Element::ThresholdTooltip(i) => self.threshold_tooltip(i),
        }
    }

    // =========================================================================
    // Tank body
    // =========================================================================

    fn border_stroke(&self) -> StrokeStyle {
        StrokeStyle::new(self.config.tank.border_color, self.config.tank.border_width)
    }

    /// Rounded rectangle (tower) or ellipse (round) centred on the origin.
    fn body_shape(&self, size: Size, radius: f32, style: BoxStyle) -> DrawCommand {
        if self.is_round() {
            DrawCommand::Ellipse {
                center: Point::ORIGIN,
                rx: size.width / 2.0,
                ry: size.height / 2.0,
                style,
            }
        } else {
            DrawCommand::rounded_rect(Rect::centered(Point::ORIGIN, size), radius, style)
        }
    }

    fn neck(&self, style: BoxStyle, open: bool, water: bool) -> Option<DrawCommand> {
        let neck = self.geometry.layout.round.as_ref()?.neck;
        let segments = if open { neck.border_path() } else { neck.fill_path() };
        let command = DrawCommand::Path { segments, style }
            .with_transform(self.geometry.layout.tank_transform());
        Some(if water { self.over_water(command) } else { command })
    }

    fn wave_clip(&self) -> DrawCommand {
        let transform = wave::clip_transform(
            &self.geometry.layout,
            self.config.wave.amplitude,
            self.number_of(Property::WaveScroll) as f32,
            self.number_of(Property::FillLevel) as f32,
        );
        DrawCommand::ClipPath {
            segments: self.geometry.wave.segments.clone(),
            transform,
        }
    }

    // =========================================================================
    // Readouts and arrow
    // =========================================================================

    fn readout_style(&self, readout: Readout) -> TextStyle {
        let size = match readout {
            Readout::Primary => Some(self.config.text.font_size),
            Readout::Lookup => self.config.lookup.as_ref().map(|l| l.font_size),
            Readout::ChangeRate => self.config.change_rate.as_ref().map(|r| r.font_size),
        };
        TextStyle::new(
            self.config.text.font_family.clone(),
            size.unwrap_or(self.config.text.font_size),
        )
        .weight(self.config.text.font_weight)
        .anchor(TextAnchor::Middle)
    }

    fn readout_baseline(&self, readout: Readout) -> Option<f32> {
        let offsets = self.geometry.readouts;
        match readout {
            Readout::Primary => Some(offsets.primary),
            Readout::Lookup => offsets.lookup,
            Readout::ChangeRate => offsets.change_rate,
        }
    }

    fn readout_text(&self, readout: Readout, overlay: bool) -> Option<DrawCommand> {
        if !self.readout_enabled(readout) {
            return None;
        }
        let y = self.readout_baseline(readout)?;
        let color = self.color_of(if overlay {
            Property::FrontFont
        } else {
            Property::BackFont
        });
        let text = DrawCommand::text(
            self.displayed_text(readout),
            Point::new(0.0, y),
            self.readout_style(readout).color(color),
        )
        .with_transform(self.geometry.layout.tank_transform());
        Some(if overlay {
            self.over_water(text.with_opacity(self.state.overlay_opacity))
        } else {
            text
        })
    }

    fn arrow_style(&self) -> TextStyle {
        TextStyle::new(self.config.arrow.font_family.clone(), self.config.arrow.font_size)
            .anchor(TextAnchor::Middle)
    }

    fn arrow_position(&self, glyph: &str) -> Point {
        let arrow = &self.config.arrow;
        let glyph_size = self.scene.measure_text(glyph, &self.arrow_style());
        if self.arrow_follows_rate() {
            let rate = Readout::ChangeRate;
            let rate_width = self
                .scene
                .measure_text(&self.displayed_text(rate), &self.readout_style(rate))
                .width;
            arrow_anchor_following(
                rate_width,
                glyph_size.width,
                arrow.x_offset,
                self.geometry.readouts.change_rate.unwrap_or_default(),
            )
        } else {
            let primary = Readout::Primary;
            let text_width = self
                .scene
                .measure_text(&self.displayed_text(primary), &self.readout_style(primary))
                .width;
            arrow_anchor(text_width, glyph_size, arrow.x_offset, arrow.y_offset)
        }
    }

    fn arrow(&self, overlay: bool) -> Option<DrawCommand> {
        let glyph = self.config.arrow.glyph(self.state.arrow_direction);
        let color = self.color_of(if overlay {
            Property::FrontArrow
        } else {
            Property::BackArrow
        });
        let alpha = if self.state.arrow_visible { 1.0 } else { 0.0 };
        let command = DrawCommand::text(
            glyph,
            self.arrow_position(glyph),
            self.arrow_style().color(color),
        )
        .with_transform(self.geometry.layout.tank_transform())
        .with_opacity(alpha);
        Some(if overlay {
            self.over_water(command)
        } else {
            command
        })
    }

    // =========================================================================
    // Support label
    // =========================================================================

    fn support_style(&self, top: bool) -> TextStyle {
        let spec = &self.config.support_label;
        let size = if top { spec.top_font_size } else { spec.font_size };
        TextStyle::new(spec.font_family.clone(), size)
            .weight(spec.font_weight)
            .color(spec.font_color)
            .anchor(TextAnchor::Middle)
    }

    fn support_box(&self) -> SupportLabelBox {
        let labels = &self.state.support_labels;
        let bottom_width = self
            .scene
            .measure_text(&labels.bottom, &self.support_style(false))
            .width;
        let top_width = labels
            .top
            .as_ref()
            .map(|top| self.scene.measure_text(top, &self.support_style(true)).width);
        SupportLabelBox::fit(
            &self.config.support_label,
            bottom_width,
            top_width,
            self.geometry.layout.container.height,
            self.config.tank.border_width,
        )
    }

    fn support_group(&self, label: &SupportLabelBox) -> Transform2D {
        Transform2D::translate(0.0, label.group_y).then(&self.geometry.layout.body_transform())
    }

    fn support_background(&self) -> Option<DrawCommand> {
        let spec = &self.config.support_label;
        if !spec.enabled {
            return None;
        }
        let label = self.support_box();
        let fill = spec
            .background_color
            .with_alpha(spec.background_color.a * spec.background_opacity);
        let style = BoxStyle::fill(fill).with_stroke(StrokeStyle::new(
            self.color_of(Property::LabelStroke),
            spec.border_width,
        ));
        Some(
            DrawCommand::rounded_rect(
                Rect::centered(Point::ORIGIN, label.background),
                self.config.tank.inner_corner_radius,
                style,
            )
            .with_transform(self.support_group(&label)),
        )
    }

    fn support_text(&self, top: bool) -> Option<DrawCommand> {
        if !self.config.support_label.enabled {
            return None;
        }
        let label = self.support_box();
        let labels = &self.state.support_labels;
        let command = if top {
            let alpha = if labels.is_dual() { 1.0 } else { 0.0 };
            DrawCommand::text(
                labels.top.clone().unwrap_or_default(),
                Point::new(0.0, label.top_y),
                self.support_style(true),
            )
            .with_transform(self.support_group(&label))
            .with_opacity(alpha)
        } else {
            DrawCommand::text(
                labels.bottom.clone(),
                Point::new(0.0, label.bottom_y),
                self.support_style(false),
            )
            .with_transform(self.support_group(&label))
        };
        Some(command)
    }

    // =========================================================================
    // Markers and thresholds
    // =========================================================================

    fn marker_label(&self, top: bool) -> Option<DrawCommand> {
        let markers = &self.config.markers;
        if !markers.enabled {
            return None;
        }
        let (top_anchor, bottom_anchor) = self.geometry.layout.marker_label_anchors(markers);
        let (text, anchor) = if top {
            (&self.state.top_marker_text, top_anchor)
        } else {
            (&self.state.bottom_marker_text, bottom_anchor)
        };
        let style = marker_style(&self.config)
            .color(self.config.variant.marker_color())
            .anchor(TextAnchor::End);
        Some(
            DrawCommand::text(text.clone(), anchor, style)
                .with_transform(self.geometry.layout.tank_transform()),
        )
    }

    fn marker_bar_transform(&self) -> Transform2D {
        let x = self.geometry.layout.marker_bar_x(&self.config.markers);
        Transform2D::translate(x, 0.0).then(&self.geometry.layout.tank_transform())
    }

    fn edge_marker(&self, top: bool) -> Option<DrawCommand> {
        if !self.is_round() {
            return None;
        }
        let (min, max) = self.geometry.scale.domain();
        let b = self.config.tank.border_width;
        let y = if top {
            self.geometry.scale.map(max) as f32 + b
        } else {
            self.geometry.scale.map(min) as f32 - b
        };
        let from = Point::new(-self.config.markers.length - EDGE_TICK_OVERHANG, y);
        let stroke = StrokeStyle::new(self.config.variant.marker_color(), 1.0).round();
        Some(
            DrawCommand::line(from, Point::new(1.0, y), stroke)
                .with_transform(self.marker_bar_transform()),
        )
    }

    fn marker_bar(&self) -> Option<DrawCommand> {
        if !self.is_round() {
            return None;
        }
        let (min, max) = self.geometry.scale.domain();
        let b = self.config.tank.border_width;
        let top = self.geometry.scale.map(max) as f32 + b;
        let bottom = self.geometry.scale.map(min) as f32 - b;
        let stroke = StrokeStyle::new(self.config.variant.marker_color(), 1.0);
        Some(
            DrawCommand::line(Point::new(1.0, top), Point::new(1.0, bottom), stroke)
                .with_transform(self.marker_bar_transform()),
        )
    }

    fn threshold_marker(&self, index: usize) -> Option<DrawCommand> {
        let placed = self.geometry.thresholds.thresholds().get(index)?;
        let y = placed.position as f32;
        let width = self.number_of(Property::MarkerWidth(index)) as f32;
        let x1 = self.number_of(Property::MarkerX1(index)) as f32;
        Some(
            DrawCommand::line(
                Point::new(x1, y),
                Point::new(0.0, y),
                StrokeStyle::new(placed.color, width),
            )
            .with_transform(self.marker_bar_transform()),
        )
    }

    fn threshold_tooltip(&self, index: usize) -> Option<DrawCommand> {
        let placed = self.geometry.thresholds.thresholds().get(index)?;
        let style = TextStyle::new(TOOLTIP_FONT, self.config.tooltip_font_size).color(Color::WHITE);
        let lines = placed.tooltip_lines();
        let measured: Vec<Size> = lines
            .iter()
            .map(|line| self.scene.measure_text(line, &style))
            .collect();
        let text_width = measured.iter().fold(0.0f32, |w, s| w.max(s.width));
        let line_height = measured
            .iter()
            .fold(self.config.tooltip_font_size, |h, s| h.max(s.height));
        let size = Size::new(
            2.0f32.mul_add(TOOLTIP_PADDING, text_width),
            3.0f32.mul_add(line_height, 2.0 * TOOLTIP_PADDING),
        );

        let mut children = vec![DrawCommand::rounded_rect(
            Rect::from_size(size),
            0.0,
            BoxStyle::fill(tooltip_background()),
        )];
        for (row, line) in lines.into_iter().enumerate() {
            let baseline = (row as f32 + 1.0).mul_add(line_height, TOOLTIP_PADDING);
            children.push(DrawCommand::text(
                line,
                Point::new(TOOLTIP_PADDING, baseline),
                style.clone(),
            ));
        }

        let layout = &self.geometry.layout;
        let x = layout.container.width - 2.0 * self.geometry.marker_label_width - size.width;
        let y = placed.position as f32 + layout.inner.height / 2.0 - TOOLTIP_LIFT;
        let alpha = if self.state.hovered == Some(index) { 1.0 } else { 0.0 };
        Some(
            DrawCommand::Group {
                children,
                transform: Transform2D::translate(x, y),
            }
            .with_opacity(alpha),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ArrowDirection, GaugeConfig, ReadoutSpec, TankVariant, Threshold};
    use crate::element::Element;
    use crate::gauge::{ArrowUpdate, TankGauge};
    use tankgauge_core::{DrawCommand, RecordingScene, Size};

    fn gauge(config: GaugeConfig) -> TankGauge<RecordingScene> {
        TankGauge::new(config, Size::new(120.0, 300.0), RecordingScene::new()).unwrap()
    }

    #[test]
    fn test_tower_skips_round_elements() {
        let g = gauge(GaugeConfig::default());
        for element in [
            Element::NeckBackFill,
            Element::NeckFill,
            Element::NeckBorder,
            Element::TopEdgeMarker,
            Element::BottomEdgeMarker,
            Element::MarkerBar,
        ] {
            assert!(g.scene().node(element.node_id()).is_none(), "{element:?}");
        }
        assert!(matches!(
            g.scene().node(Element::Border.node_id()).map(DrawCommand::leaf),
            Some(DrawCommand::Rect { .. })
        ));
    }

    #[test]
    fn test_round_draws_ellipse_and_neck() {
        let g = gauge(GaugeConfig::new(TankVariant::Round));
        assert!(matches!(
            g.scene().node(Element::Border.node_id()).map(DrawCommand::leaf),
            Some(DrawCommand::Ellipse { .. })
        ));
        for element in [Element::NeckFill, Element::NeckBorder, Element::MarkerBar] {
            assert!(g.scene().node(element.node_id()).is_some(), "{element:?}");
        }
        assert!(matches!(
            g.scene().node(Element::NeckFill.node_id()),
            Some(DrawCommand::Clipped { .. })
        ));
    }

    #[test]
    fn test_water_and_overlays_are_clipped() {
        let g = gauge(GaugeConfig::default());
        for element in [Element::WaterFill, Element::OverlayText, Element::OverlayArrow] {
            match g.scene().node(element.node_id()) {
                Some(DrawCommand::Clipped { clip, .. }) => {
                    assert_eq!(*clip, Element::WaveClip.node_id());
                }
                other => panic!("{element:?} not clipped: {other:?}"),
            }
        }
        assert!(matches!(
            g.scene().node(Element::WaveClip.node_id()),
            Some(DrawCommand::ClipPath { .. })
        ));
    }

    #[test]
    fn test_disabled_readouts_have_no_nodes() {
        let g = gauge(GaugeConfig::default());
        assert!(g.scene().node(Element::LookupBehindText.node_id()).is_none());
        assert!(g.scene().node(Element::RateOverlayText.node_id()).is_none());

        let g = gauge(GaugeConfig::default().with_change_rate(ReadoutSpec::new(-1.5, "ft/h")));
        assert!(g.scene().node(Element::RateBehindText.node_id()).is_some());
    }

    #[test]
    fn test_arrow_glyph_and_visibility() {
        let mut g = gauge(GaugeConfig::default());
        let arrow = g.scene().node(Element::BehindArrow.node_id()).unwrap();
        assert_eq!(arrow.text_content(), Some("\u{f07e}"));
        assert_eq!(arrow.opacity(), 1.0);

        g.update_arrow(ArrowUpdate::hide().direction(ArrowDirection::Up))
            .unwrap();
        let arrow = g.scene().node(Element::BehindArrow.node_id()).unwrap();
        assert_eq!(arrow.text_content(), Some("\u{f176}"));
        assert_eq!(arrow.opacity(), 0.0);
    }

    #[test]
    fn test_arrow_disabled_in_config_starts_hidden() {
        let mut g = gauge(GaugeConfig::default().with_arrow(false));
        for element in [Element::BehindArrow, Element::OverlayArrow] {
            let arrow = g.scene().node(element.node_id()).unwrap();
            assert_eq!(arrow.opacity(), 0.0, "{element:?}");
        }

        g.update_arrow(ArrowUpdate::show()).unwrap();
        g.tick(1000.0).unwrap();
        let arrow = g.scene().node(Element::BehindArrow.node_id()).unwrap();
        assert_eq!(arrow.opacity(), 1.0);
        assert_eq!(arrow.text_content(), Some("\u{f07e}"));
    }

    #[test]
    fn test_top_support_label_hidden_in_single_mode() {
        let mut g = gauge(GaugeConfig::default());
        let top = g.scene().node(Element::TopSupportLabel.node_id()).unwrap();
        assert_eq!(top.opacity(), 0.0);
        g.set_support_label(&["Tank 7", "Diesel"]).unwrap();
        let top = g.scene().node(Element::TopSupportLabel.node_id()).unwrap();
        assert_eq!(top.opacity(), 1.0);
        assert_eq!(top.text_content(), Some("Tank 7"));
        assert_eq!(
            g.scene()
                .node(Element::SupportLabel.node_id())
                .and_then(DrawCommand::text_content),
            Some("Diesel")
        );
    }

    #[test]
    fn test_threshold_nodes_and_tooltip_text() {
        let g = gauge(GaugeConfig::default().with_thresholds(vec![
            Threshold::new("High", 80.0).alarm(),
            Threshold::new("Low", 20.0).kind("warning"),
        ]));
        assert!(g.scene().node(Element::ThresholdMarker(1).node_id()).is_some());
        let tooltip = g.scene().node(Element::ThresholdTooltip(0).node_id()).unwrap();
        assert_eq!(tooltip.opacity(), 0.0);
        assert_eq!(tooltip.text_content(), Some("Name: High"));
    }

    #[test]
    fn test_marker_labels() {
        let g = gauge(GaugeConfig::default().with_range(0.0, 250.0));
        assert_eq!(
            g.scene()
                .node(Element::TopMarkerLabel.node_id())
                .and_then(DrawCommand::text_content),
            Some("250")
        );
    }
}

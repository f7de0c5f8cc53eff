//! Layout calculator.
//!
//! Every dimension the gauge draws with is derived here from the container
//! size and the configuration. A [`Layout`] is replaced wholesale on resize.
//!
//! Coordinates: the body group is centred in the container. The round
//! variant shifts its tank group up so the ellipse sits on top of the neck.

use crate::config::{
    GaugeConfig, MarkerSpec, ReadoutSpec, SupportLabelSpec, TankVariant,
};
use crate::error::{GaugeError, Result};
use serde::{Deserialize, Serialize};
use tankgauge_core::{PathSegment, Point, Size, Transform2D};

/// Derived tank geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Tank silhouette
    pub variant: TankVariant,
    /// Container size
    pub container: Size,
    /// Perimeter width
    pub border_width: f32,
    /// Outer tank size (the round body excludes the neck band)
    pub tank: Size,
    /// Fill area size
    pub inner: Size,
    /// Round body geometry
    pub round: Option<RoundBody>,
}

/// Ellipse radii, group offset and neck of a round tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundBody {
    /// Body horizontal radius
    pub rx: f32,
    /// Body vertical radius
    pub ry: f32,
    /// Fill area horizontal radius
    pub inner_rx: f32,
    /// Fill area vertical radius
    pub inner_ry: f32,
    /// Vertical shift of the tank group relative to the body centre
    pub offset_y: f32,
    /// Neck outline
    pub neck: NeckCurve,
}

/// Right half of the neck outline; the left half mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeckCurve {
    /// Where the neck leaves the ellipse, at 7/8 of the vertical radius
    pub top_right: Point,
    /// Shared control point of the shoulder curve
    pub control_right: Point,
    /// Bottom of the neck opening
    pub bottom_right: Point,
}

impl NeckCurve {
    /// Derive the neck from the body radii.
    fn new(rx: f32, ry: f32, bottom_y: f32, half_width: f32) -> Self {
        let y = ry * 7.0 / 8.0;
        let x = (rx * rx * (1.0 - (y * y) / (ry * ry))).sqrt();
        Self {
            top_right: Point::new(x, y),
            control_right: Point::new(half_width, ry),
            bottom_right: Point::new(half_width, bottom_y),
        }
    }

    /// Open outline: right shoulder, neck bottom, left shoulder.
    #[must_use]
    pub fn border_path(&self) -> Vec<PathSegment> {
        let control_left = self.control_right.mirror_x();
        vec![
            PathSegment::MoveTo(self.top_right),
            PathSegment::CubicTo {
                ctrl1: self.control_right,
                ctrl2: self.control_right,
                to: self.bottom_right,
            },
            PathSegment::LineTo(self.bottom_right.mirror_x()),
            PathSegment::CubicTo {
                ctrl1: control_left,
                ctrl2: control_left,
                to: self.top_right.mirror_x(),
            },
        ]
    }

    /// Closed outline for filling.
    #[must_use]
    pub fn fill_path(&self) -> Vec<PathSegment> {
        let mut path = self.border_path();
        path.push(PathSegment::Close);
        path
    }
}

impl Layout {
    /// Compute the layout for `container`.
    ///
    /// `marker_label_width` is the measured width of the wider marker label;
    /// a round tank is narrowed by twice that so labels clear the ellipse.
    pub fn compute(config: &GaugeConfig, container: Size, marker_label_width: f32) -> Result<Self> {
        if !container.is_positive() {
            return Err(GaugeError::config(format!(
                "container must be positive, got {}x{}",
                container.width, container.height
            )));
        }
        let b = config.tank.border_width;
        let tank = match config.variant {
            TankVariant::Tower => container.shrink(b),
            TankVariant::Round => Size::new(
                container.width - 2.0 * (b + marker_label_width),
                container.height - b - config.tank.neck_height,
            ),
        };
        let inner = match config.tank.fill_padding {
            Some(p) if p != 0.0 => tank.shrink(2.0 * p),
            _ => tank.shrink(b),
        };
        if !tank.is_positive() {
            return Err(GaugeError::config(format!(
                "tank dimensions {}x{} are not positive",
                tank.width, tank.height
            )));
        }
        if !inner.is_positive() {
            return Err(GaugeError::config(format!(
                "fill area {}x{} is not positive; reduce padding or border",
                inner.width, inner.height
            )));
        }

        let round = (config.variant == TankVariant::Round).then(|| {
            let rx = tank.width / 2.0;
            let ry = tank.height / 2.0;
            let half_neck = config.tank.neck_width.map_or(rx / 4.0, |w| w / 2.0);
            RoundBody {
                rx,
                ry,
                inner_rx: inner.width / 2.0,
                inner_ry: inner.height / 2.0,
                offset_y: -(container.height / 2.0 - ry - b / 2.0),
                neck: NeckCurve::new(rx, ry, container.height - ry - b / 2.0, half_neck),
            }
        });

        Ok(Self {
            variant: config.variant,
            container,
            border_width: b,
            tank,
            inner,
            round,
        })
    }

    /// Transform of the body group: the container centre.
    #[must_use]
    pub fn body_transform(&self) -> Transform2D {
        Transform2D::translate(self.container.width / 2.0, self.container.height / 2.0)
    }

    /// Vertical shift of the tank group inside the body group.
    #[must_use]
    pub fn tank_offset_y(&self) -> f32 {
        self.round.as_ref().map_or(0.0, |r| r.offset_y)
    }

    /// Transform of the tank group in scene space.
    #[must_use]
    pub fn tank_transform(&self) -> Transform2D {
        Transform2D::translate(0.0, self.tank_offset_y()).then(&self.body_transform())
    }

    /// Vertical start of the wave clip before the level offset is applied.
    #[must_use]
    pub fn wave_start_y(&self, amplitude: f32) -> f32 {
        (self.tank.height - self.inner.height) / 2.0 - amplitude / 2.0
    }

    /// Convert a container-relative pointer `y` into marker space.
    #[must_use]
    pub fn to_marker_space(&self, y: f32) -> f32 {
        y - self.container.height / 2.0 - self.tank_offset_y()
    }

    /// Anchors of the top and bottom marker labels in tank space.
    #[must_use]
    pub fn marker_label_anchors(&self, markers: &MarkerSpec) -> (Point, Point) {
        let x = self.inner.width / 2.0 + markers.label_x_offset - markers.font_size / 4.0;
        let top = Point::new(
            x,
            -(self.inner.height / 2.0 - markers.font_size + markers.label_y_offset),
        );
        let bottom = Point::new(
            x,
            self.inner.height / 2.0 - markers.font_size / 4.0 + markers.label_y_offset,
        );
        (top, bottom)
    }

    /// Horizontal position of the marker bar group in tank space.
    #[must_use]
    pub fn marker_bar_x(&self, markers: &MarkerSpec) -> f32 {
        match self.variant {
            TankVariant::Tower => self.inner.width / 2.0,
            TankVariant::Round => self.inner.width / 2.0 + markers.length + markers.bar_x_offset,
        }
    }
}

/// Vertical baselines of the readouts relative to the tank centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadoutOffsets {
    /// Primary value
    pub primary: f32,
    /// Lookup-table value
    pub lookup: Option<f32>,
    /// Change-rate value
    pub change_rate: Option<f32>,
}

impl ReadoutOffsets {
    /// Stack the enabled readouts below the primary one.
    #[must_use]
    pub fn new(font_size: f32, lookup: Option<&ReadoutSpec>, change_rate: Option<&ReadoutSpec>) -> Self {
        let primary = font_size / 4.0;
        let lookup_step = lookup.map(|l| l.font_size + l.y_offset);
        let change_rate = change_rate.map(|r| {
            primary + r.font_size + r.y_offset + lookup_step.unwrap_or(0.0)
        });
        Self {
            primary,
            lookup: lookup_step.map(|step| primary + step),
            change_rate,
        }
    }
}

/// Anchor of the trend arrow next to the primary readout.
///
/// `text_width` is the rendered width of the primary readout and `arrow`
/// the size of the arrow glyph.
#[must_use]
pub fn arrow_anchor(text_width: f32, arrow: Size, x_offset: f32, y_offset: f32) -> Point {
    Point::new(
        text_width / 2.0 + arrow.width + x_offset,
        arrow.height / 4.0 + y_offset,
    )
}

/// Anchor of the trend arrow when it follows the change-rate readout.
#[must_use]
pub fn arrow_anchor_following(
    rate_width: f32,
    arrow_width: f32,
    x_offset: f32,
    rate_baseline: f32,
) -> Point {
    Point::new(
        rate_width / 2.0 + arrow_width / 2.0 + x_offset,
        rate_baseline - 1.0,
    )
}

/// Support label background and text placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportLabelBox {
    /// Background size
    pub background: Size,
    /// Vertical centre of the label group relative to the body centre
    pub group_y: f32,
    /// Baseline of the bottom (or only) label within the group
    pub bottom_y: f32,
    /// Baseline of the top label within the group
    pub top_y: f32,
}

impl SupportLabelBox {
    /// Fit the background around one or two labels.
    ///
    /// `top_width` is `Some` in dual-label mode.
    #[must_use]
    pub fn fit(
        spec: &SupportLabelSpec,
        bottom_width: f32,
        top_width: Option<f32>,
        container_height: f32,
        border_width: f32,
    ) -> Self {
        let single_height = spec.font_size - spec.y_offset;
        let (width, height, bottom_y) = match top_width {
            Some(top) => (
                bottom_width.max(top),
                single_height + spec.top_font_size - spec.top_y_offset,
                spec.font_size + spec.y_offset,
            ),
            None => (
                bottom_width,
                single_height,
                spec.font_size / 2.0 + spec.y_offset,
            ),
        };
        let p = spec.padding;
        let background = Size::new(width + 2.0 * p + 1.6 * p, height + 2.0 * p);
        Self {
            background,
            group_y: container_height / 2.0 - border_width - background.height / 2.0,
            bottom_y,
            top_y: spec.y_offset + spec.top_y_offset,
        }
    }
}

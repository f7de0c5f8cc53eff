//! Draw commands emitted into the scene graph.
//!
//! All gauge rendering reduces to these primitives. Commands are plain data
//! so a backend can serialize them, diff them, or paint them directly.

use crate::scene::NodeId;
use crate::text::TextStyle;
use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for lines and outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cap: LineCap::Butt,
        }
    }
}

impl StrokeStyle {
    /// Create a butt-capped stroke.
    #[must_use]
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
        }
    }

    /// Use round caps.
    #[must_use]
    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }
}

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    /// Flat cap at endpoint
    #[default]
    Butt,
    /// Rounded cap
    Round,
}

/// Box style for rectangles, ellipses and closed paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: None,
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Create a box with only stroke.
    #[must_use]
    pub fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }

    /// Add a stroke to the box.
    #[must_use]
    pub fn with_stroke(mut self, style: StrokeStyle) -> Self {
        self.stroke = Some(style);
        self
    }
}

/// 2D transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f]
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transformation.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Create a translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Chain transforms: first apply self, then apply other.
    ///
    /// For point p: `a.then(b).apply(p)` == `b.apply(a.apply(p))`
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        let a = other.matrix;
        let b = self.matrix;
        Self {
            matrix: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let m = self.matrix;
        Point::new(
            m[0] * point.x + m[2] * point.y + m[4],
            m[1] * point.x + m[3] * point.y + m[5],
        )
    }

    /// Translation component.
    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.matrix[4], self.matrix[5])
    }
}

/// One segment of a vector path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Start a new subpath
    MoveTo(Point),
    /// Straight line to a point
    LineTo(Point),
    /// Quadratic Bézier curve
    QuadTo {
        /// Control point
        ctrl: Point,
        /// End point
        to: Point,
    },
    /// Cubic Bézier curve
    CubicTo {
        /// First control point
        ctrl1: Point,
        /// Second control point
        ctrl2: Point,
        /// End point
        to: Point,
    },
    /// Close the current subpath
    Close,
}

impl PathSegment {
    /// End point of the segment, if it has one.
    #[must_use]
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => Some(p),
            Self::QuadTo { to, .. } | Self::CubicTo { to, .. } => Some(to),
            Self::Close => None,
        }
    }
}

/// Flatten a path into a polyline, sampling each curve `steps` times.
///
/// `Close` repeats the first point of the current subpath.
#[must_use]
pub fn flatten_path(segments: &[PathSegment], steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    let mut points = Vec::new();
    let mut current = Point::ORIGIN;
    let mut subpath_start = Point::ORIGIN;

    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) => {
                points.push(p);
                current = p;
                subpath_start = p;
            }
            PathSegment::LineTo(p) => {
                points.push(p);
                current = p;
            }
            PathSegment::QuadTo { ctrl, to } => {
                for i in 1..=steps {
                    let t = i as f32 / steps as f32;
                    let a = current.lerp(&ctrl, t);
                    let b = ctrl.lerp(&to, t);
                    points.push(a.lerp(&b, t));
                }
                current = to;
            }
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                for i in 1..=steps {
                    let t = i as f32 / steps as f32;
                    let a = current.lerp(&ctrl1, t);
                    let b = ctrl1.lerp(&ctrl2, t);
                    let c = ctrl2.lerp(&to, t);
                    let ab = a.lerp(&b, t);
                    let bc = b.lerp(&c, t);
                    points.push(ab.lerp(&bc, t));
                }
                current = to;
            }
            PathSegment::Close => {
                points.push(subpath_start);
                current = subpath_start;
            }
        }
    }

    points
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw an axis-aligned ellipse
    Ellipse {
        /// Center point
        center: Point,
        /// Horizontal radius
        rx: f32,
        /// Vertical radius
        ry: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Draw a straight line
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Stroke style
        style: StrokeStyle,
    },

    /// Draw a vector path
    Path {
        /// Path segments
        segments: Vec<PathSegment>,
        /// Fill and stroke
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Anchor position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Group of commands with transform
    Group {
        /// Child commands
        children: Vec<DrawCommand>,
        /// Transform to apply
        transform: Transform2D,
    },

    /// Clip region definition, referenced by [`DrawCommand::Clipped`].
    ///
    /// Everything inside the closed path is visible. The outline is given in
    /// scene space after `transform` is applied.
    ClipPath {
        /// Closed outline of the visible region
        segments: Vec<PathSegment>,
        /// Transform applied to the outline
        transform: Transform2D,
    },

    /// Child clipped by the clip path stored under `clip`.
    Clipped {
        /// Node holding the clip path
        clip: NodeId,
        /// Clipped command
        child: Box<DrawCommand>,
    },

    /// Apply opacity
    Opacity {
        /// Alpha value (0.0 - 1.0)
        alpha: f32,
        /// Child command
        child: Box<DrawCommand>,
    },
}

impl DrawCommand {
    /// Create a rounded rectangle with a box style.
    #[must_use]
    pub fn rounded_rect(bounds: Rect, radius: f32, style: BoxStyle) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            style,
        }
    }

    /// Create a line between two points.
    #[must_use]
    pub fn line(from: Point, to: Point, style: StrokeStyle) -> Self {
        Self::Line { from, to, style }
    }

    /// Create a text command.
    #[must_use]
    pub fn text(content: impl Into<String>, position: Point, style: TextStyle) -> Self {
        Self::Text {
            content: content.into(),
            position,
            style,
        }
    }

    /// Wrap in a group with transform.
    #[must_use]
    pub fn with_transform(self, transform: Transform2D) -> Self {
        Self::Group {
            children: vec![self],
            transform,
        }
    }

    /// Wrap with opacity.
    #[must_use]
    pub fn with_opacity(self, alpha: f32) -> Self {
        Self::Opacity {
            alpha,
            child: Box::new(self),
        }
    }

    /// Clip by the clip path stored under `clip`.
    #[must_use]
    pub fn clipped_by(self, clip: NodeId) -> Self {
        Self::Clipped {
            clip,
            child: Box::new(self),
        }
    }

    /// Text content of the first text command in this tree.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            Self::Group { children, .. } => children.iter().find_map(Self::text_content),
            Self::Clipped { child, .. } | Self::Opacity { child, .. } => child.text_content(),
            _ => None,
        }
    }

    /// Outermost opacity applied to this tree (1.0 when none).
    #[must_use]
    pub fn opacity(&self) -> f32 {
        match self {
            Self::Opacity { alpha, .. } => *alpha,
            Self::Group { children, .. } if children.len() == 1 => children[0].opacity(),
            Self::Clipped { child, .. } => child.opacity(),
            _ => 1.0,
        }
    }

    /// Accumulated transform down to the first non-group command.
    #[must_use]
    pub fn net_transform(&self) -> Transform2D {
        match self {
            Self::Group {
                children,
                transform,
            } => children
                .first()
                .map_or(*transform, |child| child.net_transform().then(transform)),
            Self::Clipped { child, .. } | Self::Opacity { child, .. } => child.net_transform(),
            _ => Transform2D::identity(),
        }
    }

    /// First non-wrapper command in this tree.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Group { children, .. } if !children.is_empty() => children[0].leaf(),
            Self::Clipped { child, .. } | Self::Opacity { child, .. } => child.leaf(),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_style_default() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.width, 1.0);
        assert_eq!(style.cap, LineCap::Butt);
        assert_eq!(StrokeStyle::new(Color::RED, 2.0).round().cap, LineCap::Round);
    }

    #[test]
    fn test_box_style_constructors() {
        assert_eq!(BoxStyle::default().fill, Some(Color::WHITE));
        let s = BoxStyle::fill(Color::RED).with_stroke(StrokeStyle::default());
        assert_eq!(s.fill, Some(Color::RED));
        assert!(s.stroke.is_some());
        assert!(BoxStyle::stroke(StrokeStyle::default()).fill.is_none());
    }

    #[test]
    fn test_transform_translate_then() {
        let t = Transform2D::translate(10.0, 5.0).then(&Transform2D::translate(1.0, 2.0));
        assert_eq!(t.apply(Point::ORIGIN), Point::new(11.0, 7.0));
        assert_eq!(t.offset(), Point::new(11.0, 7.0));
    }

    #[test]
    fn test_flatten_line_path() {
        let path = [
            PathSegment::MoveTo(Point::new(0.0, 0.0)),
            PathSegment::LineTo(Point::new(10.0, 0.0)),
            PathSegment::LineTo(Point::new(10.0, 10.0)),
            PathSegment::Close,
        ];
        let points = flatten_path(&path, 4);
        assert_eq!(points.len(), 4);
        assert_eq!(points[3], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_flatten_quad_hits_endpoint() {
        let path = [
            PathSegment::MoveTo(Point::ORIGIN),
            PathSegment::QuadTo {
                ctrl: Point::new(5.0, 10.0),
                to: Point::new(10.0, 0.0),
            },
        ];
        let points = flatten_path(&path, 2);
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], Point::new(5.0, 5.0));
        assert_eq!(points[2], Point::new(10.0, 0.0));
    }

    #[test]
    fn test_flatten_cubic_hits_endpoint() {
        let path = [
            PathSegment::MoveTo(Point::ORIGIN),
            PathSegment::CubicTo {
                ctrl1: Point::new(0.0, 10.0),
                ctrl2: Point::new(10.0, 10.0),
                to: Point::new(10.0, 0.0),
            },
        ];
        let points = flatten_path(&path, 8);
        assert_eq!(points.last().copied(), Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_draw_command_accessors() {
        let cmd = DrawCommand::text("55.0 ft", Point::ORIGIN, TextStyle::default())
            .with_transform(Transform2D::translate(0.0, 5.0))
            .with_opacity(0.0)
            .clipped_by(NodeId(1));
        assert_eq!(cmd.text_content(), Some("55.0 ft"));
        assert_eq!(cmd.opacity(), 0.0);
        assert_eq!(cmd.net_transform().offset(), Point::new(0.0, 5.0));
        assert!(matches!(cmd.leaf(), DrawCommand::Text { .. }));
    }

    #[test]
    fn test_nested_transforms_compose() {
        let cmd = DrawCommand::line(Point::ORIGIN, Point::new(1.0, 0.0), StrokeStyle::default())
            .with_transform(Transform2D::translate(3.0, 0.0))
            .with_transform(Transform2D::translate(0.0, 4.0));
        assert_eq!(cmd.net_transform().offset(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_draw_command_serializes() {
        let cmd = DrawCommand::rounded_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            3.0,
            BoxStyle::fill(Color::RED),
        );
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}

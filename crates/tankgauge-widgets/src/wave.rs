//! Wave clip path.
//!
//! The water surface is a periodic curve wide enough to scroll across the
//! whole tank. The curve starts as one quadratic arch; each following span
//! reflects the previous control point about the current end point, which
//! alternates crests and troughs. Quadratic spans are stored as their exact
//! cubic equivalents.

use crate::error::{GaugeError, Result};
use crate::layout::Layout;
use tankgauge_core::{PathSegment, Point, Size, Transform2D};

/// Closed wave clip outline in clip space.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePath {
    /// Path segments: curve, right edge, bottom, close
    pub segments: Vec<PathSegment>,
    /// Total width of the periodic part
    pub width: f32,
}

/// Raise a quadratic span to a cubic with the same shape.
fn elevate(from: Point, ctrl: Point, to: Point) -> PathSegment {
    PathSegment::CubicTo {
        ctrl1: from.lerp(&ctrl, 2.0 / 3.0),
        ctrl2: to.lerp(&ctrl, 2.0 / 3.0),
        to,
    }
}

struct Builder {
    segments: Vec<PathSegment>,
    current: Point,
    ctrl: Point,
}

impl Builder {
    fn quad(&mut self, ctrl: Point, to: Point) {
        self.segments.push(elevate(self.current, ctrl, to));
        self.ctrl = ctrl;
        self.current = to;
    }

    /// Smooth continuation to `to`.
    fn smooth(&mut self, to: Point) {
        let reflected = Point::new(
            2.0f32.mul_add(self.current.x, -self.ctrl.x),
            2.0f32.mul_add(self.current.y, -self.ctrl.y),
        );
        self.quad(reflected, to);
    }
}

/// Build the wave clip for `container`.
///
/// The curve covers at least `2 * width + 2 * wavelength + border / 2` and
/// is closed down to the container's bottom edge.
pub fn wave_path(
    wavelength: f32,
    amplitude: f32,
    container: Size,
    border_width: f32,
) -> Result<WavePath> {
    if !(wavelength.is_finite() && wavelength > 0.0) {
        return Err(GaugeError::config(format!(
            "wavelength must be positive, got {wavelength}"
        )));
    }
    let w = wavelength;
    let mut builder = Builder {
        segments: vec![PathSegment::MoveTo(Point::ORIGIN)],
        current: Point::ORIGIN,
        ctrl: Point::ORIGIN,
    };
    builder.quad(Point::new(w / 2.0, amplitude), Point::new(w, 0.0));
    builder.smooth(Point::new(2.0 * w, 0.0));

    let required = 2.0f32.mul_add(container.width, 2.0 * w) + border_width / 2.0;
    let mut width = 2.0 * w;
    while width < required {
        for _ in 0..2 {
            width += w;
            builder.smooth(Point::new(width, 0.0));
        }
    }

    let mut segments = builder.segments;
    segments.push(PathSegment::LineTo(Point::new(width, container.height)));
    segments.push(PathSegment::LineTo(Point::new(0.0, container.height)));
    segments.push(PathSegment::Close);
    Ok(WavePath { segments, width })
}

/// Horizontal scroll endpoints of one wave cycle.
#[must_use]
pub fn scroll_range(container_width: f32, wavelength: f32) -> (f64, f64) {
    let w = f64::from(container_width);
    (-2.0f64.mul_add(f64::from(wavelength), w), -w)
}

/// Scene-space transform of the wave clip.
///
/// `scroll_x` is the horizontal scroll offset and `level` the vertical fill
/// offset in tank space.
#[must_use]
pub fn clip_transform(layout: &Layout, amplitude: f32, scroll_x: f32, level: f32) -> Transform2D {
    Transform2D::translate(scroll_x, layout.wave_start_y(amplitude))
        .then(&Transform2D::translate(0.0, level))
        .then(&layout.tank_transform())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GaugeConfig;
    use tankgauge_core::flatten_path;

    #[test]
    fn test_wave_covers_required_width() {
        let wave = wave_path(100.0, 3.0, Size::new(100.0, 300.0), 2.0).unwrap();
        assert_eq!(wave.width, 600.0);
        // move, six spans, two edges, close
        assert_eq!(wave.segments.len(), 10);
        assert_eq!(
            wave.segments[7],
            PathSegment::LineTo(Point::new(600.0, 300.0))
        );
        assert_eq!(wave.segments[9], PathSegment::Close);
    }

    #[test]
    fn test_wave_alternates_crest_and_trough() {
        let wave = wave_path(100.0, 6.0, Size::new(10.0, 50.0), 0.0).unwrap();
        let points = flatten_path(&wave.segments[..3], 2);
        // midpoint of a quadratic arch sits at half the control height
        assert!((points[1].y - 3.0).abs() < 1e-4);
        assert!((points[3].y + 3.0).abs() < 1e-4);
        assert_eq!(points[4], Point::new(200.0, 0.0));
    }

    #[test]
    fn test_elevated_controls() {
        let wave = wave_path(90.0, 3.0, Size::new(10.0, 50.0), 0.0).unwrap();
        match wave.segments[1] {
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                assert!((ctrl1.x - 30.0).abs() < 1e-4);
                assert!((ctrl1.y - 2.0).abs() < 1e-4);
                assert!((ctrl2.x - 60.0).abs() < 1e-4);
                assert_eq!(to, Point::new(90.0, 0.0));
            }
            ref other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_wavelength() {
        assert!(wave_path(0.0, 3.0, Size::new(10.0, 10.0), 0.0).is_err());
        assert!(wave_path(f32::INFINITY, 3.0, Size::new(10.0, 10.0), 0.0).is_err());
        assert!(wave_path(-5.0, 3.0, Size::new(10.0, 10.0), 0.0).is_err());
    }

    #[test]
    fn test_scroll_range() {
        assert_eq!(scroll_range(100.0, 100.0), (-300.0, -100.0));
    }

    #[test]
    fn test_clip_transform_composes_offsets() {
        let config = GaugeConfig::default();
        let layout = Layout::compute(&config, Size::new(100.0, 300.0), 0.0).unwrap();
        let t = clip_transform(&layout, 3.0, -150.0, -10.0);
        // start y = (298 - 296) / 2 - 1.5
        assert_eq!(t.apply(Point::ORIGIN), Point::new(-100.0, 150.0 - 0.5 - 10.0));
    }
}

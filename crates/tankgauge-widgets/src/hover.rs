//! Hover resolution over threshold bands.

use crate::config::MarkerSpec;
use tankgauge_core::Timing;

/// Timing of the marker highlight and reset transitions.
pub const HOVER_TIMING: Timing = Timing::new(200.0);

/// Extra stroke width and tick length of a highlighted marker.
pub const HIGHLIGHT_GROWTH: f32 = 3.0;

/// Left bisection: index of the first boundary `>= y`.
#[must_use]
pub fn bisect_left(boundaries: &[f64], y: f64) -> usize {
    boundaries.partition_point(|b| *b < y)
}

/// Threshold band under the pointer.
///
/// Returns `None` only when there are no thresholds. An index past the last
/// threshold falls back to the first one.
#[must_use]
pub fn resolve(boundaries: &[f64], threshold_count: usize, y: f64) -> Option<usize> {
    if threshold_count == 0 {
        return None;
    }
    let index = bisect_left(boundaries, y);
    Some(if index < threshold_count { index } else { 0 })
}

/// Stroke width and tick start of a threshold marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerEmphasis {
    /// Stroke width
    pub width: f32,
    /// Tick start; the tick ends at 0
    pub x1: f32,
}

impl MarkerEmphasis {
    /// Resting marker.
    #[must_use]
    pub fn rest(spec: &MarkerSpec) -> Self {
        Self {
            width: spec.width,
            x1: -spec.length,
        }
    }

    /// Highlighted marker.
    #[must_use]
    pub fn highlighted(spec: &MarkerSpec) -> Self {
        Self {
            width: spec.width + HIGHLIGHT_GROWTH,
            x1: -(spec.length + HIGHLIGHT_GROWTH),
        }
    }
}

/// Per-marker target emphasis and tooltip visibility for a hover result.
///
/// `selected == None` resets every marker.
#[must_use]
pub fn emphasis_plan(
    count: usize,
    selected: Option<usize>,
    spec: &MarkerSpec,
) -> Vec<(MarkerEmphasis, bool)> {
    (0..count)
        .map(|i| {
            if selected == Some(i) {
                (MarkerEmphasis::highlighted(spec), true)
            } else {
                (MarkerEmphasis::rest(spec), false)
            }
        })
        .collect()
}

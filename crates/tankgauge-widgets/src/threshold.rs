//! Threshold index: marker positions and hover boundaries.

use crate::config::Threshold;
use crate::scale::LinearScale;
use tankgauge_core::Color;

/// A threshold resolved against the current scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedThreshold {
    /// Source threshold
    pub threshold: Threshold,
    /// Vertical pixel offset in marker space
    pub position: f64,
    /// Marker colour
    pub color: Color,
}

impl PlacedThreshold {
    /// The three tooltip lines.
    #[must_use]
    pub fn tooltip_lines(&self) -> [String; 3] {
        [
            format!("Name: {}", self.threshold.name),
            format!("Value: {}", self.threshold.value),
            format!("Type: {}", self.threshold.kind),
        ]
    }
}

/// Thresholds in input order with the midpoints between neighbours.
///
/// Order is never changed: adjacency follows the order the caller supplied,
/// which is expected to be the visual order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThresholdIndex {
    placed: Vec<PlacedThreshold>,
    boundaries: Vec<f64>,
}

impl ThresholdIndex {
    /// Place every threshold on `scale`.
    ///
    /// Alarm thresholds are red; the rest use `theme`.
    #[must_use]
    pub fn build(thresholds: &[Threshold], scale: &LinearScale, theme: Color) -> Self {
        let placed: Vec<PlacedThreshold> = thresholds
            .iter()
            .map(|t| PlacedThreshold {
                threshold: t.clone(),
                position: scale.map(t.value),
                color: if t.is_alarm() { Color::RED } else { theme },
            })
            .collect();
        let boundaries = placed
            .windows(2)
            .map(|pair| (pair[0].position + pair[1].position) / 2.0)
            .collect();
        Self { placed, boundaries }
    }

    /// Placed thresholds.
    #[must_use]
    pub fn thresholds(&self) -> &[PlacedThreshold] {
        &self.placed
    }

    /// Midpoint boundaries; `boundaries()[i]` lies between thresholds `i` and `i + 1`.
    #[must_use]
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Number of thresholds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Check if there are no thresholds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> LinearScale {
        LinearScale::for_fill(0.0, 100.0, 200.0, 0.0).unwrap()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    fn reservoir() -> Vec<Threshold> {
        vec![
            Threshold::new("Alarm High", 90.0).kind("High").alarm(),
            Threshold::new("Pump On", 55.0).kind("High"),
            Threshold::new("Pump On", 40.0).kind("Low"),
            Threshold::new("Alarm Low", 10.0).kind("Low").alarm(),
        ]
    }

    #[test]
    fn test_positions_and_colors() {
        let index = ThresholdIndex::build(&reservoir(), &scale(), Color::BLACK);
        let positions: Vec<f64> = index.thresholds().iter().map(|t| t.position).collect();
        assert_close(&positions, &[-80.0, -10.0, 20.0, 80.0]);
        assert_eq!(index.thresholds()[0].color, Color::RED);
        assert_eq!(index.thresholds()[1].color, Color::BLACK);
        assert_eq!(index.thresholds()[3].color, Color::RED);
    }

    #[test]
    fn test_boundaries_are_midpoints() {
        let index = ThresholdIndex::build(&reservoir(), &scale(), Color::BLACK);
        assert_close(index.boundaries(), &[-45.0, 5.0, 50.0]);
    }

    #[test]
    fn test_input_order_preserved() {
        let unsorted = vec![
            Threshold::new("b", 40.0),
            Threshold::new("a", 90.0),
            Threshold::new("c", 10.0),
        ];
        let index = ThresholdIndex::build(&unsorted, &scale(), Color::BLACK);
        let names: Vec<&str> = index
            .thresholds()
            .iter()
            .map(|t| t.threshold.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_close(index.boundaries(), &[-30.0, 0.0]);
    }

    #[test]
    fn test_empty_and_single() {
        let empty = ThresholdIndex::build(&[], &scale(), Color::BLACK);
        assert!(empty.is_empty());
        assert!(empty.boundaries().is_empty());
        let single = ThresholdIndex::build(&[Threshold::new("x", 50.0)], &scale(), Color::BLACK);
        assert_eq!(single.len(), 1);
        assert!(single.boundaries().is_empty());
    }

    #[test]
    fn test_tooltip_lines() {
        let index = ThresholdIndex::build(&reservoir(), &scale(), Color::BLACK);
        assert_eq!(
            index.thresholds()[1].tooltip_lines(),
            [
                "Name: Pump On".to_string(),
                "Value: 55".to_string(),
                "Type: High".to_string()
            ]
        );
    }
}

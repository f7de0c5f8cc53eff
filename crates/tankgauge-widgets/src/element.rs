//! Scene elements and animated properties of a gauge.

use tankgauge_core::NodeId;

/// First node id used by per-threshold elements.
pub const THRESHOLD_NODE_BASE: u32 = 64;

/// Numeric readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Readout {
    /// Fill value
    Primary,
    /// Lookup-table value
    Lookup,
    /// Change-rate value
    ChangeRate,
}

impl Readout {
    /// All readouts, top to bottom.
    pub const ALL: [Self; 3] = [Self::Primary, Self::Lookup, Self::ChangeRate];

    /// Element drawn behind the water.
    #[must_use]
    pub const fn behind(self) -> Element {
        match self {
            Self::Primary => Element::BehindText,
            Self::Lookup => Element::LookupBehindText,
            Self::ChangeRate => Element::RateBehindText,
        }
    }

    /// Element drawn over the water.
    #[must_use]
    pub const fn overlay(self) -> Element {
        match self {
            Self::Primary => Element::OverlayText,
            Self::Lookup => Element::LookupOverlayText,
            Self::ChangeRate => Element::RateOverlayText,
        }
    }
}

/// A logical element of the gauge scene.
///
/// Variants are declared in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    /// Wave clip path
    WaveClip,
    /// Empty-tank background
    BackFill,
    /// Tank perimeter
    Border,
    /// Neck background (round)
    NeckBackFill,
    /// Primary readout behind the water
    BehindText,
    /// Arrow behind the water
    BehindArrow,
    /// Lookup readout behind the water
    LookupBehindText,
    /// Change-rate readout behind the water
    RateBehindText,
    /// Neck water (round)
    NeckFill,
    /// Water
    WaterFill,
    /// Primary readout over the water
    OverlayText,
    /// Arrow over the water
    OverlayArrow,
    /// Lookup readout over the water
    LookupOverlayText,
    /// Change-rate readout over the water
    RateOverlayText,
    /// Neck perimeter (round)
    NeckBorder,
    /// Support label background
    SupportLabelBackground,
    /// Bottom (or only) support label
    SupportLabel,
    /// Top support label
    TopSupportLabel,
    /// Max marker label
    TopMarkerLabel,
    /// Min marker label
    BottomMarkerLabel,
    /// Tick at the top edge (round)
    TopEdgeMarker,
    /// Tick at the bottom edge (round)
    BottomEdgeMarker,
    /// Vertical marker bar (round)
    MarkerBar,
    /// Threshold tick
    ThresholdMarker(usize),
    /// Threshold tooltip
    ThresholdTooltip(usize),
}

impl Element {
    /// Elements with a fixed node, in paint order.
    pub const FIXED: [Self; 23] = [
        Self::WaveClip,
        Self::BackFill,
        Self::Border,
        Self::NeckBackFill,
        Self::BehindText,
        Self::BehindArrow,
        Self::LookupBehindText,
        Self::RateBehindText,
        Self::NeckFill,
        Self::WaterFill,
        Self::OverlayText,
        Self::OverlayArrow,
        Self::LookupOverlayText,
        Self::RateOverlayText,
        Self::NeckBorder,
        Self::SupportLabelBackground,
        Self::SupportLabel,
        Self::TopSupportLabel,
        Self::TopMarkerLabel,
        Self::BottomMarkerLabel,
        Self::TopEdgeMarker,
        Self::BottomEdgeMarker,
        Self::MarkerBar,
    ];

    /// Scene node of this element.
    #[must_use]
    pub fn node_id(self) -> NodeId {
        match self {
            Self::ThresholdMarker(i) => NodeId(THRESHOLD_NODE_BASE + 2 * i as u32),
            Self::ThresholdTooltip(i) => NodeId(THRESHOLD_NODE_BASE + 2 * i as u32 + 1),
            fixed => NodeId(
                Self::FIXED
                    .iter()
                    .position(|e| *e == fixed)
                    .unwrap_or_default() as u32,
            ),
        }
    }
}

/// A gauge property driven by the transition engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    /// Horizontal wave scroll offset
    WaveScroll,
    /// Vertical fill offset
    FillLevel,
    /// Water colour
    FillColor,
    /// Support label border colour
    LabelStroke,
    /// Neck water colour
    NeckColor,
    /// Colour of readouts behind the water
    BackFont,
    /// Colour of readouts over the water
    FrontFont,
    /// Arrow colour behind the water
    BackArrow,
    /// Arrow colour over the water
    FrontArrow,
    /// Displayed number of a readout
    Readout(Readout),
    /// Threshold marker stroke width
    MarkerWidth(usize),
    /// Threshold marker tick start
    MarkerX1(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_nodes_follow_paint_order() {
        let ids: Vec<u32> = Element::FIXED.iter().map(|e| e.node_id().0).collect();
        assert_eq!(ids, (0..23).collect::<Vec<_>>());
        assert!(Element::WaveClip.node_id() < Element::WaterFill.node_id());
        assert!(Element::WaterFill.node_id() < Element::OverlayText.node_id());
    }

    #[test]
    fn test_threshold_nodes_interleave() {
        assert_eq!(Element::ThresholdMarker(0).node_id(), NodeId(64));
        assert_eq!(Element::ThresholdTooltip(0).node_id(), NodeId(65));
        assert_eq!(Element::ThresholdMarker(3).node_id(), NodeId(70));
        assert!(Element::MarkerBar.node_id() < Element::ThresholdMarker(0).node_id());
    }

    #[test]
    fn test_readout_elements() {
        assert_eq!(Readout::Lookup.behind(), Element::LookupBehindText);
        assert_eq!(Readout::ChangeRate.overlay(), Element::RateOverlayText);
    }
}

//! YAML manifest parser for tank gauges.

mod error;
mod manifest;

pub use error::ParseError;
pub use manifest::{
    ArrowSection, GaugeManifest, MarkerSection, ReadoutSection, SupportLabelSection, TankSection,
    TextSection, ThresholdEntry, TooltipSection, TransitionSection, WaveSection, ARROW_DIRECTIONS,
    EASING_NAMES,
};

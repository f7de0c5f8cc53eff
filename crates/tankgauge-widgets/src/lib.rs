//! Tank gauge geometry and animation engine.
//!
//! A [`TankGauge`] turns a [`GaugeConfig`] and a container size into a set
//! of draw commands, keeps them current as values change, and animates the
//! fill level, wave, colours and readouts on a host-driven frame clock.

pub mod config;
pub mod element;
pub mod error;
pub mod format;
pub mod gauge;
pub mod hover;
pub mod layout;
mod render;
pub mod scale;
pub mod threshold;
pub mod wave;

pub use config::{
    ArrowDirection, ArrowSpec, GaugeConfig, MarkerSpec, ReadoutSpec, Severity, SupportLabelSpec,
    TankSpec, TankVariant, TextSpec, Threshold, WaveSpec, MAX_DECIMAL,
};
pub use element::{Element, Property, Readout};
pub use error::{GaugeError, Result};
pub use format::ReadoutFormat;
pub use gauge::{ArrowUpdate, FillAttributes, GaugeState, SupportLabels, TankGauge};
pub use layout::{Layout, NeckCurve, ReadoutOffsets, RoundBody, SupportLabelBox};
pub use scale::LinearScale;
pub use threshold::{PlacedThreshold, ThresholdIndex};
pub use wave::WavePath;

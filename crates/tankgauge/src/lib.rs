//! Animated analog tank gauge.
//!
//! Tower and round tanks with a scrolling wave, threshold markers with hover
//! detail, a support label, a trend arrow and animated numeric readouts.
//!
//! The gauge draws into any [`Scene`]; [`RecordingScene`] keeps the latest
//! command per node and is what the tests use.
//!
//! ```
//! use tankgauge::{GaugeConfig, RecordingScene, Size, TankGauge};
//!
//! let config = GaugeConfig::default().with_unit("ft").with_value(55.0);
//! let mut gauge = TankGauge::new(config, Size::new(120.0, 300.0), RecordingScene::new())?;
//! gauge.tick(1000.0)?;
//! assert_eq!(gauge.displayed_text(tankgauge::Readout::Primary), "55.0 ft");
//! # Ok::<(), tankgauge::GaugeError>(())
//! ```

pub use tankgauge_core::*;
pub use tankgauge_widgets::*;
pub use tankgauge_yaml as yaml;

/// Build a gauge from a YAML manifest.
pub fn from_yaml<S: Scene>(yaml: &str, container: Size, scene: S) -> Result<TankGauge<S>> {
    TankGauge::from_yaml(yaml, container, scene)
}

//! Transition engine: easing curves and time-driven interpolation.
//!
//! A [`Transition`] is a pure function of the frame clock: it never
//! accumulates state between frames, so sampling the same instant twice
//! yields the same value. [`TransitionSet`] keys transitions by logical
//! property and applies the supersession rule: a new transition on a key
//! starts from the value last rendered for that key.

use crate::{Color, Point};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

// =============================================================================
// Easing Functions
// =============================================================================

/// Easing curves applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Quadratic ease in
    QuadIn,
    /// Quadratic ease out
    QuadOut,
    /// Quadratic ease in and out
    QuadInOut,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out
    CubicOut,
    /// Cubic ease in and out
    CubicInOut,
    /// Polynomial ease in with the given exponent
    PolyIn(i32),
    /// Polynomial ease out with the given exponent
    PolyOut(i32),
    /// Polynomial ease in and out with the given exponent
    PolyInOut(i32),
}

impl Easing {
    /// Easing used for gauge fill, colour and readout transitions.
    pub const GAUGE: Self = Self::PolyInOut(4);

    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => Self::ease_out_quad(t),
            Self::QuadInOut => Self::ease_in_out_quad(t),
            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicInOut => Self::ease_in_out_cubic(t),
            Self::PolyIn(e) => t.powi(e),
            Self::PolyOut(e) => 1.0 - (1.0 - t).powi(e),
            Self::PolyInOut(e) => Self::poly_in_out(t, e),
        }
    }

    fn ease_out_quad(t: f64) -> f64 {
        (1.0 - t).mul_add(-(1.0 - t), 1.0)
    }

    fn ease_in_out_quad(t: f64) -> f64 {
        if t < 0.5 {
            2.0 * t * t
        } else {
            1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
        }
    }

    fn ease_in_out_cubic(t: f64) -> f64 {
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
        }
    }

    fn poly_in_out(t: f64, e: i32) -> f64 {
        let t = t * 2.0;
        if t <= 1.0 {
            t.powi(e) / 2.0
        } else {
            (2.0 - (2.0 - t).powi(e)) / 2.0
        }
    }
}

// =============================================================================
// Interpolate Trait
// =============================================================================

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (to - from).mul_add(t, *from)
    }
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (*to - *from).mul_add(t as Self, *from)
    }
}

impl Interpolate for Point {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            x: f32::interpolate(&from.x, &to.x, t),
            y: f32::interpolate(&from.y, &to.y, t),
        }
    }
}

impl Interpolate for Color {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        from.lerp(to, t as f32)
    }
}

/// A value tagged with the way it animates.
///
/// `TextNumber` interpolates like `Number`; the tag tells the renderer to
/// format the sample as text on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TweenValue {
    /// Plain numeric property (offsets, widths, opacity)
    Number(f64),
    /// Colour property
    Color(Color),
    /// Number displayed as formatted text
    TextNumber(f64),
}

impl TweenValue {
    /// Numeric payload, if this is a number or text number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number(v) | Self::TextNumber(v) => Some(v),
            Self::Color(_) => None,
        }
    }

    /// Colour payload, if this is a colour.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match *self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl Interpolate for TweenValue {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        match (from, to) {
            (Self::Number(a), Self::Number(b)) => Self::Number(f64::interpolate(a, b, t)),
            (Self::TextNumber(a), Self::TextNumber(b)) => {
                Self::TextNumber(f64::interpolate(a, b, t))
            }
            (Self::Color(a), Self::Color(b)) => Self::Color(Color::interpolate(a, b, t)),
            // Mismatched kinds cannot blend; jump to the target.
            _ => *to,
        }
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Duration, delay and easing of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Duration in milliseconds
    pub duration_ms: f64,
    /// Delay before the transition starts moving, in milliseconds
    pub delay_ms: f64,
    /// Easing curve
    pub easing: Easing,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            delay_ms: 0.0,
            easing: Easing::GAUGE,
        }
    }
}

impl Timing {
    /// Create a timing with no delay and linear easing.
    #[must_use]
    pub const fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
            easing: Easing::Linear,
        }
    }

    /// A transition that lands on the next frame.
    #[must_use]
    pub const fn immediate() -> Self {
        Self::new(0.0)
    }

    /// Set the delay.
    #[must_use]
    pub const fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the easing.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Whether a transition stops at its target or restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Repeat {
    /// Run once and commit the target
    #[default]
    Once,
    /// Restart from the same endpoints forever
    Forever,
}

/// A bounded animation of one value.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    from: T,
    to: T,
    start_ms: f64,
    timing: Timing,
    repeat: Repeat,
}

impl<T: Interpolate + Clone> Transition<T> {
    /// Create a transition starting at `start_ms`.
    #[must_use]
    pub fn new(from: T, to: T, start_ms: f64, timing: Timing) -> Self {
        Self {
            from,
            to,
            start_ms,
            timing,
            repeat: Repeat::Once,
        }
    }

    /// Set the repeat mode.
    #[must_use]
    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Start value.
    #[must_use]
    pub fn from(&self) -> &T {
        &self.from
    }

    /// Target value.
    #[must_use]
    pub fn to(&self) -> &T {
        &self.to
    }

    /// Timing parameters.
    #[must_use]
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Linear progress at `now_ms`; looping transitions wrap into `[0, 1)`.
    #[must_use]
    pub fn raw_progress(&self, now_ms: f64) -> f64 {
        let elapsed = now_ms - self.start_ms - self.timing.delay_ms;
        if elapsed <= 0.0 {
            return 0.0;
        }
        if self.timing.duration_ms <= 0.0 {
            return 1.0;
        }
        match self.repeat {
            Repeat::Once => (elapsed / self.timing.duration_ms).min(1.0),
            Repeat::Forever => (elapsed % self.timing.duration_ms) / self.timing.duration_ms,
        }
    }

    /// Eased progress at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        self.timing.easing.apply(self.raw_progress(now_ms))
    }

    /// Value at `now_ms`. Exactly the target once a one-shot transition ends.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> T {
        if self.is_complete(now_ms) {
            return self.to.clone();
        }
        let raw = self.raw_progress(now_ms);
        if raw >= 1.0 {
            return self.to.clone();
        }
        if raw <= 0.0 {
            return self.from.clone();
        }
        T::interpolate(&self.from, &self.to, self.timing.easing.apply(raw))
    }

    /// Whether a one-shot transition has reached its target.
    #[must_use]
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.repeat == Repeat::Once
            && now_ms >= self.start_ms + self.timing.delay_ms + self.timing.duration_ms.max(0.0)
    }
}

// =============================================================================
// TransitionSet - keyed transitions with supersession
// =============================================================================

/// A value produced for one key by [`TransitionSet::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<K, T> {
    /// Property key
    pub key: K,
    /// Sampled value
    pub value: T,
    /// True on the frame that commits the target
    pub finished: bool,
}

/// Keyed transitions sharing one frame clock.
#[derive(Debug, Clone)]
pub struct TransitionSet<K, T> {
    active: BTreeMap<K, Transition<T>>,
    values: BTreeMap<K, T>,
    cancelled: bool,
}

impl<K, T> Default for TransitionSet<K, T> {
    fn default() -> Self {
        Self {
            active: BTreeMap::new(),
            values: BTreeMap::new(),
            cancelled: false,
        }
    }
}

impl<K: Ord + Clone + Debug, T: Interpolate + Clone> TransitionSet<K, T> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered or committed value for `key`.
    #[must_use]
    pub fn value(&self, key: &K) -> Option<&T> {
        self.values.get(key)
    }

    /// Set a value without animating, dropping any transition on `key`.
    pub fn set(&mut self, key: K, value: T) {
        self.active.remove(&key);
        self.values.insert(key, value);
    }

    /// Animate `key` to `to`, starting from the value last rendered for it.
    ///
    /// A key with no history starts at its target.
    pub fn start(&mut self, key: K, to: T, now_ms: f64, timing: Timing) {
        let from = self.values.get(&key).cloned().unwrap_or_else(|| to.clone());
        self.start_from(key, from, to, now_ms, timing);
    }

    /// Animate `key` from an explicit start value.
    pub fn start_from(&mut self, key: K, from: T, to: T, now_ms: f64, timing: Timing) {
        self.insert(key, Transition::new(from, to, now_ms, timing));
    }

    /// Loop `key` between two fixed endpoints until superseded or cancelled.
    pub fn start_looping(&mut self, key: K, from: T, to: T, now_ms: f64, timing: Timing) {
        self.insert(
            key,
            Transition::new(from, to, now_ms, timing).repeat(Repeat::Forever),
        );
    }

    fn insert(&mut self, key: K, transition: Transition<T>) {
        if self.cancelled {
            return;
        }
        if self.active.contains_key(&key) {
            trace!("superseding transition on {key:?}");
        }
        self.values.insert(key.clone(), transition.from().clone());
        self.active.insert(key, transition);
    }

    /// Stop `key` where it is by replacing it with a one-frame transition to
    /// its current value.
    pub fn freeze(&mut self, key: &K, now_ms: f64) {
        if let Some(current) = self.values.get(key).cloned() {
            if self.active.contains_key(key) {
                self.start_from(key.clone(), current.clone(), current, now_ms, Timing::immediate());
            }
        }
    }

    /// Stop every transition. Later starts are ignored until [`Self::reset`].
    pub fn cancel_all(&mut self) {
        self.cancelled = true;
        self.active.clear();
    }

    /// Whether [`Self::cancel_all`] was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Drop all transitions and values and accept new starts again.
    pub fn reset(&mut self) {
        self.cancelled = false;
        self.active.clear();
        self.values.clear();
    }

    /// Whether `key` has a running transition.
    #[must_use]
    pub fn is_animating(&self, key: &K) -> bool {
        self.active.contains_key(key)
    }

    /// Keys with a running transition, in key order.
    pub fn active_keys(&self) -> impl Iterator<Item = &K> {
        self.active.keys()
    }

    /// Number of running transitions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Advance every transition to `now_ms`.
    ///
    /// Completed one-shot transitions commit their exact target and are
    /// removed. Frames are returned in key order.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Frame<K, T>> {
        if self.cancelled {
            return Vec::new();
        }
        let mut frames = Vec::with_capacity(self.active.len());
        let mut finished = Vec::new();

        for (key, transition) in &self.active {
            let done = transition.is_complete(now_ms);
            let value = if done {
                transition.to().clone()
            } else {
                transition.sample(now_ms)
            };
            self.values.insert(key.clone(), value.clone());
            if done {
                trace!("transition on {key:?} committed");
                finished.push(key.clone());
            }
            frames.push(Frame {
                key: key.clone(),
                value,
                finished: done,
            });
        }

        for key in finished {
            self.active.remove(&key);
        }
        frames
    }
}

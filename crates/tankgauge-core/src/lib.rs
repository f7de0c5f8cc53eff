//! Core types and traits for the tank gauge engine.
//!
//! This crate provides foundational types used throughout tankgauge:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with hex and CSS-name parsing
//! - Draw commands: [`DrawCommand`], [`PathSegment`], [`Transform2D`]
//! - The transition engine: [`Easing`], [`Transition`], [`TransitionSet`]
//! - The scene sink: [`Scene`], [`TextMeasure`], [`RecordingScene`]
//! - Host input: [`Event`]

mod animation;
mod color;
pub mod draw;
mod event;
mod geometry;
mod scene;
mod text;

pub use animation::{
    Easing, Frame, Interpolate, Repeat, Timing, Transition, TransitionSet, TweenValue,
};
pub use color::{Color, ColorParseError};
pub use draw::{
    flatten_path, BoxStyle, DrawCommand, LineCap, PathSegment, StrokeStyle, Transform2D,
};
pub use event::Event;
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use scene::{NodeId, RecordingScene, Scene};
pub use text::{FontWeight, MonospaceMeasure, TextAnchor, TextMeasure, TextStyle};

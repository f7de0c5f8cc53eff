//! Scene-graph sink the gauge renders into.
//!
//! The engine owns a fixed set of logical elements and addresses each one by
//! a [`NodeId`]. Every write replaces the node's previous command wholesale;
//! a backend is free to diff consecutive commands.

use crate::draw::DrawCommand;
use crate::text::{MonospaceMeasure, TextMeasure, TextStyle};
use crate::Size;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Handle of one logical element in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A rendering backend.
///
/// Nodes are painted in ascending id order.
pub trait Scene: TextMeasure {
    /// Create or replace the command for `id`.
    fn set_node(&mut self, id: NodeId, command: DrawCommand);

    /// Remove every node.
    fn clear(&mut self);
}

impl<S: Scene + ?Sized> Scene for &mut S {
    fn set_node(&mut self, id: NodeId, command: DrawCommand) {
        (**self).set_node(id, command);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// A [`Scene`] that keeps the latest command per node.
///
/// This is useful for:
/// - Testing (inspect what the gauge drew)
/// - Snapshots (dump the scene to JSON)
#[derive(Debug, Default)]
pub struct RecordingScene {
    nodes: BTreeMap<NodeId, DrawCommand>,
    writes: usize,
    measure: MonospaceMeasure,
}

impl RecordingScene {
    /// Create a new empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom monospace metric for text measurement.
    #[must_use]
    pub fn with_measure(mut self, measure: MonospaceMeasure) -> Self {
        self.measure = measure;
        self
    }

    /// Command currently stored for `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&DrawCommand> {
        self.nodes.get(&id)
    }

    /// All nodes in paint order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &DrawCommand)> {
        self.nodes.iter().map(|(id, cmd)| (*id, cmd))
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of `set_node` calls since creation.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Serialize the scene to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.nodes)
    }
}

impl TextMeasure for RecordingScene {
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        self.measure.measure_text(text, style)
    }
}

impl Scene for RecordingScene {
    fn set_node(&mut self, id: NodeId, command: DrawCommand) {
        self.writes += 1;
        self.nodes.insert(id, command);
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Spatial registry: the live cache of screen geometry keyed by entity
//! identity, and its persistence encoding.
//!
//! During a session the registry is rebuilt every frame by the layout pass
//! and read by hit-testing; entries for destroyed ports are not pruned
//! eagerly, they simply stop resolving. Across sessions the port rects are
//! carried through [`PersistedLayout`], a pair of equal-length parallel
//! arrays — the encoding is kept flat so it survives serialization
//! substrates with no native map support.
//!
//! Restore is soft-fail by contract, not by accident:
//! - an entry whose port no longer resolves (node deleted, field renamed)
//!   is dropped silently;
//! - a length mismatch between the two arrays skips the restore entirely,
//!   leaving the registry empty. Neither case is an error.

use egui::{Pos2, Rect, Vec2};
use gridwire_graph::{Graph, NodeId, PortRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Live screen-geometry cache for one editor window.
///
/// Port rects are window-space connection-point rectangles; node sizes are
/// grid-unit extents measured by the host layout pass. Node sizes are never
/// persisted — they are remeasured on the first frame after a reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialRegistry {
    port_rects: IndexMap<PortRef, Rect>,
    node_sizes: IndexMap<NodeId, Vec2>,
}

impl SpatialRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the connection-point rect for a port
    pub fn set_port_rect(&mut self, port: PortRef, rect: Rect) {
        self.port_rects.insert(port, rect);
    }

    /// Last-known connection-point rect for a port
    pub fn port_rect(&self, port: &PortRef) -> Option<Rect> {
        self.port_rects.get(port).copied()
    }

    /// Record the measured size of a node
    pub fn set_node_size(&mut self, node: NodeId, size: Vec2) {
        self.node_sizes.insert(node, size);
    }

    /// Last measured size of a node. `None` means "not yet measured";
    /// callers skip size-dependent work for that frame.
    pub fn node_size(&self, node: NodeId) -> Option<Vec2> {
        self.node_sizes.get(&node).copied()
    }

    /// Number of cached port rects
    pub fn port_rect_count(&self) -> usize {
        self.port_rects.len()
    }

    /// Iterate cached port rects in registration order
    pub fn port_rects(&self) -> impl Iterator<Item = (&PortRef, Rect)> {
        self.port_rects.iter().map(|(k, v)| (k, *v))
    }

    /// Drop all cached geometry
    pub fn clear(&mut self) {
        self.port_rects.clear();
        self.node_sizes.clear();
    }

    /// Encode the port rects into the flat parallel-array layout. Iteration
    /// order is the registry's own, stable within the session.
    pub fn encode(&self) -> PersistedLayout {
        let mut references = Vec::with_capacity(self.port_rects.len());
        let mut rects = Vec::with_capacity(self.port_rects.len());
        for (port, rect) in &self.port_rects {
            references.push(PortDescriptor::from(port));
            rects.push(PersistedRect::from(*rect));
        }
        PersistedLayout { references, rects }
    }

    /// Rehydrate port rects from a persisted layout, resolving each
    /// descriptor against the graph.
    ///
    /// Descriptors that no longer resolve are dropped. If the two arrays
    /// disagree in length the whole restore is skipped and the registry is
    /// left empty, as if there were no prior state.
    pub fn restore(&mut self, layout: &PersistedLayout, graph: &Graph) {
        self.port_rects.clear();

        if layout.references.len() != layout.rects.len() {
            tracing::debug!(
                references = layout.references.len(),
                rects = layout.rects.len(),
                "persisted layout arrays disagree in length, skipping restore"
            );
            return;
        }

        for (descriptor, rect) in layout.references.iter().zip(&layout.rects) {
            let port = descriptor.to_port_ref();
            if graph.port(&port).is_some() {
                self.port_rects.insert(port, rect.to_rect());
            } else {
                tracing::trace!(?descriptor, "dropping unresolvable layout entry");
            }
        }
    }
}

/// Identity descriptor for one persisted port rect: the owning node plus
/// the port's field name, resolved by name on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDescriptor {
    /// Owning node
    pub node: NodeId,
    /// Port field name on that node
    pub field: String,
}

impl PortDescriptor {
    fn to_port_ref(&self) -> PortRef {
        PortRef::new(self.node, self.field.clone())
    }
}

impl From<&PortRef> for PortDescriptor {
    fn from(port: &PortRef) -> Self {
        Self {
            node: port.node,
            field: port.port.clone(),
        }
    }
}

/// Serializable rectangle (window space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedRect {
    /// Top-left corner
    pub min: [f32; 2],
    /// Width and height
    pub size: [f32; 2],
}

impl PersistedRect {
    fn to_rect(self) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.min[0], self.min[1]),
            Vec2::new(self.size[0], self.size[1]),
        )
    }
}

impl From<Rect> for PersistedRect {
    fn from(rect: Rect) -> Self {
        Self {
            min: [rect.min.x, rect.min.y],
            size: [rect.width(), rect.height()],
        }
    }
}

/// Flat, order-correlated encoding of the port-rect cache: two arrays that
/// must be of equal length, stored among the window's own serialized fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedLayout {
    /// Identity descriptors, parallel to `rects`
    pub references: Vec<PortDescriptor>,
    /// Rect values, parallel to `references`
    pub rects: Vec<PersistedRect>,
}

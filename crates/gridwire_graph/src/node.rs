// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph model.

use crate::port::{Port, PortDirection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a node is, beyond its ports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// An ordinary node
    Plain,
    /// A group: a resizable region that visually contains other nodes.
    /// Width and height are in grid units, measured from the node position.
    Group {
        /// Region width in grid units
        width: f32,
        /// Region height in grid units (excluding the header)
        height: f32,
    },
}

impl NodeKind {
    /// The tag used for interaction-handler dispatch
    pub fn tag(&self) -> NodeKindTag {
        match self {
            Self::Plain => NodeKindTag::Plain,
            Self::Group { .. } => NodeKindTag::Group,
        }
    }
}

/// Discriminant-only view of [`NodeKind`], usable as a registry key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKindTag {
    /// An ordinary node
    Plain,
    /// A group region
    Group,
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name (can be customized)
    pub name: String,
    /// Position in grid space (top-left corner, header included)
    pub position: [f32; 2],
    /// Node kind
    pub kind: NodeKind,
    /// Ports, resolved by name
    pub ports: Vec<Port>,
}

impl Node {
    /// Create a new plain node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            position: [0.0, 0.0],
            kind: NodeKind::Plain,
            ports: Vec::new(),
        }
    }

    /// Create a new group node with the given region size
    pub fn group(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            kind: NodeKind::Group { width, height },
            ..Self::new(name)
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Add a port
    pub fn with_port(mut self, name: impl Into<String>, direction: PortDirection) -> Self {
        self.ports.push(Port::new(name, direction));
        self
    }

    /// Resolve a port by name
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Resolve a port by name, mutably
    pub fn port_mut(&mut self, name: &str) -> Option<&mut Port> {
        self.ports.iter_mut().find(|p| p.name == name)
    }

    /// Region size for group nodes, `None` for plain nodes
    pub fn group_size(&self) -> Option<[f32; 2]> {
        match self.kind {
            NodeKind::Group { width, height } => Some([width, height]),
            NodeKind::Plain => None,
        }
    }

    /// Set the region size of a group node. No-op for plain nodes.
    pub fn set_group_size(&mut self, new_width: f32, new_height: f32) {
        if let NodeKind::Group { width, height } = &mut self.kind {
            *width = new_width;
            *height = new_height;
        }
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions. Ports are identified by `(node, name)`, never by a
//! separate ID: the persistence layer resolves them by name after a reload,
//! and a renamed or deleted field simply fails to resolve.

use crate::connection::Connection;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Identity of a port: the owning node plus the port's field name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    /// Owning node
    pub node: NodeId,
    /// Port name on that node
    pub port: String,
}

impl PortRef {
    /// Create a port reference
    pub fn new(node: NodeId, port: impl Into<String>) -> Self {
        Self {
            node,
            port: port.into(),
        }
    }
}

/// A port on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Port name, unique within the owning node
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Connections originating here, in creation order. Only output ports
    /// own connections; the `(connection index, point index)` pair addresses
    /// individual reroute waypoints.
    pub connections: Vec<Connection>,
}

impl Port {
    /// Create a new port with no connections
    pub fn new(name: impl Into<String>, direction: PortDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            connections: Vec::new(),
        }
    }

    /// Whether this is an output port
    pub fn is_output(&self) -> bool {
        self.direction == PortDirection::Output
    }

    /// Get a connection by index
    pub fn connection(&self, index: usize) -> Option<&Connection> {
        self.connections.get(index)
    }

    /// Number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

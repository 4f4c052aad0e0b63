// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and their connections.

use crate::connection::Connection;
use crate::node::{Node, NodeId, NodeKind};
use crate::port::{Port, PortRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph.
///
/// Node order is editor-visible state: the node at index 0 is drawn and
/// hit-tested beneath every other node, which is how group regions stay in
/// the background. All removal paths preserve the order of the remaining
/// nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in draw order
    nodes: IndexMap<NodeId, Node>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node, pruning connections from other nodes that target it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let removed = self.nodes.shift_remove(&node_id)?;
        for node in self.nodes.values_mut() {
            for port in &mut node.ports {
                port.connections.retain(|c| c.target.node != node_id);
            }
        }
        Some(removed)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes in draw order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs in draw order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Position of a node in the draw order
    pub fn index_of(&self, node_id: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&node_id)
    }

    /// Move a node to index 0 so it draws and hit-tests beneath the rest.
    /// The relative order of all other nodes is preserved.
    pub fn move_node_to_front(&mut self, node_id: NodeId) {
        if let Some(index) = self.nodes.get_index_of(&node_id) {
            if index != 0 {
                self.nodes.move_index(index, 0);
            }
        }
    }

    /// Resolve a port reference
    pub fn port(&self, port_ref: &PortRef) -> Option<&Port> {
        self.nodes.get(&port_ref.node)?.port(&port_ref.port)
    }

    /// Resolve a port reference, mutably
    pub fn port_mut(&mut self, port_ref: &PortRef) -> Option<&mut Port> {
        self.nodes.get_mut(&port_ref.node)?.port_mut(&port_ref.port)
    }

    /// Connect an output port to an input port
    pub fn connect(&mut self, from: PortRef, to: PortRef) -> Result<(), ConnectionError> {
        if from.node == to.node {
            return Err(ConnectionError::SelfLoop);
        }

        let target_node = self
            .nodes
            .get(&to.node)
            .ok_or(ConnectionError::NodeNotFound(to.node))?;
        let target_port = target_node
            .port(&to.port)
            .ok_or_else(|| ConnectionError::PortNotFound(to.port.clone()))?;
        if target_port.is_output() {
            return Err(ConnectionError::DirectionMismatch);
        }

        let source_node = self
            .nodes
            .get_mut(&from.node)
            .ok_or(ConnectionError::NodeNotFound(from.node))?;
        let source_port = source_node
            .port_mut(&from.port)
            .ok_or_else(|| ConnectionError::PortNotFound(from.port.clone()))?;
        if !source_port.is_output() {
            return Err(ConnectionError::DirectionMismatch);
        }

        source_port.connections.push(Connection::new(to));
        Ok(())
    }

    /// Remove a connection by its index on the source port
    pub fn disconnect(&mut self, from: &PortRef, index: usize) -> Option<Connection> {
        let port = self.port_mut(from)?;
        if index < port.connections.len() {
            Some(port.connections.remove(index))
        } else {
            None
        }
    }

    /// Nodes whose grid position lies inside the given group's region.
    /// The group itself is excluded. Returns an empty list when the ID does
    /// not name a group node.
    pub fn nodes_in_group(&self, group_id: NodeId) -> Vec<NodeId> {
        let Some(group) = self.nodes.get(&group_id) else {
            return Vec::new();
        };
        let NodeKind::Group { width, height } = group.kind else {
            return Vec::new();
        };
        let [gx, gy] = group.position;

        self.nodes
            .values()
            .filter(|n| n.id != group_id)
            .filter(|n| {
                let [x, y] = n.position;
                x >= gx && y >= gy && x <= gx + width && y <= gy + height
            })
            .map(|n| n.id)
            .collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found on the node
    #[error("Port not found: {0}")]
    PortNotFound(String),

    /// Source must be an output, target an input
    #[error("Connection direction mismatch")]
    DirectionMismatch,

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}

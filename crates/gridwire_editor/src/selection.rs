// SPDX-License-Identifier: MIT OR Apache-2.0
//! Multi-object selection over nodes and reroute waypoints, plus the
//! drag-offset bookkeeping that keeps group drags coherent.

use egui::{Pos2, Vec2};
use gridwire_graph::{Graph, NodeId, PortRef};
use indexmap::IndexSet;

/// Identity of a single reroute waypoint: the owning output port, the
/// connection index on that port, and the point index on that connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RerouteReference {
    /// Owning output port
    pub port: PortRef,
    /// Connection index on the port
    pub connection_index: usize,
    /// Waypoint index on the connection
    pub point_index: usize,
}

impl RerouteReference {
    /// Create a reroute reference
    pub fn new(port: PortRef, connection_index: usize, point_index: usize) -> Self {
        Self {
            port,
            connection_index,
            point_index,
        }
    }
}

/// The set of currently selected graph objects: nodes (groups included) and
/// individual reroute waypoints. Order is irrelevant; both sets dedupe.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    nodes: IndexSet<NodeId>,
    reroutes: IndexSet<RerouteReference>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a node. With `add` the node joins the existing selection;
    /// without, it replaces the whole selection (reroutes included).
    pub fn select_node(&mut self, node: NodeId, add: bool) {
        if !add {
            self.clear();
        }
        self.nodes.insert(node);
    }

    /// Remove a single node from the selection
    pub fn deselect_node(&mut self, node: NodeId) {
        self.nodes.shift_remove(&node);
    }

    /// Whether a node is selected
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Add a reroute waypoint to the selection, deduplicated
    pub fn select_reroute(&mut self, reroute: RerouteReference) {
        self.reroutes.insert(reroute);
    }

    /// Remove a single reroute waypoint from the selection
    pub fn deselect_reroute(&mut self, reroute: &RerouteReference) {
        self.reroutes.shift_remove(reroute);
    }

    /// Whether a reroute waypoint is selected
    pub fn contains_reroute(&self, reroute: &RerouteReference) -> bool {
        self.reroutes.contains(reroute)
    }

    /// Selected nodes
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Selected reroute waypoints
    pub fn reroutes(&self) -> impl Iterator<Item = &RerouteReference> {
        self.reroutes.iter()
    }

    /// Number of selected nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of selected reroute waypoints
    pub fn reroute_count(&self) -> usize {
        self.reroutes.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.reroutes.is_empty()
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.reroutes.clear();
    }
}

/// Offsets captured at drag-start for a group and the nodes it contains.
///
/// Containment is resolved once, at capture time, by the graph's region
/// query; replaying the offsets on every drag-move translates the whole
/// group coherently without per-frame recomputation drift.
#[derive(Debug, Clone, Default)]
pub struct GroupDrag {
    offsets: Vec<(NodeId, Vec2)>,
}

impl GroupDrag {
    /// Capture offsets from the pointer to the group node and every node
    /// currently inside its region.
    pub fn capture(graph: &Graph, group: NodeId, pointer_grid: Pos2) -> Self {
        let mut ids = vec![group];
        ids.extend(graph.nodes_in_group(group));

        let offsets = ids
            .into_iter()
            .filter_map(|id| {
                let node = graph.node(id)?;
                let pos = Pos2::new(node.position[0], node.position[1]);
                Some((id, pos - pointer_grid))
            })
            .collect();
        Self { offsets }
    }

    /// Replay the captured offsets against the current pointer position
    pub fn apply(&self, graph: &mut Graph, pointer_grid: Pos2) {
        for (id, offset) in &self.offsets {
            if let Some(node) = graph.node_mut(*id) {
                let pos = pointer_grid + *offset;
                node.position = [pos.x, pos.y];
            }
        }
    }

    /// Whether anything was captured
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Drop the captured offsets
    pub fn clear(&mut self) {
        self.offsets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use gridwire_graph::Node;

    #[test]
    fn test_select_without_add_replaces_selection() {
        let mut selection = SelectionSet::new();
        let first = NodeId::new();
        let second = NodeId::new();

        selection.select_node(first, false);
        selection.select_reroute(RerouteReference::new(PortRef::new(first, "out"), 0, 0));
        selection.select_node(second, false);

        assert_eq!(selection.node_count(), 1);
        assert!(selection.contains_node(second));
        assert!(!selection.contains_node(first));
        assert_eq!(selection.reroute_count(), 0);
    }

    #[test]
    fn test_select_with_add_appends() {
        let mut selection = SelectionSet::new();
        let first = NodeId::new();
        let second = NodeId::new();

        selection.select_node(first, false);
        selection.select_node(second, true);
        assert_eq!(selection.node_count(), 2);

        selection.deselect_node(first);
        assert_eq!(selection.node_count(), 1);
        assert!(selection.contains_node(second));
    }

    #[test]
    fn test_reroute_selection_dedupes() {
        let mut selection = SelectionSet::new();
        let port = PortRef::new(NodeId::new(), "out");
        let reroute = RerouteReference::new(port.clone(), 0, 2);

        selection.select_reroute(reroute.clone());
        selection.select_reroute(reroute.clone());
        assert_eq!(selection.reroute_count(), 1);

        // Same port, different point, is a distinct entry
        selection.select_reroute(RerouteReference::new(port, 0, 3));
        assert_eq!(selection.reroute_count(), 2);

        selection.deselect_reroute(&reroute);
        assert_eq!(selection.reroute_count(), 1);
    }

    #[test]
    fn test_group_drag_replays_offsets_without_drift() {
        let mut graph = Graph::new("test");
        let group = graph.add_node(Node::group("region", 300.0, 150.0).with_position(0.0, 0.0));
        let inside = graph.add_node(Node::new("inside").with_position(50.0, 80.0));
        let outside = graph.add_node(Node::new("outside").with_position(400.0, 80.0));

        let drag = GroupDrag::capture(&graph, group, pos2(10.0, 10.0));
        assert!(!drag.is_empty());

        drag.apply(&mut graph, pos2(110.0, 10.0));
        assert_eq!(graph.node(group).unwrap().position, [100.0, 0.0]);
        assert_eq!(graph.node(inside).unwrap().position, [150.0, 80.0]);
        assert_eq!(graph.node(outside).unwrap().position, [400.0, 80.0]);

        // Replaying at the same pointer position is stable
        drag.apply(&mut graph, pos2(110.0, 10.0));
        assert_eq!(graph.node(inside).unwrap().position, [150.0, 80.0]);
    }
}

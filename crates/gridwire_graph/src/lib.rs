// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph data model for the Gridwire editor.
//!
//! This crate is the graph data source consumed by `gridwire_editor`:
//! - Ordered node storage (ordering is visible editor state: index 0 renders
//!   and hit-tests beneath everything else)
//! - Group nodes with an explicit width/height region
//! - Ports resolved by name on their owning node
//! - Connections owned by their output port, each carrying an ordered list
//!   of reroute waypoints in grid space

pub mod connection;
pub mod graph;
pub mod node;
pub mod port;

pub use connection::Connection;
pub use graph::{ConnectionError, Graph};
pub use node::{Node, NodeId, NodeKind, NodeKindTag};
pub use port::{Port, PortDirection, PortRef};

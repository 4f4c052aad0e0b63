// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions.

use crate::port::PortRef;
use serde::{Deserialize, Serialize};

/// A connection from an output port to an input port, carrying an ordered
/// sequence of user-placed reroute waypoints in grid space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Target input port
    pub target: PortRef,
    /// Reroute waypoints, in order from source to target
    pub reroutes: Vec<[f32; 2]>,
}

impl Connection {
    /// Create a new connection with no reroute points
    pub fn new(target: PortRef) -> Self {
        Self {
            target,
            reroutes: Vec::new(),
        }
    }

    /// Append a reroute waypoint
    pub fn add_reroute(&mut self, point: [f32; 2]) {
        self.reroutes.push(point);
    }

    /// Get a reroute waypoint by index
    pub fn reroute(&self, index: usize) -> Option<[f32; 2]> {
        self.reroutes.get(index).copied()
    }
}

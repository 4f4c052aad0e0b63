// SPDX-License-Identifier: MIT OR Apache-2.0
//! Hit-test and interaction engine.
//!
//! Raw pointer events are resolved against the spatial registry and the
//! view transform into editing decisions. Each interactive region owns a
//! small state machine; the only region kind today is the resizable group.
//! Handlers are instantiated through an [`InteractionRegistry`] keyed by
//! node kind, resolved once when a graph is opened.
//!
//! Everything here is soft-fail: a region whose node is gone, or whose size
//! has not been measured yet, skips its size-dependent work for the frame.

use crate::host::HostEditor;
use crate::selection::{GroupDrag, RerouteReference, SelectionSet};
use crate::settings::EditorSettings;
use crate::spatial::SpatialRegistry;
use crate::view::ViewState;
use egui::{CursorIcon, PointerButton, Pos2, Rect, Vec2};
use gridwire_graph::{Graph, NodeId, NodeKind, NodeKindTag, PortRef};
use indexmap::IndexMap;

/// Side length of the square resize handle, in grid units
pub const RESIZE_HANDLE_SIZE: f32 = 30.0;
/// Inset of the resize handle from the region's bottom-right corner
pub const RESIZE_HANDLE_PADDING: f32 = 4.0;
/// Group width floor, in grid units
pub const MIN_GROUP_WIDTH: f32 = 200.0;
/// Group height floor, in grid units
pub const MIN_GROUP_HEIGHT: f32 = 100.0;
/// Height of the group header band above the region body, in grid units
pub const GROUP_HEADER_HEIGHT: f32 = 48.0;
/// Drawn size of the resize corner icon
const CORNER_ICON_SIZE: f32 = 24.0;

/// What a pointer did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Pointer moved with no button held
    Moved,
    /// A button went down
    Pressed,
    /// Pointer moved with a button held
    Dragged,
    /// The button went up
    Released,
}

/// One pointer event, already mapped to grid space by the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened
    pub kind: PointerEventKind,
    /// Pointer position in grid space
    pub grid_position: Pos2,
    /// Button involved (meaningful for presses)
    pub button: PointerButton,
    /// Consecutive-click count at press time
    pub click_count: u32,
}

impl PointerEvent {
    /// A hover move
    pub fn moved(grid_position: Pos2) -> Self {
        Self {
            kind: PointerEventKind::Moved,
            grid_position,
            button: PointerButton::Primary,
            click_count: 0,
        }
    }

    /// A button press
    pub fn pressed(grid_position: Pos2, button: PointerButton, click_count: u32) -> Self {
        Self {
            kind: PointerEventKind::Pressed,
            grid_position,
            button,
            click_count,
        }
    }

    /// A drag move with the primary button held
    pub fn dragged(grid_position: Pos2) -> Self {
        Self {
            kind: PointerEventKind::Dragged,
            grid_position,
            button: PointerButton::Primary,
            click_count: 0,
        }
    }

    /// A primary button release
    pub fn released(grid_position: Pos2) -> Self {
        Self {
            kind: PointerEventKind::Released,
            grid_position,
            button: PointerButton::Primary,
            click_count: 0,
        }
    }
}

/// Per-region interaction handler.
pub trait RegionInteraction {
    /// The graph node backing this region
    fn node(&self) -> NodeId;

    /// Feed one pointer event through the region's state machine
    fn pointer_event(
        &mut self,
        event: &PointerEvent,
        graph: &mut Graph,
        spatial: &SpatialRegistry,
        selection: &mut SelectionSet,
        host: &mut dyn HostEditor,
    );

    /// Per-frame redraw hook: ordering invariants, cursor rects, overlays
    fn on_redraw(
        &mut self,
        graph: &mut Graph,
        spatial: &SpatialRegistry,
        view: &ViewState,
        settings: &EditorSettings,
        host: &mut dyn HostEditor,
    );
}

/// Factory producing a handler for one node
pub type HandlerFactory = fn(NodeId) -> Box<dyn RegionInteraction>;

/// Maps node kinds to interaction handlers.
///
/// Resolution happens once per graph open: the window walks the node list
/// and instantiates a handler for every node whose kind is registered.
pub struct InteractionRegistry {
    factories: IndexMap<NodeKindTag, HandlerFactory>,
}

impl InteractionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Registry with the built-in handlers: groups get [`GroupInteraction`]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NodeKindTag::Group, |node| {
            Box::new(GroupInteraction::new(node))
        });
        registry
    }

    /// Register a handler factory for a node kind
    pub fn register(&mut self, tag: NodeKindTag, factory: HandlerFactory) {
        self.factories.insert(tag, factory);
    }

    /// Instantiate handlers for every matching node in the graph
    pub fn handlers_for(&self, graph: &Graph) -> Vec<Box<dyn RegionInteraction>> {
        graph
            .nodes()
            .filter_map(|node| {
                let factory = self.factories.get(&node.kind.tag())?;
                Some(factory(node.id))
            })
            .collect()
    }
}

impl Default for InteractionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Interaction state machine for one resizable group region.
///
/// Idle ↔ Resizing, driven by primary-button events against the handle
/// rectangle near the region's bottom-right corner. Pointer positions are
/// converted to node-local grid units before hit-testing, so handle
/// geometry and size floors share one unit system.
pub struct GroupInteraction {
    node: NodeId,
    resizing: bool,
    hovering: bool,
    drag_offset: Vec2,
    drag: GroupDrag,
}

impl GroupInteraction {
    /// Create an idle handler for a group node
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            resizing: false,
            hovering: false,
            drag_offset: Vec2::ZERO,
            drag: GroupDrag::default(),
        }
    }

    /// Whether a resize drag is in progress
    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    /// Whether the pointer is over the resize handle
    pub fn is_hovering_handle(&self) -> bool {
        self.hovering
    }

    /// Resize handle rect in node-local grid units
    fn handle_rect(size: Vec2) -> Rect {
        let inset = RESIZE_HANDLE_SIZE + RESIZE_HANDLE_PADDING;
        Rect::from_min_size(
            Pos2::new(size.x - inset, size.y - inset),
            Vec2::splat(RESIZE_HANDLE_SIZE),
        )
    }

    /// On release of a selected group: pull everything inside the region
    /// into the selection — contained nodes, and every reroute waypoint in
    /// the graph whose grid position falls inside the region's bounding box
    /// (header band included). Already-selected entries dedupe.
    fn sweep_contents_into_selection(&self, graph: &Graph, selection: &mut SelectionSet) {
        let Some(group) = graph.node(self.node) else {
            return;
        };
        let NodeKind::Group { width, height } = group.kind else {
            return;
        };
        let [gx, gy] = group.position;

        for id in graph.nodes_in_group(self.node) {
            selection.select_node(id, true);
        }

        for node in graph.nodes() {
            for port in &node.ports {
                for (connection_index, connection) in port.connections.iter().enumerate() {
                    for (point_index, point) in connection.reroutes.iter().enumerate() {
                        let [x, y] = *point;
                        if x < gx || y < gy {
                            continue;
                        }
                        if x > gx + width || y > gy + height + GROUP_HEADER_HEIGHT {
                            continue;
                        }
                        selection.select_reroute(RerouteReference::new(
                            PortRef::new(node.id, port.name.clone()),
                            connection_index,
                            point_index,
                        ));
                    }
                }
            }
        }
    }
}

impl RegionInteraction for GroupInteraction {
    fn node(&self) -> NodeId {
        self.node
    }

    fn pointer_event(
        &mut self,
        event: &PointerEvent,
        graph: &mut Graph,
        spatial: &SpatialRegistry,
        selection: &mut SelectionSet,
        host: &mut dyn HostEditor,
    ) {
        // Only primary-button interactions participate
        if event.button != PointerButton::Primary {
            return;
        }

        let Some(node) = graph.node(self.node) else {
            return;
        };
        let node_pos = Pos2::new(node.position[0], node.position[1]);
        let local = event.grid_position - node_pos.to_vec2();

        match event.kind {
            PointerEventKind::Moved => {
                // Continuous hover check; repaint only on the transition
                if let Some(size) = spatial.node_size(self.node) {
                    let was_hovering = self.hovering;
                    self.hovering = Self::handle_rect(size).contains(local);
                    if was_hovering != self.hovering {
                        host.request_repaint();
                    }
                }
            }
            PointerEventKind::Pressed => {
                let Some(size) = spatial.node_size(self.node) else {
                    return;
                };
                if !Rect::from_min_size(Pos2::ZERO, size).contains(local) {
                    return;
                }

                // Capture drag offsets for the group and its contents up
                // front; they are only replayed if this turns into a drag.
                self.drag = GroupDrag::capture(graph, self.node, event.grid_position);

                let handle = Self::handle_rect(size);
                if handle.contains(local) {
                    self.resizing = true;
                    self.drag_offset = handle.min - local;
                    tracing::trace!(node = ?self.node, "group resize started");
                }
            }
            PointerEventKind::Dragged => {
                if self.resizing {
                    let inset = RESIZE_HANDLE_SIZE + RESIZE_HANDLE_PADDING;
                    let width = (local.x + self.drag_offset.x + inset).max(MIN_GROUP_WIDTH);
                    // The header band is not part of the region body, but
                    // the pointer is measured from the node's top-left, so
                    // the height compensates for it. Without this the region
                    // jumps vertically at resize start.
                    let height = (local.y + self.drag_offset.y - (GROUP_HEADER_HEIGHT - inset))
                        .max(MIN_GROUP_HEIGHT);
                    if let Some(node) = graph.node_mut(self.node) {
                        node.set_group_size(width, height);
                    }
                    host.request_repaint();
                } else if !self.drag.is_empty() {
                    self.drag.apply(graph, event.grid_position);
                    host.request_repaint();
                }
            }
            PointerEventKind::Released => {
                if self.resizing {
                    tracing::trace!(node = ?self.node, "group resize finished");
                }
                self.resizing = false;
                self.drag.clear();
                if selection.contains_node(self.node) {
                    self.sweep_contents_into_selection(graph, selection);
                }
            }
        }
    }

    fn on_redraw(
        &mut self,
        graph: &mut Graph,
        spatial: &SpatialRegistry,
        view: &ViewState,
        settings: &EditorSettings,
        host: &mut dyn HostEditor,
    ) {
        // Groups render and hit-test beneath everything else; enforced on
        // every redraw, not just at creation.
        if graph.index_of(self.node) != Some(0) {
            graph.move_node_to_front(self.node);
        }

        let Some(node) = graph.node(self.node) else {
            return;
        };
        let Some(size) = spatial.node_size(self.node) else {
            return;
        };

        let node_pos = Pos2::new(node.position[0], node.position[1]);
        let inset = RESIZE_HANDLE_SIZE + RESIZE_HANDLE_PADDING;

        let handle = Rect::from_min_size(node_pos, Vec2::splat(RESIZE_HANDLE_SIZE))
            .translate(size - Vec2::splat(inset));
        host.add_cursor_rect(view.grid_to_window_rect(handle), CursorIcon::ResizeNwSe);

        let icon = Rect::from_min_size(
            Pos2::new(size.x - inset, size.y - inset),
            Vec2::splat(CORNER_ICON_SIZE),
        );
        host.draw_corner_icon(icon, settings.resize_icon_color(self.hovering));
    }
}

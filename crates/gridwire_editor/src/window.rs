// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor window: owns one open graph plus all per-window editor state, and
//! exposes the lifecycle hooks the host editor drives.
//!
//! The persistence round-trip runs through the enable/disable hooks: the
//! spatial registry is flattened into [`PersistedLayout`] when the window is
//! disabled (just before the host serializes it) and rehydrated against the
//! graph when the window is enabled again.

use crate::host::HostEditor;
use crate::interaction::{
    InteractionRegistry, PointerEvent, PointerEventKind, RegionInteraction, GROUP_HEADER_HEIGHT,
};
use crate::selection::SelectionSet;
use crate::settings::EditorSettings;
use crate::spatial::{PersistedLayout, SpatialRegistry};
use crate::view::ViewState;
use egui::{PointerButton, Pos2};
use gridwire_graph::{Graph, NodeId, NodeKind};

/// One open node-graph editor window.
pub struct EditorWindow {
    graph: Graph,
    /// Pan/zoom state
    pub view: ViewState,
    /// Live screen-geometry cache
    pub spatial: SpatialRegistry,
    /// Current selection
    pub selection: SelectionSet,
    settings: EditorSettings,
    registry: InteractionRegistry,
    handlers: Vec<Box<dyn RegionInteraction>>,
    persisted: PersistedLayout,
    renaming: Option<NodeId>,
}

impl EditorWindow {
    /// Create a window with no graph open, using the built-in handler
    /// registry
    pub fn new(settings: EditorSettings) -> Self {
        Self::with_registry(settings, InteractionRegistry::with_defaults())
    }

    /// Create a window with a custom interaction registry
    pub fn with_registry(settings: EditorSettings, registry: InteractionRegistry) -> Self {
        let view = ViewState::new(&settings);
        Self {
            graph: Graph::default(),
            view,
            spatial: SpatialRegistry::new(),
            selection: SelectionSet::new(),
            settings,
            registry,
            handlers: Vec::new(),
            persisted: PersistedLayout::default(),
            renaming: None,
        }
    }

    /// Open a graph in this window. Interaction handlers are resolved once,
    /// here, from the registry.
    pub fn open(&mut self, graph: Graph) {
        tracing::debug!(graph = %graph.name, nodes = graph.node_count(), "opening graph");
        self.handlers = self.registry.handlers_for(&graph);
        self.graph = graph;
        self.spatial.clear();
        self.selection.clear();
        self.renaming = None;
    }

    /// The open graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The open graph, mutably
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// The editor settings this window was created with
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// The persisted layout captured by the last [`Self::on_disable`],
    /// for the host to store among the window's serialized fields
    pub fn persisted_layout(&self) -> &PersistedLayout {
        &self.persisted
    }

    /// Install a persisted layout deserialized by the host, to be applied
    /// on the next [`Self::on_enable`]
    pub fn set_persisted_layout(&mut self, layout: PersistedLayout) {
        self.persisted = layout;
    }

    /// Window enable hook: rehydrate the spatial registry, dropping entries
    /// whose ports no longer resolve
    pub fn on_enable(&mut self) {
        self.spatial.restore(&self.persisted, &self.graph);
    }

    /// Window disable hook: flatten the spatial registry before the host
    /// serializes this window
    pub fn on_disable(&mut self) {
        self.persisted = self.spatial.encode();
    }

    /// Window focus hook
    pub fn on_focus(&mut self, host: &mut dyn HostEditor) {
        if self.settings.auto_save {
            host.save_assets();
        }
    }

    /// Mark the open graph modified, saving immediately when autosave is on
    pub fn save(&mut self, host: &mut dyn HostEditor) {
        host.mark_dirty();
        if self.settings.auto_save {
            host.save_assets();
        }
    }

    /// Feed one window-space pointer event through the engine.
    ///
    /// A primary double-click on a group header starts a rename instead of
    /// reaching the interaction handlers.
    pub fn pointer_event(
        &mut self,
        kind: PointerEventKind,
        window_pos: Pos2,
        button: PointerButton,
        click_count: u32,
        host: &mut dyn HostEditor,
    ) {
        let grid = self.view.window_to_grid(window_pos);

        if kind == PointerEventKind::Pressed
            && button == PointerButton::Primary
            && click_count == 2
        {
            if let Some(group) = self.group_header_at(grid) {
                self.renaming = Some(group);
                host.request_repaint();
                return;
            }
        }

        let event = PointerEvent {
            kind,
            grid_position: grid,
            button,
            click_count,
        };
        for handler in &mut self.handlers {
            handler.pointer_event(
                &event,
                &mut self.graph,
                &self.spatial,
                &mut self.selection,
                host,
            );
        }
    }

    /// Per-frame draw callback: runs every region's redraw hook (ordering
    /// invariants, cursor rects, overlays). Node sizes are expected to have
    /// been measured into the spatial registry by the host layout pass.
    pub fn draw(&mut self, host: &mut dyn HostEditor) {
        for handler in &mut self.handlers {
            handler.on_redraw(
                &mut self.graph,
                &self.spatial,
                &self.view,
                &self.settings,
                host,
            );
        }
    }

    /// Node currently being renamed, if any
    pub fn renaming(&self) -> Option<NodeId> {
        self.renaming
    }

    /// Commit a pending rename. Empty or whitespace-only input reverts to
    /// the existing name instead of applying; a real rename records an undo
    /// step and marks the asset dirty. Returns whether the name changed.
    pub fn commit_rename(&mut self, input: &str, host: &mut dyn HostEditor) -> bool {
        let Some(node_id) = self.renaming.take() else {
            return false;
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(node) = self.graph.node_mut(node_id) else {
            return false;
        };
        if node.name == trimmed {
            return false;
        }

        host.record_undo(&format!("Rename [{}] -> [{}]", node.name, trimmed));
        node.name = trimmed.to_owned();
        host.mark_dirty();
        if self.settings.auto_save {
            host.save_assets();
        }
        true
    }

    /// Abandon a pending rename
    pub fn cancel_rename(&mut self) {
        self.renaming = None;
    }

    fn group_header_at(&self, grid: Pos2) -> Option<NodeId> {
        // Topmost hit wins: scan in reverse draw order
        for node in self.graph.nodes().collect::<Vec<_>>().into_iter().rev() {
            if let NodeKind::Group { width, .. } = node.kind {
                let [x, y] = node.position;
                if grid.x >= x && grid.x <= x + width && grid.y >= y && grid.y <= y + GROUP_HEADER_HEIGHT
                {
                    return Some(node.id);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use egui::{pos2, vec2, Rect, Vec2};
    use gridwire_graph::{Node, PortDirection, PortRef};

    fn window_with_group() -> (EditorWindow, NodeId) {
        let mut graph = Graph::new("test");
        let group = graph.add_node(Node::group("region", 300.0, 150.0).with_position(0.0, 0.0));
        let mut window = EditorWindow::new(EditorSettings::default());
        window.open(graph);
        // Zero viewport, zero pan, unit zoom: window space == grid space
        (window, group)
    }

    #[test]
    fn test_layout_survives_disable_enable_cycle() {
        let mut graph = Graph::new("test");
        let a = graph.add_node(Node::new("a").with_port("out", PortDirection::Output));
        let out = PortRef::new(a, "out");

        let mut window = EditorWindow::new(EditorSettings::default());
        window.open(graph);

        let rect = Rect::from_min_size(pos2(10.0, 20.0), Vec2::splat(8.0));
        window.spatial.set_port_rect(out.clone(), rect);

        window.on_disable();
        window.spatial.clear(); // simulate the editor reload
        window.on_enable();

        assert_eq!(window.spatial.port_rect(&out), Some(rect));
    }

    #[test]
    fn test_persisted_layout_transfers_between_sessions() {
        let mut graph = Graph::new("test");
        let a = graph.add_node(Node::new("a").with_port("out", PortDirection::Output));
        let out = PortRef::new(a, "out");

        let mut first = EditorWindow::new(EditorSettings::default());
        first.open(graph.clone());
        first
            .spatial
            .set_port_rect(out.clone(), Rect::from_min_size(pos2(1.0, 2.0), Vec2::splat(4.0)));
        first.on_disable();

        // Host serializes the layout, a new window picks it up
        let mut second = EditorWindow::new(EditorSettings::default());
        second.open(graph);
        second.set_persisted_layout(first.persisted_layout().clone());
        second.on_enable();
        assert_eq!(second.spatial.port_rect_count(), 1);
    }

    #[test]
    fn test_double_click_on_group_header_starts_rename() {
        let (mut window, group) = window_with_group();
        let mut host = RecordingHost::default();

        window.pointer_event(
            PointerEventKind::Pressed,
            pos2(10.0, 10.0),
            PointerButton::Primary,
            2,
            &mut host,
        );
        assert_eq!(window.renaming(), Some(group));

        // A single click below the header band does not
        window.cancel_rename();
        window.pointer_event(
            PointerEventKind::Pressed,
            pos2(10.0, 100.0),
            PointerButton::Primary,
            2,
            &mut host,
        );
        assert_eq!(window.renaming(), None);
    }

    #[test]
    fn test_rename_empty_input_reverts_to_existing_name() {
        let (mut window, group) = window_with_group();
        let mut host = RecordingHost::default();

        window.pointer_event(
            PointerEventKind::Pressed,
            pos2(10.0, 10.0),
            PointerButton::Primary,
            2,
            &mut host,
        );
        assert!(!window.commit_rename("   ", &mut host));
        assert_eq!(window.graph().node(group).unwrap().name, "region");
        assert!(host.undo_labels.is_empty());
    }

    #[test]
    fn test_rename_records_undo_and_marks_dirty() {
        let (mut window, group) = window_with_group();
        let mut host = RecordingHost::default();

        window.pointer_event(
            PointerEventKind::Pressed,
            pos2(10.0, 10.0),
            PointerButton::Primary,
            2,
            &mut host,
        );
        assert!(window.commit_rename("logic", &mut host));
        assert_eq!(window.graph().node(group).unwrap().name, "logic");
        assert_eq!(host.undo_labels, vec!["Rename [region] -> [logic]".to_owned()]);
        assert_eq!(host.dirty_marks, 1);
        assert_eq!(window.renaming(), None);
    }

    #[test]
    fn test_pointer_events_reach_region_handlers() {
        let (mut window, group) = window_with_group();
        let mut host = RecordingHost::default();
        window.spatial.set_node_size(group, vec2(300.0, 150.0));

        // Press in the resize handle, drag past the floor
        window.pointer_event(
            PointerEventKind::Pressed,
            pos2(270.0, 120.0),
            PointerButton::Primary,
            1,
            &mut host,
        );
        window.pointer_event(
            PointerEventKind::Dragged,
            pos2(600.0, 650.0),
            PointerButton::Primary,
            0,
            &mut host,
        );
        let [w, h] = window.graph().node(group).unwrap().group_size().unwrap();
        assert!(w > 300.0 && h > 150.0);
    }

    #[test]
    fn test_draw_registers_cursor_rect_once_size_is_measured() {
        let (mut window, group) = window_with_group();
        let mut host = RecordingHost::default();

        // Not measured yet: nothing to register this frame
        window.draw(&mut host);
        assert!(host.cursor_rects.is_empty());

        window.spatial.set_node_size(group, vec2(300.0, 150.0));
        window.draw(&mut host);
        assert_eq!(host.cursor_rects.len(), 1);
    }

    #[test]
    fn test_focus_autosaves_only_when_enabled() {
        let (mut window, _) = window_with_group();
        let mut host = RecordingHost::default();
        window.on_focus(&mut host);
        assert_eq!(host.saves, 1);

        let mut silent = EditorWindow::new(EditorSettings {
            auto_save: false,
            ..EditorSettings::default()
        });
        silent.open(Graph::new("g"));
        silent.on_focus(&mut host);
        assert_eq!(host.saves, 1);
    }
}

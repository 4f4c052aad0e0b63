// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph layout and interaction engine for the Gridwire editor.
//!
//! The engine maps an infinite pannable/zoomable grid canvas onto a windowed
//! viewport and turns raw pointer events into editing decisions. It owns:
//! - The grid-space ↔ window-space coordinate transform ([`view`])
//! - The spatial registry caching screen geometry per port/node, with its
//!   parallel-array persistence encoding ([`spatial`])
//! - The hit-test and interaction state machines for resizable group
//!   regions ([`interaction`])
//! - Multi-object selection over nodes and reroute waypoints ([`selection`])
//! - The editor window lifecycle tying it together ([`window`])
//!
//! Everything runs synchronously inside the host editor's update/draw cycle;
//! there is no threading and no locking. Host services (repaint, undo
//! recording, cursor rects, drawing) are reached through the [`host::HostEditor`]
//! context passed into each call, never through globals.

pub mod host;
pub mod interaction;
pub mod selection;
pub mod settings;
pub mod spatial;
pub mod view;
pub mod window;

pub use host::HostEditor;
pub use interaction::{GroupInteraction, InteractionRegistry, PointerEvent, PointerEventKind};
pub use selection::{GroupDrag, RerouteReference, SelectionSet};
pub use settings::EditorSettings;
pub use spatial::{PersistedLayout, PortDescriptor, SpatialRegistry};
pub use view::ViewState;
pub use window::EditorWindow;

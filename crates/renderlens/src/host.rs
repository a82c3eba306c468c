//! Host adapter traits.
//!
//! The core never touches a concrete UI framework. Everything it needs from
//! the outside world goes through [`HostSurface`]: snapshot accessors,
//! element geometry, and the overlay side effects. Hosts drive the monitor
//! through [`LifecycleHooks`], which [`crate::runtime::MonitorRuntime`]
//! implements.

use crate::highlight::HighlightStyle;
use crate::log::RenderLogEntry;
use crate::snapshot::Snapshot;

/// Screen rectangle of the monitored element, in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Capability contract the monitored component's environment provides.
///
/// The query methods are sampled by the runtime; the overlay methods are
/// side effects executed in reducer-emitted order. None of them can fail:
/// a host with nothing to show (no element, no overlay yet) just no-ops.
pub trait HostSurface {
    /// Current state snapshot of the monitored component.
    fn current_state(&self) -> Snapshot;

    /// Current props snapshot of the monitored component.
    fn current_props(&self) -> Snapshot;

    /// Bounding rectangle of the rendered element, if it is available.
    fn rendered_element_rect(&self) -> Option<ElementRect>;

    /// Current vertical scroll offset of the page or viewport.
    fn scroll_offset_y(&self) -> f64 {
        0.0
    }

    /// Whether the component defines its own update-suppression logic.
    fn has_custom_update_gate(&self) -> bool {
        false
    }

    /// Builds the overlay widget near the monitored element.
    fn create_overlay(&mut self);

    /// Removes the overlay widget. Must tolerate being called when no
    /// overlay exists.
    fn remove_overlay(&mut self);

    /// Moves the overlay to an absolute page position.
    fn set_overlay_position(&mut self, left: f64, top: f64);

    /// Rewrites the overlay's badge count and log entries.
    fn refresh_overlay(&mut self, count: u64, entries: &[RenderLogEntry]);

    /// Applies a highlight style to the monitored element.
    fn apply_highlight(&mut self, style: &HighlightStyle);
}

/// Lifecycle notification hooks the host calls on the monitor.
///
/// The monitor is a decorator: it owns its own state and implements these
/// hooks; it never mutates the host component's behavior.
pub trait LifecycleHooks {
    /// The component mounted and its element is rendered.
    fn on_attach(&mut self);

    /// The component re-rendered. `prev_props`/`prev_state` are the
    /// snapshots from before the render; current ones are read from the
    /// host.
    fn on_update(&mut self, prev_props: Snapshot, prev_state: Snapshot);

    /// The component is about to unmount. Terminal: later events no-op.
    fn on_before_detach(&mut self);
}

//! Everything that can happen to a monitor.
//!
//! Lifecycle events come straight from the host's hooks; `PositionSyncTick`
//! and `HighlightFrame` are deferred wakeups sampled and re-dispatched by
//! the runtime. All of them flow through the same reducer.

use crate::host::ElementRect;
use crate::snapshot::SnapshotPair;

/// Events consumed by [`crate::update::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// The component mounted. Carries the element geometry sampled at
    /// attach time so the overlay can be positioned immediately.
    Attached {
        rect: Option<ElementRect>,
        scroll_y: f64,
    },

    /// The component re-rendered. Carries both snapshots so the reducer
    /// stays free of host access.
    Updated {
        prev: SnapshotPair,
        next: SnapshotPair,
        /// Whether the host declares its own update gate.
        custom_gated: bool,
    },

    /// The component is about to unmount. Terminal.
    BeforeDetach,

    /// Recurring position-sync firing with freshly sampled geometry.
    PositionSyncTick {
        rect: Option<ElementRect>,
        scroll_y: f64,
    },

    /// Deferred highlight relax step scheduled under `generation`.
    HighlightFrame { generation: u64 },
}

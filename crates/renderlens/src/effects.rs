//! Effects the reducer returns for the runtime to execute.
//!
//! The reducer only mutates `MonitorState` and describes the outside-world
//! work as effects; the runtime executes them against the host surface or
//! the scheduler. This keeps every overlay mutation observable and keeps the
//! reducer synchronously testable.
//!
//! Ordering matters: within one update cycle the reducer emits log refresh
//! before highlight trigger, and the runtime executes effects in emission
//! order.

use std::time::Duration;

use crate::highlight::HighlightStyle;
use crate::log::RenderLogEntry;

/// Commands returned by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEffect {
    /// Build the overlay widget on the host surface.
    CreateOverlay,

    /// Rewrite the overlay's badge count and visible log entries.
    RefreshOverlay {
        count: u64,
        entries: Vec<RenderLogEntry>,
    },

    /// Move the overlay to an absolute page position.
    SetOverlayPosition { left: f64, top: f64 },

    /// Tear the overlay down.
    RemoveOverlay,

    /// Apply a highlight style to the monitored element.
    ApplyHighlight { style: HighlightStyle },

    /// Start the recurring position-sync task.
    StartPositionSync { interval: Duration },

    /// Cancel the recurring position-sync task. Idempotent.
    CancelPositionSync,

    /// Schedule the deferred highlight relax step.
    ScheduleHighlightStep { generation: u64, delay: Duration },
}

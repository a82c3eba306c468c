//! Injected configuration for a monitor instance.
//!
//! Everything that was a process-wide constant in older render visualizers
//! is an instance value here: cadence, log bound, colors, gate policy. A
//! host constructs one `MonitorConfig` per monitored component (or shares a
//! cloned template).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::detect::GatePolicy;

/// Default bound on the render history log.
pub const MAX_LOG_LENGTH: usize = 20;

/// Default cadence of the overlay position sync task.
pub const POSITION_SYNC_INTERVAL: Duration = Duration::from_millis(500);

/// Default duration of the highlight fade back to the monitor outline.
pub const HIGHLIGHT_FADE: Duration = Duration::from_millis(500);

/// Outline values for the three highlight states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightColors {
    /// Resting outline while monitored.
    pub monitor: String,
    /// Flash outline on mount.
    pub mount: String,
    /// Flash outline on update.
    pub update: String,
}

impl Default for HighlightColors {
    fn default() -> Self {
        Self {
            monitor: "1px solid rgba(47, 150, 180, 1)".to_string(),
            mount: "3px solid rgba(55, 197, 7, 1)".to_string(),
            update: "3px solid rgba(197, 203, 1, 1)".to_string(),
        }
    }
}

/// Per-instance monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// How often the overlay position is re-synced to the element rect.
    pub position_sync_interval: Duration,
    /// Capacity of the render history log.
    pub max_log_length: usize,
    /// Duration of the highlight fade back to the monitor outline.
    pub highlight_fade: Duration,
    pub colors: HighlightColors,
    /// How to explain renders of components with a custom update gate.
    pub gate_policy: GatePolicy,
    /// Display name used by the force-update fallback message.
    pub component_name: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            position_sync_interval: POSITION_SYNC_INTERVAL,
            max_log_length: MAX_LOG_LENGTH,
            highlight_fade: HIGHLIGHT_FADE,
            colors: HighlightColors::default(),
            gate_policy: GatePolicy::default(),
            component_name: None,
        }
    }
}

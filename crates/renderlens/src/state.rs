//! Per-component monitor state.
//!
//! One `MonitorState` per monitored component instance, owned exclusively by
//! that instance's runtime. Created around mount, mutated only by the
//! reducer, torn down at unmount. Nothing here is shared across instances.

use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::highlight::HighlightState;
use crate::log::RenderLog;

/// Lifecycle phase of the monitor.
///
/// `Detached` is the terminal form of "unattached": a monitor that was torn
/// down never accepts another lifecycle event, while a fresh `Unattached`
/// monitor is waiting for its first attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unattached,
    Mounted,
    Detached,
}

/// Handle to the overlay owned by this monitor.
///
/// The overlay itself lives on the host side; the reducer only tracks
/// whether one is attached so position writes and removal can be gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayHandle;

/// Lifecycle state of the recurring position-sync task.
///
/// Mirrors the overlay task pattern: the runtime spawns the task and stores
/// its cancellation token here; cancelling is idempotent and cancelling a
/// task that already stopped is a no-op.
#[derive(Debug, Default)]
pub struct PositionSyncState {
    pub cancel: Option<CancellationToken>,
}

impl PositionSyncState {
    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }
}

/// Everything one monitored component owns.
#[derive(Debug)]
pub struct MonitorState {
    pub phase: Phase,
    pub log: RenderLog,
    pub overlay: Option<OverlayHandle>,
    pub position_sync: PositionSyncState,
    pub highlight: HighlightState,
    pub config: MonitorConfig,
}

impl MonitorState {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            phase: Phase::Unattached,
            log: RenderLog::new(config.max_log_length),
            overlay: None,
            position_sync: PositionSyncState::default(),
            highlight: HighlightState::default(),
            config,
        }
    }
}

//! Monitor runtime.
//!
//! Owns the state and the host surface, executes effects, and spawns the
//! two deferred mechanisms: the recurring position-sync task and one-shot
//! highlight relax steps. Spawned tasks never touch state; they send wakeups
//! into an inbox channel, and the runtime samples the host and re-dispatches
//! them through the reducer. All mutation therefore stays on the caller's
//! thread.
//!
//! Cancellation of the position-sync task is synchronous: the token is
//! cancelled while executing `CancelPositionSync`, before `on_before_detach`
//! returns. A tick already queued in the inbox is neutralized by the
//! reducer's phase check.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::config::MonitorConfig;
use crate::effects::OverlayEffect;
use crate::events::MonitorEvent;
use crate::host::{HostSurface, LifecycleHooks};
use crate::log::RenderLogEntry;
use crate::snapshot::{Snapshot, SnapshotPair};
use crate::state::MonitorState;
use crate::update;

/// Wakeups sent by spawned tasks. Geometry is sampled at dispatch time, not
/// at send time, so a tick always sees the freshest rect.
#[derive(Debug, Clone, Copy)]
enum Wake {
    PositionSync,
    HighlightFrame { generation: u64 },
}

/// Runtime for one monitored component.
///
/// Spawning requires a tokio runtime context; everything else is plain
/// synchronous calls. Hosts deliver lifecycle events via [`LifecycleHooks`]
/// and drain deferred wakeups with [`MonitorRuntime::pump_deferred`] (or
/// [`MonitorRuntime::next_deferred`] from an event loop).
pub struct MonitorRuntime<H: HostSurface> {
    pub state: MonitorState,
    host: H,
    wake_tx: mpsc::UnboundedSender<Wake>,
    wake_rx: mpsc::UnboundedReceiver<Wake>,
}

impl<H: HostSurface> MonitorRuntime<H> {
    pub fn new(host: H, config: MonitorConfig) -> Self {
        let (wake_tx, wake_rx) = mpsc::unbounded_channel();
        Self {
            state: MonitorState::new(config),
            host,
            wake_tx,
            wake_rx,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Render history, newest first. Queryable at any time.
    pub fn log_entries(&self) -> &[RenderLogEntry] {
        self.state.log.entries()
    }

    /// Total renders observed since mount. Queryable at any time.
    pub fn total_updates(&self) -> u64 {
        self.state.log.total_updates()
    }

    /// Runs one event through the reducer and executes the effects.
    pub fn dispatch(&mut self, event: MonitorEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    /// Drains every wakeup currently queued, without blocking.
    pub fn pump_deferred(&mut self) {
        while let Ok(wake) = self.wake_rx.try_recv() {
            self.handle_wake(wake);
        }
    }

    /// Waits for the next wakeup and handles it. For hosts that drive the
    /// monitor from an async event loop.
    pub async fn next_deferred(&mut self) {
        if let Some(wake) = self.wake_rx.recv().await {
            self.handle_wake(wake);
        }
    }

    fn handle_wake(&mut self, wake: Wake) {
        match wake {
            Wake::PositionSync => {
                let rect = self.host.rendered_element_rect();
                let scroll_y = self.host.scroll_offset_y();
                self.dispatch(MonitorEvent::PositionSyncTick { rect, scroll_y });
            }
            Wake::HighlightFrame { generation } => {
                self.dispatch(MonitorEvent::HighlightFrame { generation });
            }
        }
    }

    fn execute_effects(&mut self, effects: Vec<OverlayEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: OverlayEffect) {
        match effect {
            OverlayEffect::CreateOverlay => self.host.create_overlay(),
            OverlayEffect::RemoveOverlay => self.host.remove_overlay(),
            OverlayEffect::RefreshOverlay { count, entries } => {
                self.host.refresh_overlay(count, &entries);
            }
            OverlayEffect::SetOverlayPosition { left, top } => {
                self.host.set_overlay_position(left, top);
            }
            OverlayEffect::ApplyHighlight { style } => self.host.apply_highlight(&style),
            OverlayEffect::StartPositionSync { interval } => self.start_position_sync(interval),
            OverlayEffect::CancelPositionSync => {
                // Idempotent: take() leaves nothing for a second cancel,
                // and cancelling an already-stopped task is harmless.
                if let Some(cancel) = self.state.position_sync.cancel.take() {
                    cancel.cancel();
                }
            }
            OverlayEffect::ScheduleHighlightStep { generation, delay } => {
                let tx = self.wake_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Wake::HighlightFrame { generation });
                });
            }
        }
    }

    fn start_position_sync(&mut self, interval: Duration) {
        // A replacement start cancels the previous task first.
        if let Some(prev) = self.state.position_sync.cancel.take() {
            prev.cancel();
        }
        let token = CancellationToken::new();
        self.state.position_sync.cancel = Some(token.clone());

        let tx = self.wake_tx.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The interval's first tick completes immediately; the initial
            // overlay position was already set at attach.
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = token.cancelled() => {
                        trace!("position sync task cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        if tx.send(Wake::PositionSync).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }
}

impl<H: HostSurface> LifecycleHooks for MonitorRuntime<H> {
    fn on_attach(&mut self) {
        let rect = self.host.rendered_element_rect();
        let scroll_y = self.host.scroll_offset_y();
        self.dispatch(MonitorEvent::Attached { rect, scroll_y });
    }

    fn on_update(&mut self, prev_props: Snapshot, prev_state: Snapshot) {
        let prev = SnapshotPair {
            state: prev_state,
            props: prev_props,
        };
        let next = SnapshotPair {
            state: self.host.current_state(),
            props: self.host.current_props(),
        };
        let custom_gated = self.host.has_custom_update_gate();
        self.dispatch(MonitorEvent::Updated {
            prev,
            next,
            custom_gated,
        });
    }

    fn on_before_detach(&mut self) {
        self.dispatch(MonitorEvent::BeforeDetach);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{FRAME_DELAY, HighlightStyle};
    use crate::host::ElementRect;

    /// Host fixture recording every overlay side effect.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        state: Snapshot,
        props: Snapshot,
        rect: Option<ElementRect>,
        scroll_y: f64,
        custom_gate: bool,
        overlay_alive: bool,
        positions: Vec<(f64, f64)>,
        refreshes: Vec<u64>,
        highlights: Vec<HighlightStyle>,
    }

    impl HostSurface for RecordingSurface {
        fn current_state(&self) -> Snapshot {
            self.state.clone()
        }

        fn current_props(&self) -> Snapshot {
            self.props.clone()
        }

        fn rendered_element_rect(&self) -> Option<ElementRect> {
            self.rect
        }

        fn scroll_offset_y(&self) -> f64 {
            self.scroll_y
        }

        fn has_custom_update_gate(&self) -> bool {
            self.custom_gate
        }

        fn create_overlay(&mut self) {
            self.overlay_alive = true;
        }

        fn remove_overlay(&mut self) {
            self.overlay_alive = false;
        }

        fn set_overlay_position(&mut self, left: f64, top: f64) {
            self.positions.push((left, top));
        }

        fn refresh_overlay(&mut self, count: u64, _entries: &[RenderLogEntry]) {
            self.refreshes.push(count);
        }

        fn apply_highlight(&mut self, style: &HighlightStyle) {
            self.highlights.push(style.clone());
        }
    }

    fn runtime_with_rect() -> MonitorRuntime<RecordingSurface> {
        let host = RecordingSurface {
            rect: Some(ElementRect {
                left: 7.0,
                top: 5.0,
                width: 100.0,
                height: 40.0,
            }),
            scroll_y: 10.0,
            ..RecordingSurface::default()
        };
        MonitorRuntime::new(host, MonitorConfig::default())
    }

    /// Lets freshly woken tasks (timer callbacks) run on the paused runtime.
    async fn settle() {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_position_sync_fires_at_configured_cadence() {
        let mut runtime = runtime_with_rect();
        runtime.on_attach();
        assert_eq!(runtime.host().positions, vec![(7.0, 15.0)]);
        assert_eq!(runtime.host().refreshes, vec![1]);

        // Let the just-spawned sync task register its timer before the
        // clock moves, or the first interval is measured from the advanced
        // clock and never fires within the test.
        settle().await;
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        runtime.pump_deferred();
        assert_eq!(runtime.host().positions.len(), 2);

        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        runtime.pump_deferred();
        assert_eq!(runtime.host().positions.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_rect_skips_cycle_without_write() {
        let mut runtime = runtime_with_rect();
        runtime.on_attach();
        settle().await;
        runtime.host_mut().rect = None;

        // The tick really fires; the cycle is skipped because the rect is
        // gone, not because the timer never ran.
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        runtime.pump_deferred();
        // Only the initial attach-time write.
        assert_eq!(runtime.host().positions.len(), 1);

        // The element comes back; the next cycle writes again.
        runtime.host_mut().rect = Some(ElementRect::default());
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        runtime.pump_deferred();
        assert_eq!(runtime.host().positions.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_position_writes_after_detach() {
        let mut runtime = runtime_with_rect();
        runtime.on_attach();
        settle().await;

        // Observe one real tick first, so the frozen count below proves
        // cancellation rather than a timer that never started.
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        runtime.pump_deferred();
        assert_eq!(runtime.host().positions.len(), 2);

        runtime.on_before_detach();
        assert!(!runtime.host().overlay_alive);
        let writes_at_detach = runtime.host().positions.len();

        for _ in 0..4 {
            tokio::time::advance(Duration::from_millis(500)).await;
            settle().await;
        }
        runtime.pump_deferred();
        assert_eq!(runtime.host().positions.len(), writes_at_detach);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_detach_is_a_no_op() {
        let mut runtime = runtime_with_rect();
        runtime.on_attach();
        runtime.on_before_detach();
        runtime.on_before_detach();
        assert!(!runtime.state.position_sync.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_highlight_relaxes_after_frame_delay() {
        let mut runtime = runtime_with_rect();
        runtime.on_attach();
        // Attach applied the mount flash.
        assert_eq!(
            runtime.host().highlights.last().unwrap().outline,
            runtime.state.config.colors.mount
        );

        settle().await;
        tokio::time::advance(FRAME_DELAY).await;
        settle().await;
        runtime.pump_deferred();
        assert_eq!(
            runtime.host().highlights.last().unwrap().outline,
            runtime.state.config.colors.monitor
        );
    }
}

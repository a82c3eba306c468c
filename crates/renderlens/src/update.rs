//! Monitor reducer (update function).
//!
//! All state mutations happen here. The runtime calls
//! `update(state, event)` and executes the returned effects in order.
//!
//! Lifecycle: `Unattached → Mounted → (updates) → Detached`, with `Detached`
//! terminal. Events arriving in any other phase than the one they belong to
//! reduce to no effects; diagnostic tooling absorbs misuse instead of
//! failing.

use tracing::{debug, trace};

use crate::detect::ChangeDetector;
use crate::effects::OverlayEffect;
use crate::events::MonitorEvent;
use crate::highlight::{self, FRAME_DELAY, HighlightPhase};
use crate::host::ElementRect;
use crate::snapshot::SnapshotPair;
use crate::state::{MonitorState, OverlayHandle, Phase};

/// Message recorded for the mount render.
pub const INITIAL_RENDER_MESSAGE: &str = "Initial Render";

/// The main reducer function.
pub fn update(state: &mut MonitorState, event: MonitorEvent) -> Vec<OverlayEffect> {
    match event {
        MonitorEvent::Attached { rect, scroll_y } => attached(state, rect, scroll_y),
        MonitorEvent::Updated {
            prev,
            next,
            custom_gated,
        } => updated(state, &prev, &next, custom_gated),
        MonitorEvent::BeforeDetach => before_detach(state),
        MonitorEvent::PositionSyncTick { rect, scroll_y } => {
            position_sync_tick(state, rect, scroll_y)
        }
        MonitorEvent::HighlightFrame { generation } => highlight_frame(state, generation),
    }
}

fn attached(
    state: &mut MonitorState,
    rect: Option<ElementRect>,
    scroll_y: f64,
) -> Vec<OverlayEffect> {
    if state.phase != Phase::Unattached {
        trace!(phase = ?state.phase, "attach ignored");
        return vec![];
    }
    debug!("monitor attached");
    state.phase = Phase::Mounted;

    state.log.reset();
    state.log.append(INITIAL_RENDER_MESSAGE);
    state.overlay = Some(OverlayHandle);

    let mut effects = vec![OverlayEffect::CreateOverlay, refresh_effect(state)];
    if let Some(rect) = rect {
        effects.push(position_effect(rect, scroll_y));
    }
    effects.extend(trigger_highlight(state, HighlightPhase::Mount));
    effects.push(OverlayEffect::StartPositionSync {
        interval: state.config.position_sync_interval,
    });
    effects
}

fn updated(
    state: &mut MonitorState,
    prev: &SnapshotPair,
    next: &SnapshotPair,
    custom_gated: bool,
) -> Vec<OverlayEffect> {
    if state.phase != Phase::Mounted {
        trace!(phase = ?state.phase, "update ignored");
        return vec![];
    }

    let detector = ChangeDetector::new(state.config.gate_policy);
    let reports = detector.explain(
        prev,
        next,
        custom_gated,
        state.config.component_name.as_deref(),
    );
    for report in &reports {
        state.log.append(report.message.clone());
    }

    // Append, then refresh, then highlight. Hosts reading the log after an
    // update must observe the new entry before any visual effect lands.
    let mut effects = vec![refresh_effect(state)];
    effects.extend(trigger_highlight(state, HighlightPhase::Update));
    effects
}

fn before_detach(state: &mut MonitorState) -> Vec<OverlayEffect> {
    if state.phase != Phase::Mounted {
        trace!(phase = ?state.phase, "detach ignored");
        return vec![];
    }
    debug!(updates = state.log.total_updates(), "monitor detaching");
    state.phase = Phase::Detached;

    let mut effects = Vec::new();
    if state.overlay.take().is_some() {
        effects.push(OverlayEffect::RemoveOverlay);
    }
    effects.push(OverlayEffect::CancelPositionSync);
    effects
}

fn position_sync_tick(
    state: &MonitorState,
    rect: Option<ElementRect>,
    scroll_y: f64,
) -> Vec<OverlayEffect> {
    if state.phase != Phase::Mounted {
        trace!("position sync tick after teardown ignored");
        return vec![];
    }
    if state.overlay.is_none() {
        trace!("position sync skipped: no overlay");
        return vec![];
    }
    let Some(rect) = rect else {
        trace!("position sync skipped: element rect unavailable");
        return vec![];
    };
    vec![position_effect(rect, scroll_y)]
}

fn highlight_frame(state: &MonitorState, generation: u64) -> Vec<OverlayEffect> {
    if state.phase != Phase::Mounted {
        trace!("highlight frame after teardown ignored");
        return vec![];
    }
    if !state.highlight.is_current(generation) {
        trace!(generation, "stale highlight frame superseded");
        return vec![];
    }
    vec![OverlayEffect::ApplyHighlight {
        style: highlight::monitor_style(&state.config.colors, state.config.highlight_fade),
    }]
}

fn refresh_effect(state: &MonitorState) -> OverlayEffect {
    OverlayEffect::RefreshOverlay {
        count: state.log.total_updates(),
        entries: state.log.entries().to_vec(),
    }
}

/// Absolute overlay position: the element's top-left, with the top offset by
/// the page scroll so the overlay tracks elements outside fixed-position
/// ancestors.
fn position_effect(rect: ElementRect, scroll_y: f64) -> OverlayEffect {
    OverlayEffect::SetOverlayPosition {
        left: rect.left,
        top: scroll_y + rect.top,
    }
}

fn trigger_highlight(state: &mut MonitorState, phase: HighlightPhase) -> Vec<OverlayEffect> {
    let generation = state.highlight.begin();
    vec![
        OverlayEffect::ApplyHighlight {
            style: highlight::flash_style(&state.config.colors, phase),
        },
        OverlayEffect::ScheduleHighlightStep {
            generation,
            delay: FRAME_DELAY,
        },
    ]
}

//! Transient highlight applied to the monitored element on mount/update.
//!
//! Implements the two-phase frame strategy: the trigger applies a
//! transition-disabled flash outline (one color for mount, another for
//! update), then a deferred step one frame later relaxes back to the resting
//! monitor outline with a timed fade.
//!
//! Every trigger bumps a generation counter. A deferred step carries the
//! generation it was scheduled under and is dropped by the reducer if a newer
//! trigger has superseded it, so rapid updates settle on the most recent
//! visual outcome only.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::HighlightColors;

/// Delay before the relax step; approximately one paint frame.
pub const FRAME_DELAY: Duration = Duration::from_millis(16);

/// Which lifecycle event triggered the highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightPhase {
    Mount,
    Update,
}

/// How the outline change is animated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Apply instantly.
    None,
    /// Animate over the given duration.
    Fade(Duration),
}

/// Outline style the host applies to the monitored element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStyle {
    pub outline: String,
    pub transition: Transition,
}

/// Per-component highlight bookkeeping: just the supersession counter.
#[derive(Debug, Default)]
pub struct HighlightState {
    generation: u64,
}

impl HighlightState {
    /// Starts a new highlight, invalidating any pending deferred step.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

/// Instant flash style for the given phase.
pub fn flash_style(colors: &HighlightColors, phase: HighlightPhase) -> HighlightStyle {
    let outline = match phase {
        HighlightPhase::Mount => colors.mount.clone(),
        HighlightPhase::Update => colors.update.clone(),
    };
    HighlightStyle {
        outline,
        transition: Transition::None,
    }
}

/// Resting monitor style with a timed fade back.
pub fn monitor_style(colors: &HighlightColors, fade: Duration) -> HighlightStyle {
    HighlightStyle {
        outline: colors.monitor.clone(),
        transition: Transition::Fade(fade),
    }
}

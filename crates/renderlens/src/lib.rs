//! Re-render diagnostics for UI components.
//!
//! Attach a monitor to a component and it explains *why* each re-render
//! happened (which state or props field changed, shallowly) and visualizes
//! *when* (a transient highlight plus an overlay showing a bounded,
//! newest-first render history).
//!
//! ## Architecture
//!
//! ```text
//! host lifecycle hooks ──► MonitorRuntime ──► update() reducer ──► effects
//!                                ▲                                   │
//!                                └── inbox (sync ticks, frames) ◄────┘
//! ```
//!
//! - [`update::update`] is the reducer: the only place state mutates.
//! - [`effects::OverlayEffect`] describes overlay work; the runtime executes
//!   it against the host's [`host::HostSurface`] implementation.
//! - The recurring position sync and the deferred highlight steps run as
//!   tokio tasks that only send wakeups back into the runtime's inbox.
//!
//! The crate knows nothing about any concrete UI framework; hosts implement
//! [`HostSurface`] and call the [`LifecycleHooks`] on mount, update, and
//! unmount.

pub mod config;
pub mod detect;
pub mod effects;
pub mod events;
pub mod highlight;
pub mod host;
pub mod log;
pub mod runtime;
pub mod snapshot;
pub mod state;
pub mod update;

pub use config::{HighlightColors, MonitorConfig};
pub use detect::{ChangeDetector, ChangeKind, ChangeReport, GatePolicy};
pub use effects::OverlayEffect;
pub use events::MonitorEvent;
pub use highlight::{HighlightPhase, HighlightStyle, Transition};
pub use host::{ElementRect, HostSurface, LifecycleHooks};
pub use log::{RenderLog, RenderLogEntry};
pub use runtime::MonitorRuntime;
pub use snapshot::{CompositeRef, FieldValue, Snapshot, SnapshotPair};
pub use state::{MonitorState, Phase};

//! Causal diff: why did this render happen?
//!
//! The detector compares the previous and current snapshots shallowly and
//! explains the render with the *first* differing field in snapshot
//! iteration order. This is a deliberate tie-break policy, not an oversight:
//! one render gets one cause, and stable field order makes that cause
//! deterministic.
//!
//! Composite values compare by identity token only. The detector reports
//! *that* a composite field changed, never what changed inside it.

use serde::{Deserialize, Serialize};

use crate::snapshot::{FieldValue, Snapshot, SnapshotPair};

/// Fixed message used when the host gates updates itself.
pub const CUSTOM_GATE_MESSAGE: &str = "custom shouldComponentUpdate() handled update";

/// Fixed fallback when neither state nor props show a differing field.
pub const FORCE_UPDATE_MESSAGE: &str = "unknown reason for update, possibly from forceUpdate()";

/// What kind of cause a report names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    StateChanged,
    PropsChanged,
    ForceUpdate,
    CustomGated,
}

/// One explanation for one render. Consumed immediately into the render log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeReport {
    pub kind: ChangeKind,
    pub field: Option<String>,
    pub message: String,
}

/// Policy for components that define their own update gate.
///
/// The two policies disagree on whether a diff is still meaningful when the
/// host decides for itself whether to re-render, so both are supported and
/// the choice is injected via config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatePolicy {
    /// Record only the fixed gate message; skip the diff entirely.
    SkipDiff,
    /// Record the gate message as a caveat, then diff as usual.
    #[default]
    AnnotateAndDiff,
}

/// Shallow-diff engine producing one causal explanation per render
/// (two entries under [`GatePolicy::AnnotateAndDiff`] for gated components).
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector {
    policy: GatePolicy,
}

impl ChangeDetector {
    pub fn new(policy: GatePolicy) -> Self {
        Self { policy }
    }

    /// Explains a single render.
    ///
    /// `component` is an optional display name used by the force-update
    /// fallback message.
    pub fn explain(
        &self,
        prev: &SnapshotPair,
        next: &SnapshotPair,
        custom_gated: bool,
        component: Option<&str>,
    ) -> Vec<ChangeReport> {
        let mut reports = Vec::with_capacity(2);

        if custom_gated {
            reports.push(ChangeReport {
                kind: ChangeKind::CustomGated,
                field: None,
                message: CUSTOM_GATE_MESSAGE.to_string(),
            });
            if self.policy == GatePolicy::SkipDiff {
                return reports;
            }
        }

        let diff = first_change(ChangeKind::StateChanged, "state", &prev.state, &next.state)
            .or_else(|| first_change(ChangeKind::PropsChanged, "props", &prev.props, &next.props))
            .unwrap_or_else(|| force_update_report(component));
        reports.push(diff);
        reports
    }
}

/// Scans `next` in iteration order and reports the first field whose value
/// differs shallowly from `prev`. A field absent from `prev` counts as
/// differing.
fn first_change(
    kind: ChangeKind,
    group: &str,
    prev: &Snapshot,
    next: &Snapshot,
) -> Option<ChangeReport> {
    for (field, value) in next.iter() {
        if prev.get(field) == Some(value) {
            continue;
        }
        let message = if value.is_composite() {
            format!("this.{group}[{field}] changed")
        } else {
            let old = prev
                .get(field)
                .map_or_else(|| "undefined".to_string(), FieldValue::to_string);
            format!("this.{group}[{field}] changed from {old} => {value}")
        };
        return Some(ChangeReport {
            kind,
            field: Some(field.to_string()),
            message,
        });
    }
    None
}

fn force_update_report(component: Option<&str>) -> ChangeReport {
    let message = match component {
        Some(name) => format!("unknown reason for {name} update, possibly from forceUpdate()"),
        None => FORCE_UPDATE_MESSAGE.to_string(),
    };
    ChangeReport {
        kind: ChangeKind::ForceUpdate,
        field: None,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::CompositeRef;

    fn pair(state: Snapshot, props: Snapshot) -> SnapshotPair {
        SnapshotPair { state, props }
    }

    fn detector() -> ChangeDetector {
        ChangeDetector::new(GatePolicy::AnnotateAndDiff)
    }

    #[test]
    fn test_scalar_state_change_renders_both_values() {
        let prev = pair(Snapshot::new().with("count", 0), Snapshot::new());
        let next = pair(Snapshot::new().with("count", 1), Snapshot::new());
        let reports = detector().explain(&prev, &next, false, None);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, ChangeKind::StateChanged);
        assert_eq!(reports[0].field.as_deref(), Some("count"));
        assert_eq!(reports[0].message, "this.state[count] changed from 0 => 1");
    }

    #[test]
    fn test_composite_state_change_has_no_value_rendering() {
        let prev = pair(Snapshot::new().with("items", CompositeRef(1)), Snapshot::new());
        let next = pair(Snapshot::new().with("items", CompositeRef(2)), Snapshot::new());
        let reports = detector().explain(&prev, &next, false, None);
        assert_eq!(reports[0].message, "this.state[items] changed");
    }

    #[test]
    fn test_unchanged_composite_identity_is_not_a_change() {
        let prev = pair(Snapshot::new().with("items", CompositeRef(7)), Snapshot::new());
        let next = pair(Snapshot::new().with("items", CompositeRef(7)), Snapshot::new());
        let reports = detector().explain(&prev, &next, false, None);
        assert_eq!(reports[0].kind, ChangeKind::ForceUpdate);
    }

    #[test]
    fn test_props_scanned_only_when_state_is_clean() {
        let state = Snapshot::new().with("count", 3);
        let prev = pair(state.clone(), Snapshot::new().with("theme", "light"));
        let next = pair(state, Snapshot::new().with("theme", "dark"));
        let reports = detector().explain(&prev, &next, false, None);
        assert_eq!(reports[0].kind, ChangeKind::PropsChanged);
        assert_eq!(
            reports[0].message,
            "this.props[theme] changed from light => dark"
        );
    }

    #[test]
    fn test_state_change_wins_over_props_change() {
        let prev = pair(
            Snapshot::new().with("count", 0),
            Snapshot::new().with("theme", "light"),
        );
        let next = pair(
            Snapshot::new().with("count", 1),
            Snapshot::new().with("theme", "dark"),
        );
        let reports = detector().explain(&prev, &next, false, None);
        assert_eq!(reports[0].kind, ChangeKind::StateChanged);
    }

    #[test]
    fn test_first_differing_field_in_iteration_order_wins() {
        let prev = pair(
            Snapshot::new().with("a", 1).with("b", 1).with("c", 1),
            Snapshot::new(),
        );
        let next = pair(
            Snapshot::new().with("a", 1).with("b", 2).with("c", 3),
            Snapshot::new(),
        );
        let reports = detector().explain(&prev, &next, false, None);
        assert_eq!(reports[0].field.as_deref(), Some("b"));
    }

    #[test]
    fn test_missing_previous_field_counts_as_changed() {
        let prev = pair(Snapshot::new(), Snapshot::new());
        let next = pair(Snapshot::new().with("flag", true), Snapshot::new());
        let reports = detector().explain(&prev, &next, false, None);
        assert_eq!(
            reports[0].message,
            "this.state[flag] changed from undefined => true"
        );
    }

    #[test]
    fn test_no_difference_falls_back_to_force_update() {
        let snap = pair(Snapshot::new().with("count", 1), Snapshot::new());
        let reports = detector().explain(&snap, &snap.clone(), false, None);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, ChangeKind::ForceUpdate);
        assert_eq!(
            reports[0].message,
            "unknown reason for update, possibly from forceUpdate()"
        );
    }

    #[test]
    fn test_force_update_names_component_when_available() {
        let snap = pair(Snapshot::new(), Snapshot::new());
        let reports = detector().explain(&snap, &snap.clone(), false, Some("TodoList"));
        assert_eq!(
            reports[0].message,
            "unknown reason for TodoList update, possibly from forceUpdate()"
        );
    }

    #[test]
    fn test_skip_diff_policy_records_only_gate_message() {
        let prev = pair(Snapshot::new().with("count", 0), Snapshot::new());
        let next = pair(Snapshot::new().with("count", 1), Snapshot::new());
        let reports =
            ChangeDetector::new(GatePolicy::SkipDiff).explain(&prev, &next, true, None);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, ChangeKind::CustomGated);
        assert_eq!(reports[0].message, CUSTOM_GATE_MESSAGE);
    }

    #[test]
    fn test_annotate_policy_records_caveat_then_diff() {
        let prev = pair(Snapshot::new().with("count", 0), Snapshot::new());
        let next = pair(Snapshot::new().with("count", 1), Snapshot::new());
        let reports = detector().explain(&prev, &next, true, None);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].kind, ChangeKind::CustomGated);
        assert_eq!(reports[1].message, "this.state[count] changed from 0 => 1");
    }

    #[test]
    fn test_ungated_component_gets_no_caveat() {
        let snap = pair(Snapshot::new(), Snapshot::new());
        let reports = detector().explain(&snap, &snap.clone(), false, None);
        assert!(reports.iter().all(|r| r.kind != ChangeKind::CustomGated));
    }
}

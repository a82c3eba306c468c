//! Point-in-time views of a monitored component's state and props.
//!
//! A [`Snapshot`] is an ordered field-name-to-value mapping supplied by the
//! host. Iteration order is insertion order, and that order is what the
//! change detector uses to break ties when several fields differ at once.
//!
//! Values are shallow by design: scalars carry their value, composites carry
//! only an identity token ([`CompositeRef`]). Comparing two composites never
//! looks inside them.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// FieldValue
// ============================================================================

/// Identity token for a composite (non-scalar) value.
///
/// The host mints one token per live composite object; a new token means a
/// new object, which is exactly the reference-inequality signal the detector
/// needs. The token says nothing about the value's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeRef(pub u64);

/// A single state or props field value, shallow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Object, array, function: anything the host cannot render as a scalar.
    Composite(CompositeRef),
}

impl FieldValue {
    /// Returns true for values that are reported without value rendering.
    pub fn is_composite(&self) -> bool {
        matches!(self, FieldValue::Composite(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Str(s) => write!(f, "{s}"),
            // Composites are never value-rendered in log messages; this is
            // only reachable through direct Display use by a host.
            FieldValue::Composite(_) => write!(f, "[composite]"),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<CompositeRef> for FieldValue {
    fn from(value: CompositeRef) -> Self {
        FieldValue::Composite(value)
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Ordered mapping from field name to value.
///
/// Only the fields the host explicitly declares exist here, so inherited or
/// non-enumerable fields of the host's native objects never leak into the
/// diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    fields: Vec<(String, FieldValue)>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing an existing value in place (keeping its
    /// position in iteration order) or appending a new one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Builder-style [`Snapshot::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Fields in insertion order (the detector's tie-break order).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// State and props captured together at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPair {
    pub state: Snapshot,
    pub props: Snapshot,
}

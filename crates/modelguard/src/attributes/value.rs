//! Attribute values and assignment outcomes.
//!
//! Values are plain JSON values so a model can hold anything a record column
//! could. The outcome of a set is reported back to the caller rather than
//! raised as an error.

use std::collections::BTreeMap;
use std::fmt;

/// Runtime representation of an attribute value.
pub type AttrValue = serde_json::Value;

/// Attribute name to value mapping, ordered by name.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Why a write was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Allow-list mode is on and the key matches no fillable attribute.
    NotFillable,

    /// The key matches a read-only attribute.
    ReadOnly,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotFillable => write!(f, "not fillable"),
            Rejection::ReadOnly => write!(f, "read-only"),
        }
    }
}

/// Result of setting an attribute.
///
/// A rejection is not an error: the value is simply not stored. Bulk
/// assignment relies on this to keep going when one field is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    /// The value reached the underlying store.
    Written,

    /// The value was dropped; the store is unchanged.
    Rejected(Rejection),
}

impl AssignOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, AssignOutcome::Written)
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_written()
    }

    /// The rejection reason, if the write was dropped.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            AssignOutcome::Written => None,
            AssignOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

//! # Models
//!
//! A model type describes a kind of record and its guard settings through
//! [`ModelType`]. A [`Model`] is one instance of it: a guarded attribute store
//! plus the bookkeeping a repository needs (key, whether it exists, the
//! attributes as last persisted).
//!
//! ## Declaring a type
//!
//! ```ignore
//! struct Invoice;
//!
//! impl ModelType for Invoice {
//!     fn read_only_events() -> Vec<LifecycleEvent> {
//!         vec![LifecycleEvent::Updating, LifecycleEvent::Deleting]
//!     }
//!
//!     fn read_only_attributes() -> Vec<String> {
//!         vec!["number".into()]
//!     }
//! }
//!
//! let mut invoice = Model::<Invoice>::new();
//! invoice.set_attribute("total", 120);          // Written
//! invoice.set_attribute("Number", "INV-1");     // Rejected(ReadOnly)
//! ```
//!
//! ## Framework-managed attributes
//!
//! `created_at`, `updated_at` and `deleted_at` are stamped by the repository
//! through unguarded writes, so declaring them read-only only stops callers
//! from changing them.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Map;
use uuid::Uuid;

use crate::attributes::{AssignOutcome, AttrValue, Attributes, Rejection};
use crate::config::GuardConfig;
use crate::error::Result;
use crate::events::LifecycleEvent;
use crate::guard::GuardedAttributeStore;
use crate::store::memory::AttributeMap;
use crate::store::AttributeStore;

pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const DELETED_AT: &str = "deleted_at";

/// Static, per-type model configuration.
///
/// Every method has a default, so an empty `impl` gives an unguarded model
/// with timestamps and hard deletes.
pub trait ModelType: 'static {
    /// Identifier used to scope lifecycle events to this type.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    fn read_only_events() -> Vec<LifecycleEvent> {
        Vec::new()
    }

    fn read_only_attributes() -> Vec<String> {
        Vec::new()
    }

    fn prevent_new_assignments() -> bool {
        false
    }

    fn fillable() -> Vec<String> {
        Vec::new()
    }

    fn timestamps() -> bool {
        true
    }

    fn soft_deletes() -> bool {
        false
    }

    /// Guard settings for the type. Override to source them from a
    /// [`GuardConfig`] file instead of the individual methods.
    fn guard_config() -> GuardConfig {
        GuardConfig {
            read_only_events: Self::read_only_events(),
            read_only_attributes: Self::read_only_attributes(),
            prevent_new_assignments: Self::prevent_new_assignments(),
            fillable: Self::fillable(),
        }
    }
}

/// Result of a mass assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub written: Vec<String>,
    pub rejected: Vec<(String, Rejection)>,
}

impl FillReport {
    pub fn all_written(&self) -> bool {
        self.rejected.is_empty()
    }

    fn record(&mut self, key: String, outcome: AssignOutcome) {
        match outcome {
            AssignOutcome::Written => self.written.push(key),
            AssignOutcome::Rejected(reason) => self.rejected.push((key, reason)),
        }
    }
}

/// One instance of a model type.
pub struct Model<M: ModelType> {
    store: GuardedAttributeStore<AttributeMap>,
    original: Attributes,
    key: Option<Uuid>,
    exists: bool,
    _type: PhantomData<fn() -> M>,
}

impl<M: ModelType> Model<M> {
    /// Fresh, unsaved instance configured from `M::guard_config()`.
    pub fn new() -> Self {
        let config = M::guard_config();
        let store = GuardedAttributeStore::new(AttributeMap::with_fillable(config.fillable))
            .with_read_only(config.read_only_attributes)
            .with_prevent_new_assignments(config.prevent_new_assignments);
        Self {
            store,
            original: Attributes::new(),
            key: None,
            exists: false,
            _type: PhantomData,
        }
    }

    /// Rebuild a persisted instance from a stored row.
    pub(crate) fn from_row(key: Uuid, values: Attributes) -> Self {
        let mut model = Self::new();
        model.store.inner_mut().replace_attributes(values.clone());
        model.original = values;
        model.key = Some(key);
        model.exists = true;
        model
    }

    /// Set an attribute through the guard.
    ///
    /// A protected key is dropped silently; the outcome says why.
    pub fn set_attribute(&mut self, key: &str, value: impl Into<AttrValue>) -> AssignOutcome {
        self.store.set_attribute(key, value.into())
    }

    pub fn get_attribute(&self, key: &str) -> Option<&AttrValue> {
        self.store.get_attribute(key)
    }

    pub fn attributes(&self) -> &Attributes {
        self.store.attributes()
    }

    /// Assign many attributes; protected ones are skipped, never fatal.
    pub fn fill<I, K, V>(&mut self, values: I) -> FillReport
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let mut report = FillReport::default();
        for (key, value) in values {
            let key = key.into();
            let outcome = self.set_attribute(&key, value);
            report.record(key, outcome);
        }
        report
    }

    /// Mass-assign from a JSON object.
    pub fn fill_json(&mut self, source: &str) -> Result<FillReport> {
        let values: Map<String, AttrValue> = serde_json::from_str(source)?;
        Ok(self.fill(values))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.attributes())?)
    }

    pub fn key(&self) -> Option<Uuid> {
        self.key
    }

    /// Whether the instance is backed by a stored row.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Keys whose value differs from the last persisted state.
    pub fn dirty(&self) -> Vec<&str> {
        self.attributes()
            .iter()
            .filter(|(key, value)| self.original.get(key.as_str()) != Some(*value))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty().is_empty()
    }

    /// Soft-deleted and not yet restored.
    pub fn trashed(&self) -> bool {
        M::soft_deletes()
            && self
                .get_attribute(DELETED_AT)
                .is_some_and(|value| !value.is_null())
    }

    /// Per-instance guard settings.
    pub fn guard(&self) -> &GuardedAttributeStore<AttributeMap> {
        &self.store
    }

    pub fn guard_mut(&mut self) -> &mut GuardedAttributeStore<AttributeMap> {
        &mut self.store
    }

    pub fn set_read_only_attributes(&mut self, names: Vec<String>) {
        self.store.set_read_only(names);
    }

    pub fn set_prevent_new_assignments(&mut self, prevent: bool) {
        self.store.set_prevent_new_assignments(prevent);
    }

    pub fn set_fillable(&mut self, fillable: Vec<String>) {
        self.store.inner_mut().set_fillable(fillable);
    }

    // --- Repository bookkeeping ---

    /// Write that skips the guard; for attributes the repository manages.
    pub(crate) fn force_set(&mut self, key: &str, value: AttrValue) {
        self.store.inner_mut().set_attribute(key, value);
    }

    pub(crate) fn mark_persisted(&mut self, key: Uuid) {
        self.key = Some(key);
        self.exists = true;
    }

    pub(crate) fn mark_removed(&mut self) {
        self.exists = false;
    }

    pub(crate) fn sync_original(&mut self) {
        self.original = self.attributes().clone();
    }
}

impl<M: ModelType> Default for Model<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ModelType> Clone for Model<M> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            original: self.original.clone(),
            key: self.key,
            exists: self.exists,
            _type: PhantomData,
        }
    }
}

impl<M: ModelType> fmt::Debug for Model<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("type", &M::type_name())
            .field("key", &self.key)
            .field("exists", &self.exists)
            .field("attributes", self.attributes())
            .finish()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// No guard settings at all.
    pub struct Plain;

    impl ModelType for Plain {
        fn type_name() -> &'static str {
            "Plain"
        }
    }

    /// Immutable once written: updates and deletes are cancelled.
    pub struct AuditEntry;

    impl ModelType for AuditEntry {
        fn type_name() -> &'static str {
            "AuditEntry"
        }

        fn read_only_events() -> Vec<LifecycleEvent> {
            vec![LifecycleEvent::Updating, LifecycleEvent::Deleting]
        }

        fn read_only_attributes() -> Vec<String> {
            vec![CREATED_AT.into(), "actor_id".into()]
        }
    }

    /// Only `name` and `email` may be assigned.
    pub struct Account;

    impl ModelType for Account {
        fn type_name() -> &'static str {
            "Account"
        }

        fn prevent_new_assignments() -> bool {
            true
        }

        fn fillable() -> Vec<String> {
            vec!["name".into(), "email".into()]
        }
    }

    /// Soft-deleted and restorable; restores are suppressed.
    pub struct Note;

    impl ModelType for Note {
        fn type_name() -> &'static str {
            "Note"
        }

        fn read_only_events() -> Vec<LifecycleEvent> {
            vec![LifecycleEvent::Restoring]
        }

        fn soft_deletes() -> bool {
            true
        }
    }
}

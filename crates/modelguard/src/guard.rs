//! # Attribute Guard
//!
//! [`GuardedAttributeStore`] wraps any [`AttributeStore`] and filters writes
//! before they reach it. Two independent filters run, in this order:
//!
//! 1. **Allow-list** (`prevent_new_assignments`): the key must match a fillable
//!    attribute.
//! 2. **Read-only**: the key must not match a read-only attribute.
//!
//! Matching goes through [`crate::attributes::casing_variants`], so a name
//! declared as `created_at` also covers `createdAt`, `CreatedAt` and
//! `CREATED_AT`.
//!
//! A failed filter drops the write silently: the caller gets
//! [`AssignOutcome::Rejected`] back and the wrapped store is untouched. With
//! neither filter configured the guard delegates straight through.

use tracing::debug;

use crate::attributes::{is_protected, AssignOutcome, AttrValue, Attributes, Rejection};
use crate::store::AttributeStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuardedAttributeStore<S> {
    inner: S,
    read_only: Vec<String>,
    prevent_new_assignments: bool,
}

impl<S: AttributeStore> GuardedAttributeStore<S> {
    /// Wrap `inner` with no protection configured.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            read_only: Vec::new(),
            prevent_new_assignments: false,
        }
    }

    pub fn with_read_only<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.read_only = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prevent_new_assignments(mut self, prevent: bool) -> Self {
        self.prevent_new_assignments = prevent;
        self
    }

    pub fn read_only(&self) -> &[String] {
        &self.read_only
    }

    pub fn set_read_only(&mut self, names: Vec<String>) {
        self.read_only = names;
    }

    pub fn add_read_only(&mut self, name: impl Into<String>) {
        self.read_only.push(name.into());
    }

    pub fn prevents_new_assignments(&self) -> bool {
        self.prevent_new_assignments
    }

    pub fn set_prevent_new_assignments(&mut self, prevent: bool) {
        self.prevent_new_assignments = prevent;
    }

    /// False when writes take the pass-through path.
    pub fn is_guarded(&self) -> bool {
        self.prevent_new_assignments || !self.read_only.is_empty()
    }

    /// Check a key against both filters without writing anything.
    pub fn check(&self, key: &str) -> Option<Rejection> {
        if !self.is_guarded() {
            return None;
        }

        if self.prevent_new_assignments && !is_protected(key, self.inner.fillable()) {
            return Some(Rejection::NotFillable);
        }

        if is_protected(key, self.read_only.as_slice()) {
            return Some(Rejection::ReadOnly);
        }

        None
    }

    /// Unguarded access to the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unguarded mutable access; writes made through it skip both filters.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: AttributeStore> AttributeStore for GuardedAttributeStore<S> {
    fn set_attribute(&mut self, key: &str, value: AttrValue) -> AssignOutcome {
        match self.check(key) {
            None => self.inner.set_attribute(key, value),
            Some(reason) => {
                debug!(key, %reason, "attribute write rejected");
                AssignOutcome::Rejected(reason)
            }
        }
    }

    fn get_attribute(&self, key: &str) -> Option<&AttrValue> {
        self.inner.get_attribute(key)
    }

    /// Removal is a write: it is filtered like a set.
    fn remove_attribute(&mut self, key: &str) -> Option<AttrValue> {
        if self.check(key).is_some() {
            return None;
        }
        self.inner.remove_attribute(key)
    }

    fn attributes(&self) -> &Attributes {
        self.inner.attributes()
    }

    fn fillable(&self) -> &[String] {
        self.inner.fillable()
    }
}

//! # Attribute Storage
//!
//! The [`AttributeStore`] trait is the seam between a model and wherever its
//! attribute values live. The guard in [`crate::guard`] is itself an
//! `AttributeStore` that wraps another one, so protection composes by wrapping
//! rather than by overriding.
//!
//! ## Implementations
//!
//! - [`memory::AttributeMap`]: plain in-memory store. Every write lands.
//! - [`crate::guard::GuardedAttributeStore`]: filters writes before delegating.

use crate::attributes::{AssignOutcome, AttrValue, Attributes};

pub mod memory;

/// Key-value storage for one model instance.
pub trait AttributeStore {
    /// Set an attribute value.
    ///
    /// Plain stores always return [`AssignOutcome::Written`]; wrappers may drop
    /// the write and report why.
    fn set_attribute(&mut self, key: &str, value: AttrValue) -> AssignOutcome;

    /// Get the current value of an attribute.
    fn get_attribute(&self, key: &str) -> Option<&AttrValue>;

    /// Remove an attribute, returning its last value.
    fn remove_attribute(&mut self, key: &str) -> Option<AttrValue>;

    /// All current attributes.
    fn attributes(&self) -> &Attributes;

    /// Names permitted for external assignment.
    fn fillable(&self) -> &[String];
}

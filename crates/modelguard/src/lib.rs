//! # modelguard
//!
//! Read-only protection for persistence models.
//!
//! Two independent mechanisms:
//!
//! - **Event suppression** ([`suppressor`]): a model type lists lifecycle events
//!   (`updating`, `deleting`, ...) that are always cancelled. Registered once
//!   per type when it boots.
//! - **Attribute guarding** ([`guard`]): every attribute write is checked
//!   against an allow-list (`prevent_new_assignments` + `fillable`) and a
//!   read-only list. Blocked writes are dropped silently.
//!
//! Attribute names match across naming conventions: a read-only `created_at`
//! also blocks `createdAt`, `CreatedAt` and `CREATED_AT` (see [`attributes`]).
//!
//! ## Layout
//!
//! - [`attributes`]: values, assignment outcomes, casing variants
//! - [`store`]: the [`store::AttributeStore`] trait and the plain in-memory store
//! - [`guard`]: [`guard::GuardedAttributeStore`], the filtering wrapper
//! - [`events`]: lifecycle events, the [`events::EventBus`] trait and [`events::Dispatcher`]
//! - [`suppressor`]: per-type event suppression
//! - [`model`]: [`model::ModelType`] and [`model::Model`]
//! - [`repository`]: in-memory persistence that fires lifecycle events
//! - [`config`]: TOML/env loading of guard settings

pub mod attributes;
pub mod config;
pub mod error;
pub mod events;
pub mod guard;
pub mod model;
pub mod repository;
pub mod store;
pub mod suppressor;

#[cfg(test)]
mod test_utils;

pub use attributes::{AssignOutcome, AttrValue, Attributes, Rejection};
pub use config::GuardConfig;
pub use error::{GuardError, Result};
pub use events::{Dispatcher, EventBus, EventId, LifecycleEvent, Propagation};
pub use guard::GuardedAttributeStore;
pub use model::{FillReport, Model, ModelType};
pub use repository::Repository;
pub use store::AttributeStore;

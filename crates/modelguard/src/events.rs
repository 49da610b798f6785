//! # Lifecycle Events
//!
//! Persistence operations fire named events before and after they touch
//! storage. Listeners subscribe per model type through the [`EventBus`] trait;
//! a listener returning [`Propagation::Halt`] from a "before" event cancels the
//! operation.
//!
//! | Operation | Before | After |
//! |-----------|--------|-------|
//! | any save | `saving` | `saved` |
//! | insert | `creating` | `created` |
//! | update | `updating` | `updated` |
//! | delete | `deleting` | `deleted` |
//! | restore | `restoring` | `restored` |
//!
//! Event identifiers are scoped to one model type and render as
//! `model.<event>: <type>`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::GuardError;

/// Named phases of a persistence operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleEvent {
    Creating,
    Created,
    Updating,
    Updated,
    Saving,
    Saved,
    Deleting,
    Deleted,
    Restoring,
    Restored,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 10] = [
        LifecycleEvent::Creating,
        LifecycleEvent::Created,
        LifecycleEvent::Updating,
        LifecycleEvent::Updated,
        LifecycleEvent::Saving,
        LifecycleEvent::Saved,
        LifecycleEvent::Deleting,
        LifecycleEvent::Deleted,
        LifecycleEvent::Restoring,
        LifecycleEvent::Restored,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::Creating => "creating",
            LifecycleEvent::Created => "created",
            LifecycleEvent::Updating => "updating",
            LifecycleEvent::Updated => "updated",
            LifecycleEvent::Saving => "saving",
            LifecycleEvent::Saved => "saved",
            LifecycleEvent::Deleting => "deleting",
            LifecycleEvent::Deleted => "deleted",
            LifecycleEvent::Restoring => "restoring",
            LifecycleEvent::Restored => "restored",
        }
    }

    /// Fired before storage is touched; a halt here cancels the operation.
    pub fn is_before(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::Creating
                | LifecycleEvent::Updating
                | LifecycleEvent::Saving
                | LifecycleEvent::Deleting
                | LifecycleEvent::Restoring
        )
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecycleEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| GuardError::UnknownEvent(s.to_string()))
    }
}

/// A lifecycle event scoped to one model type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventId {
    pub event: LifecycleEvent,
    pub model: String,
}

impl EventId {
    pub fn new(event: LifecycleEvent, model: impl Into<String>) -> Self {
        Self {
            event,
            model: model.into(),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model.{}: {}", self.event, self.model)
    }
}

/// What a listener wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Keep going.
    #[default]
    Continue,
    /// Stop remaining listeners and cancel the operation.
    Halt,
}

pub type Listener = Box<dyn Fn(&EventId) -> Propagation>;

/// Subscription side of an event dispatcher.
pub trait EventBus {
    fn subscribe(&mut self, id: EventId, listener: Listener);
}

/// In-memory event dispatcher.
///
/// Single-threaded: listeners carry no `Send` bound and are run in the order
/// they were subscribed.
#[derive(Default)]
pub struct Dispatcher {
    listeners: HashMap<EventId, Vec<Listener>>,
    booted: HashSet<String>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run listeners for `id` until one halts.
    pub fn dispatch(&self, id: &EventId) -> Propagation {
        let Some(listeners) = self.listeners.get(id) else {
            return Propagation::Continue;
        };
        for listener in listeners {
            if listener(id) == Propagation::Halt {
                debug!(event = %id, "event halted");
                return Propagation::Halt;
            }
        }
        Propagation::Continue
    }

    pub fn has_listeners(&self, id: &EventId) -> bool {
        self.listener_count(id) > 0
    }

    pub fn listener_count(&self, id: &EventId) -> usize {
        self.listeners.get(id).map_or(0, Vec::len)
    }

    /// Total number of listeners across all events.
    pub fn total_listeners(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Drop every listener for `id`.
    pub fn forget(&mut self, id: &EventId) {
        self.listeners.remove(id);
    }

    /// Run `hook` once for the model type `type_name`.
    ///
    /// Returns false when the type was already booted on this dispatcher.
    pub fn boot_with<F>(&mut self, type_name: &str, hook: F) -> bool
    where
        F: FnOnce(&mut Self),
    {
        if !self.booted.insert(type_name.to_string()) {
            return false;
        }
        debug!(model = type_name, "booting model type");
        hook(self);
        true
    }

    pub fn is_booted(&self, type_name: &str) -> bool {
        self.booted.contains(type_name)
    }
}

impl EventBus for Dispatcher {
    fn subscribe(&mut self, id: EventId, listener: Listener) {
        trace!(event = %id, "listener subscribed");
        self.listeners.entry(id).or_default().push(listener);
    }
}

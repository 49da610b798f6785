//! # Event Suppression
//!
//! Cancels chosen lifecycle events for a whole model type. Each configured
//! event gets a listener that always halts, so e.g. suppressing `deleting`
//! stops every delete of that type before storage is touched while saves keep
//! working.
//!
//! Registration runs once per type, from [`bootstrap`]. Making that happen
//! only once is the dispatcher's job (see [`crate::events::Dispatcher::boot_with`]).

use tracing::debug;

use crate::events::{EventBus, EventId, LifecycleEvent, Propagation};
use crate::model::ModelType;

/// Subscribe a halting listener for each of `events`, scoped to `type_name`.
///
/// Returns how many listeners were registered. An empty `events` slice
/// registers nothing.
pub fn register_suppressions<B>(bus: &mut B, events: &[LifecycleEvent], type_name: &str) -> usize
where
    B: EventBus + ?Sized,
{
    if events.is_empty() {
        return 0;
    }

    for event in events {
        let id = EventId::new(*event, type_name);
        debug!(event = %id, "suppressing lifecycle event");
        bus.subscribe(id, Box::new(|_| Propagation::Halt));
    }
    events.len()
}

/// Per-type bootstrap hook: suppress the type's read-only events.
pub fn bootstrap<M, B>(bus: &mut B) -> usize
where
    M: ModelType,
    B: EventBus + ?Sized,
{
    let config = M::guard_config();
    register_suppressions(bus, &config.read_only_events, M::type_name())
}

//! # Repository
//!
//! In-memory persistence for models. Every operation fires its lifecycle
//! events through the owned [`Dispatcher`], so suppressed events cancel
//! the operation before any row changes.
//!
//! ## Operations
//!
//! - `save`: `saving` → `creating` | `updating` → write → `created` | `updated` → `saved`.
//!   An existing model with no changes skips the update events.
//! - `delete`: `deleting` → remove row (or stamp `deleted_at`) → `deleted`.
//! - `restore`: `restoring` → clear `deleted_at` and save → `restored`.
//!
//! A halted "before" event makes the operation return `Ok(false)`.
//!
//! ## Booting
//!
//! Each model type is booted the first time the repository touches it (or
//! explicitly via [`Repository::boot`]). Booting registers the type's
//! suppressed events and happens once per repository.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::attributes::{AttrValue, Attributes};
use crate::error::{GuardError, Result};
use crate::events::{Dispatcher, EventId, LifecycleEvent, Propagation};
use crate::model::{Model, ModelType, CREATED_AT, DELETED_AT, UPDATED_AT};
use crate::suppressor::bootstrap;

#[derive(Default)]
pub struct Repository {
    dispatcher: Dispatcher,
    tables: HashMap<&'static str, HashMap<Uuid, Attributes>>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a dispatcher that already has listeners attached.
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            tables: HashMap::new(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Boot `M` if it has not been booted yet. Returns true if it ran now.
    pub fn boot<M: ModelType>(&mut self) -> bool {
        self.dispatcher.boot_with(M::type_name(), |dispatcher| {
            bootstrap::<M, _>(dispatcher);
        })
    }

    /// Insert or update a model.
    pub fn save<M: ModelType>(&mut self, model: &mut Model<M>) -> Result<bool> {
        self.boot::<M>();

        if self.fire::<M>(LifecycleEvent::Saving) == Propagation::Halt {
            return Ok(false);
        }

        let persisted = match model.key().filter(|_| model.exists()) {
            Some(key) => self.perform_update(model, key)?,
            None => self.perform_insert(model),
        };
        if !persisted {
            return Ok(false);
        }

        self.fire::<M>(LifecycleEvent::Saved);
        model.sync_original();
        Ok(true)
    }

    /// Delete a model; soft-delete types are stamped instead of removed.
    ///
    /// Returns `Ok(false)` for a model that was never saved.
    pub fn delete<M: ModelType>(&mut self, model: &mut Model<M>) -> Result<bool> {
        self.boot::<M>();

        let Some(key) = model.key().filter(|_| model.exists()) else {
            return Ok(false);
        };

        if self.fire::<M>(LifecycleEvent::Deleting) == Propagation::Halt {
            return Ok(false);
        }

        if M::soft_deletes() {
            let now = timestamp();
            model.force_set(DELETED_AT, now.clone());
            if M::timestamps() {
                model.force_set(UPDATED_AT, now);
            }
            let row = self.row_mut::<M>(key)?;
            *row = model.attributes().clone();
            model.sync_original();
        } else {
            self.table_mut::<M>()
                .remove(&key)
                .ok_or(GuardError::ModelNotFound(key))?;
            model.mark_removed();
        }

        debug!(model = M::type_name(), %key, "deleted");
        self.fire::<M>(LifecycleEvent::Deleted);
        Ok(true)
    }

    /// Undo a soft delete. Returns `Ok(false)` if there was nothing to restore.
    pub fn restore<M: ModelType>(&mut self, model: &mut Model<M>) -> Result<bool> {
        self.boot::<M>();

        if !model.trashed() {
            return Ok(false);
        }

        if self.fire::<M>(LifecycleEvent::Restoring) == Propagation::Halt {
            return Ok(false);
        }

        let deleted_at = model
            .get_attribute(DELETED_AT)
            .cloned()
            .unwrap_or(AttrValue::Null);
        model.force_set(DELETED_AT, AttrValue::Null);

        let saved = self.save(model);
        if !matches!(saved, Ok(true)) {
            // The row is still trashed; keep the model in step with it.
            model.force_set(DELETED_AT, deleted_at);
            return saved;
        }

        self.fire::<M>(LifecycleEvent::Restored);
        Ok(true)
    }

    pub fn find<M: ModelType>(&mut self, key: Uuid) -> Result<Model<M>> {
        self.boot::<M>();
        let values = self
            .tables
            .get(M::type_name())
            .and_then(|table| table.get(&key))
            .cloned()
            .ok_or(GuardError::ModelNotFound(key))?;
        Ok(Model::from_row(key, values))
    }

    /// Number of stored rows for `M`, soft-deleted ones included.
    pub fn count<M: ModelType>(&self) -> usize {
        self.tables.get(M::type_name()).map_or(0, HashMap::len)
    }

    fn perform_insert<M: ModelType>(&mut self, model: &mut Model<M>) -> bool {
        if self.fire::<M>(LifecycleEvent::Creating) == Propagation::Halt {
            return false;
        }

        if M::timestamps() {
            let now = timestamp();
            model.force_set(CREATED_AT, now.clone());
            model.force_set(UPDATED_AT, now);
        }

        let key = Uuid::new_v4();
        self.table_mut::<M>().insert(key, model.attributes().clone());
        model.mark_persisted(key);
        debug!(model = M::type_name(), %key, "inserted");

        self.fire::<M>(LifecycleEvent::Created);
        true
    }

    fn perform_update<M: ModelType>(&mut self, model: &mut Model<M>, key: Uuid) -> Result<bool> {
        if !model.is_dirty() {
            return Ok(true);
        }

        if self.fire::<M>(LifecycleEvent::Updating) == Propagation::Halt {
            return Ok(false);
        }

        if M::timestamps() {
            model.force_set(UPDATED_AT, timestamp());
        }

        let row = self.row_mut::<M>(key)?;
        *row = model.attributes().clone();
        debug!(model = M::type_name(), %key, "updated");

        self.fire::<M>(LifecycleEvent::Updated);
        Ok(true)
    }

    fn fire<M: ModelType>(&self, event: LifecycleEvent) -> Propagation {
        self.dispatcher.dispatch(&EventId::new(event, M::type_name()))
    }

    fn table_mut<M: ModelType>(&mut self) -> &mut HashMap<Uuid, Attributes> {
        self.tables.entry(M::type_name()).or_default()
    }

    fn row_mut<M: ModelType>(&mut self, key: Uuid) -> Result<&mut Attributes> {
        self.table_mut::<M>()
            .get_mut(&key)
            .ok_or(GuardError::ModelNotFound(key))
    }
}

fn timestamp() -> AttrValue {
    AttrValue::String(Utc::now().to_rfc3339())
}

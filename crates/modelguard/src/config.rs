//! # Configuration
//!
//! A model type's guard settings can be written down in code (by overriding
//! [`crate::model::ModelType`] methods) or loaded from TOML with [`confique`].
//!
//! ## Loading Order
//!
//! Values are resolved in priority order:
//! 1. **Environment variables**: `MODELGUARD_PREVENT_NEW_ASSIGNMENTS`.
//! 2. **TOML file**: the path given to [`GuardConfig::load`].
//! 3. **Compiled Defaults**: nothing suppressed, nothing protected.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `read_only_events` | `[]` | Lifecycle events cancelled for the type |
//! | `read_only_attributes` | `[]` | Attributes the guarded setter never changes |
//! | `prevent_new_assignments` | `false` | Only `fillable` attributes may be set |
//! | `fillable` | `[]` | Attributes open to assignment |
//!
//! ```toml
//! read_only_events = ["updating", "deleting"]
//! read_only_attributes = ["created_at"]
//! prevent_new_assignments = true
//! fillable = ["title", "body"]
//! ```

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::LifecycleEvent;

/// Guard settings for one model type.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GuardConfig {
    /// Lifecycle events that are always cancelled for this model type.
    #[config(default = [])]
    pub read_only_events: Vec<LifecycleEvent>,

    /// Attribute names the guarded setter refuses to change, in any casing.
    #[config(default = [])]
    pub read_only_attributes: Vec<String>,

    /// When true, only attributes listed in `fillable` can be assigned.
    #[config(default = false, env = "MODELGUARD_PREVENT_NEW_ASSIGNMENTS")]
    pub prevent_new_assignments: bool,

    /// Attribute names open to assignment.
    #[config(default = [])]
    pub fillable: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            read_only_events: Vec::new(),
            read_only_attributes: Vec::new(),
            prevent_new_assignments: false,
            fillable: Vec::new(),
        }
    }
}

impl GuardConfig {
    /// Load from environment and a TOML file, falling back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::builder().env().file(path.as_ref()).load()?)
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// A commented sample file listing every setting.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    pub fn has_read_only_events(&self) -> bool {
        !self.read_only_events.is_empty()
    }

    /// False when attribute writes are never filtered.
    pub fn is_guarded(&self) -> bool {
        self.prevent_new_assignments || !self.read_only_attributes.is_empty()
    }
}

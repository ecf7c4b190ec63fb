//! Component validators and their dispatch table.
//!
//! Each component kind implements [`Validator`]; the runner looks
//! validators up by component type through [`ValidatorRegistry`].

pub mod skill;

use crate::models::component::{Component, PluginContext};
use crate::models::ValidationResult;
use std::collections::BTreeMap;

pub use skill::SkillValidator;

/// Validation capability for one component kind.
///
/// Implementations must be pure so one instance can serve many threads.
pub trait Validator: Send + Sync {
    /// Component type recorded on results, e.g. `skill`.
    fn component_type(&self) -> &'static str;
    /// Directory under the plugin root holding one folder per component.
    fn component_dir(&self) -> &'static str;
    /// Exact file name expected inside each component folder.
    fn canonical_file(&self) -> &'static str;
    fn validate(&self, component: &Component, context: &PluginContext) -> ValidationResult;
}

/// Component type to validator mapping.
pub struct ValidatorRegistry {
    by_type: BTreeMap<&'static str, Box<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn empty() -> Self {
        ValidatorRegistry {
            by_type: BTreeMap::new(),
        }
    }

    /// Register a validator, replacing any previous one for the same type.
    pub fn register(&mut self, validator: Box<dyn Validator>) {
        self.by_type.insert(validator.component_type(), validator);
    }

    pub fn get(&self, component_type: &str) -> Option<&dyn Validator> {
        self.by_type.get(component_type).map(|v| v.as_ref())
    }

    /// Validators in component-type order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Validator> {
        self.by_type.values().map(|v| v.as_ref())
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        let mut reg = Self::empty();
        reg.register(Box::new(SkillValidator));
        reg
    }
}

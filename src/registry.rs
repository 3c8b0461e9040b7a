use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::SpecError;
use crate::spec::TrainSpec;

/// Name-keyed store of train specs with a freeze lifecycle: construct,
/// register during startup, freeze, then read-only for the process lifetime.
pub struct TrainSpecRegistry {
    specs: HashMap<String, Arc<TrainSpec>>,
    frozen: bool,
}

impl TrainSpecRegistry {
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
            frozen: false,
        }
    }

    pub fn register(&mut self, spec: TrainSpec) -> Result<(), SpecError> {
        if self.frozen {
            return Err(SpecError::RegistryFrozen { name: spec.name });
        }
        if self.specs.contains_key(&spec.name) {
            return Err(SpecError::DuplicateSpec { name: spec.name });
        }

        tracing::info!(name = %spec.name, flavors = ?spec.flavors.names(), "registered train spec");
        self.specs.insert(spec.name.clone(), Arc::new(spec));
        Ok(())
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn get(&self, name: &str) -> Result<Arc<TrainSpec>, SpecError> {
        self.specs
            .get(name)
            .cloned()
            .ok_or_else(|| SpecError::UnknownSpec {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> Vec<String> {
        self.specs.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for TrainSpecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub static REGISTRY: Lazy<RwLock<TrainSpecRegistry>> =
    Lazy::new(|| RwLock::new(TrainSpecRegistry::new()));

pub fn register_train_spec(spec: TrainSpec) -> Result<(), SpecError> {
    REGISTRY.write().register(spec)
}

pub fn get_train_spec(name: &str) -> Result<Arc<TrainSpec>, SpecError> {
    REGISTRY.read().get(name)
}

pub fn freeze_registry() {
    REGISTRY.write().freeze();
}

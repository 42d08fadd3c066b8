//! Validator registry - name-based lookup of validators

use super::*;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds a validator from an option map
pub type ValidatorFactory =
    Arc<dyn Fn(&serde_json::Value) -> Result<Arc<dyn Validator>, String> + Send + Sync>;

/// What a registry name resolves to
#[derive(Clone)]
enum Registration {
    /// Built fresh from the options on every lookup
    Factory(ValidatorFactory),

    /// Shared instance; lookup options are ignored
    Instance(Arc<dyn Validator>),
}

/// Registry of validators available by name
#[derive(Clone)]
pub struct ValidatorRegistry {
    registrations: HashMap<String, Registration>,
}

impl ValidatorRegistry {
    /// Create a new validator registry
    pub fn new() -> Self {
        let mut registry = Self::empty();

        // Register built-in validators
        registry.register_builtin_validators();

        registry
    }

    /// Create a registry without the built-in validators
    pub fn empty() -> Self {
        Self {
            registrations: HashMap::new(),
        }
    }

    /// Register all built-in validators
    fn register_builtin_validators(&mut self) {
        self.register_builtin::<builtin::Digits>("digits");
        self.register_builtin::<builtin::InArray>("in_array");
        self.register_builtin::<builtin::NotEmpty>("not_empty");
        self.register_builtin::<builtin::RegexMatch>("regex");
        self.register_builtin::<builtin::StringLength>("string_length");

        debug!("✅ Registered {} built-in validators", self.registrations.len());
    }

    fn register_builtin<V>(&mut self, name: &str)
    where
        V: Validator + Default + 'static,
    {
        self.register_factory(
            name,
            Arc::new(|options: &serde_json::Value| {
                let mut validator = V::default();
                validator.initialize(options)?;
                Ok(Arc::new(validator) as Arc<dyn Validator>)
            }),
        );
    }

    /// Register a factory; it receives the lookup options on every resolve
    pub fn register_factory(&mut self, name: &str, factory: ValidatorFactory) {
        debug!("Registering validator factory: {}", name);
        self.registrations
            .insert(name.to_string(), Registration::Factory(factory));
    }

    /// Register a shared validator instance
    pub fn register_validator(&mut self, name: &str, validator: Arc<dyn Validator>) {
        debug!("Registering validator: {} ({})", name, validator.validator_type());
        self.registrations
            .insert(name.to_string(), Registration::Instance(validator));
    }

    /// Get a validator by name, building it with empty options if needed
    pub fn get(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.resolve(name, &serde_json::Value::Null).ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registrations.contains_key(name)
    }

    /// Get all validator names, sorted
    pub fn validator_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registrations.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve a validator by name
    ///
    /// # Returns
    /// * `Ok(validator)` - A new instance (factories) or the shared instance
    /// * `Err(ChainError::NotFound)` - Nothing registered under `name`
    /// * `Err(ChainError::Initialization)` - The factory rejected `options`
    pub fn resolve(
        &self,
        name: &str,
        options: &serde_json::Value,
    ) -> Result<Arc<dyn Validator>, ChainError> {
        match self.registrations.get(name) {
            Some(Registration::Factory(factory)) => {
                debug!("Building validator '{}'", name);
                factory(options).map_err(|reason| ChainError::Initialization {
                    name: name.to_string(),
                    reason,
                })
            }
            Some(Registration::Instance(validator)) => Ok(Arc::clone(validator)),
            None => Err(ChainError::NotFound(name.to_string())),
        }
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.validator_names())
            .finish()
    }
}

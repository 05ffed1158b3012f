use crate::descriptor::TypeDescriptor;
use crate::error::{GetterError, Result};
use crate::registry::{self, GetterRegistry};
use config::Config;
use serde::de::DeserializeOwned;
use std::any::type_name;
use tracing::trace;

/// Typed read access to a [`Config`] that consults a [`GetterRegistry`] first.
///
/// A registered custom getter for the requested type always wins. Types
/// without one fall back to the source's own serde deserialization.
///
/// # Example
/// ```rust
/// use config::{Config, File, FileFormat};
/// use jicoco_config::{DurationMillis, GetterRegistry, TypedConfig};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::builder()
///     .add_source(File::from_str("timeout = 500\nname = \"jvb\"", FileFormat::Toml))
///     .build()?;
///
/// let registry = GetterRegistry::new();
/// registry.register(DurationMillis);
///
/// let typed = TypedConfig::with_registry(&config, &registry);
/// assert_eq!(typed.get::<Duration>("timeout")?, Duration::from_millis(500));
/// assert_eq!(typed.get::<String>("name")?, "jvb");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypedConfig<'a> {
    config: &'a Config,
    registry: &'a GetterRegistry,
}

impl<'a> TypedConfig<'a> {
    /// Reads `config` through the process-wide registry.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config, registry: registry::global() }
    }

    #[must_use]
    pub const fn with_registry(config: &'a Config, registry: &'a GetterRegistry) -> Self {
        Self { config, registry }
    }

    #[must_use]
    pub const fn config(&self) -> &'a Config {
        self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &'a GetterRegistry {
        self.registry
    }

    /// Resolves `key` as a `T`.
    ///
    /// # Errors
    /// * [`GetterError::Malformed`] if `key` is empty.
    /// * [`GetterError::MissingKey`] if `key` is absent.
    /// * Any error produced by the custom getter or the serde fallback.
    pub fn get<T: DeserializeOwned + 'static>(&self, key: &str) -> Result<T> {
        validate_key(key)?;

        if let Some(getter) = self.registry.lookup::<T>() {
            trace!(key, target = type_name::<T>(), custom = true, "Resolving config value");
            return getter.get::<T>(key, self.config);
        }

        trace!(key, target = type_name::<T>(), custom = false, "Resolving config value");
        self.config.get::<T>(key).map_err(|e| GetterError::from_config(key, e))
    }

    /// Resolves `key` strictly through a registered custom getter.
    ///
    /// # Errors
    /// Returns [`GetterError::NoGetter`] if nothing is registered for `T`,
    /// otherwise whatever the getter returns.
    pub fn get_custom<T: 'static>(&self, key: &str) -> Result<T> {
        validate_key(key)?;

        let descriptor = TypeDescriptor::of::<T>();
        let getter =
            self.registry.lookup_descriptor(&descriptor).ok_or_else(|| GetterError::NoGetter {
                message: descriptor.name().into(),
                context: Some(key.to_owned().into()),
            })?;
        getter.get::<T>(key, self.config)
    }

    /// Like [`TypedConfig::get`], but a missing key yields `Ok(None)`.
    ///
    /// # Errors
    /// Every failure other than a missing key is propagated.
    pub fn get_optional<T: DeserializeOwned + 'static>(&self, key: &str) -> Result<Option<T>> {
        match self.get::<T>(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_missing_key() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Like [`TypedConfig::get`], but a missing key yields `default`.
    ///
    /// # Errors
    /// Every failure other than a missing key is propagated.
    pub fn get_or<T: DeserializeOwned + 'static>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get_optional::<T>(key)?.unwrap_or(default))
    }

    #[must_use]
    pub fn has_custom<T: 'static>(&self) -> bool {
        self.registry.contains::<T>()
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(GetterError::malformed("", "Config key cannot be empty"));
    }
    Ok(())
}

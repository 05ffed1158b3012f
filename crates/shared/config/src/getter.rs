use crate::error::Result;
use config::Config;
use std::fmt;
use std::marker::PhantomData;

/// Custom retrieval logic producing a [`Self::Output`] from a [`Config`].
///
/// Implementors read the value at `key` and build the typed result. The only
/// side effect allowed is reading from `config`.
///
/// # Errors
/// * [`GetterError::MissingKey`](crate::GetterError::MissingKey) when `key` is absent.
/// * [`GetterError::Conversion`](crate::GetterError::Conversion) when the source
///   cannot coerce the raw value.
/// * [`GetterError::Malformed`](crate::GetterError::Malformed) when the raw value
///   is rejected by the getter itself.
///
/// # Example
/// ```rust
/// use jicoco_config::{CustomGetter, GetterError, Result};
/// use config::Config;
///
/// struct Port;
///
/// impl CustomGetter for Port {
///     type Output = u16;
///
///     fn get(&self, key: &str, config: &Config) -> Result<u16> {
///         let raw = config.get_int(key).map_err(|e| GetterError::from_config(key, e))?;
///         u16::try_from(raw).map_err(|e| GetterError::malformed(key.to_owned(), e.to_string()))
///     }
/// }
/// ```
pub trait CustomGetter: Send + Sync + 'static {
    type Output: Send + 'static;

    fn get(&self, key: &str, config: &Config) -> Result<Self::Output>;
}

/// A [`CustomGetter`] backed by a closure. Built with [`getter_fn`].
pub struct FnGetter<T, F> {
    f: F,
    _output: PhantomData<fn() -> T>,
}

impl<T, F> fmt::Debug for FnGetter<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGetter").field("output", &std::any::type_name::<T>()).finish()
    }
}

impl<T, F> CustomGetter for FnGetter<T, F>
where
    T: Send + 'static,
    F: Fn(&str, &Config) -> Result<T> + Send + Sync + 'static,
{
    type Output = T;

    fn get(&self, key: &str, config: &Config) -> Result<T> {
        (self.f)(key, config)
    }
}

/// Wraps a closure as a [`CustomGetter`].
///
/// ```rust
/// use jicoco_config::{getter_fn, GetterError, GetterRegistry};
///
/// let registry = GetterRegistry::new();
/// registry.register(getter_fn(|key, config| {
///     config
///         .get_string(key)
///         .map(|s| s.to_uppercase())
///         .map_err(|e| GetterError::from_config(key, e))
/// }));
/// assert!(registry.contains::<String>());
/// ```
pub const fn getter_fn<T, F>(f: F) -> FnGetter<T, F>
where
    T: Send + 'static,
    F: Fn(&str, &Config) -> Result<T> + Send + Sync + 'static,
{
    FnGetter { f, _output: PhantomData }
}

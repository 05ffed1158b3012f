use crate::descriptor::TypeDescriptor;
use crate::error::{GetterError, Result};
use crate::getter::CustomGetter;
use config::Config;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, type_name};
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::debug;

static GLOBAL: LazyLock<GetterRegistry> = LazyLock::new(GetterRegistry::new);

/// Returns the process-wide registry.
///
/// It starts empty and lives until the process exits.
#[must_use]
pub fn global() -> &'static GetterRegistry {
    &GLOBAL
}

/// Object-safe view of a [`CustomGetter`] with its output type erased.
trait ErasedGetter: Send + Sync {
    fn descriptor(&self) -> TypeDescriptor;
    fn getter_name(&self) -> &'static str;
    fn get_boxed(&self, key: &str, config: &Config) -> Result<Box<dyn Any + Send>>;
    fn as_any(&self) -> &dyn Any;
}

impl<G: CustomGetter> ErasedGetter for G {
    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::of::<G::Output>()
    }

    fn getter_name(&self) -> &'static str {
        type_name::<G>()
    }

    fn get_boxed(&self, key: &str, config: &Config) -> Result<Box<dyn Any + Send>> {
        let value = CustomGetter::get(self, key, config)?;
        Ok(Box::new(value))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A shared handle to a registered getter.
///
/// Cloning is cheap; all clones point to the same getter instance.
#[derive(Clone)]
pub struct RegisteredGetter {
    inner: Arc<dyn ErasedGetter>,
}

impl RegisteredGetter {
    fn new<G: CustomGetter>(getter: Arc<G>) -> Self {
        Self { inner: getter }
    }

    /// The type this getter produces.
    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        self.inner.descriptor()
    }

    /// Type name of the concrete getter.
    #[must_use]
    pub fn getter_name(&self) -> &'static str {
        self.inner.getter_name()
    }

    /// Runs the getter for `key` and returns its value as `T`.
    ///
    /// # Errors
    /// Returns [`GetterError::TypeMismatch`] if `T` is not the getter's output
    /// type. Otherwise, propagates the getter's own error unchanged.
    pub fn get<T: 'static>(&self, key: &str, config: &Config) -> Result<T> {
        let descriptor = self.descriptor();
        if !descriptor.is::<T>() {
            return Err(GetterError::TypeMismatch {
                expected: type_name::<T>().into(),
                actual: descriptor.name().into(),
                context: Some(self.getter_name().into()),
            });
        }

        let value = self.inner.get_boxed(key, config)?;
        value.downcast::<T>().map(|boxed| *boxed).map_err(|_| GetterError::TypeMismatch {
            expected: type_name::<T>().into(),
            actual: descriptor.name().into(),
            context: Some("Unexpected getter output".into()),
        })
    }

    /// Returns the concrete getter if it is a `G`.
    #[must_use]
    pub fn downcast_ref<G: CustomGetter>(&self) -> Option<&G> {
        self.inner.as_any().downcast_ref::<G>()
    }

    /// Whether both handles point to the same getter instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }

    /// Whether this handle points to `getter`.
    #[must_use]
    pub fn is_instance<G: CustomGetter>(&self, getter: &Arc<G>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(getter))
    }
}

impl fmt::Debug for RegisteredGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredGetter")
            .field("output", &self.descriptor().name())
            .field("getter", &self.getter_name())
            .finish()
    }
}

/// Maps a target type to the single getter able to produce it.
///
/// Registration is last-write-wins. Lookups clone the handle out of the map,
/// so getters run without the lock held.
#[derive(Debug, Default)]
pub struct GetterRegistry {
    getters: RwLock<FxHashMap<TypeDescriptor, RegisteredGetter>>,
}

impl GetterRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `getter` for its output type, replacing any previous entry.
    ///
    /// Returns the replaced handle, if any.
    ///
    /// # Examples
    /// ```rust
    /// use jicoco_config::{DurationMillis, GetterRegistry};
    /// use std::time::Duration;
    ///
    /// let registry = GetterRegistry::new();
    /// assert!(registry.register(DurationMillis).is_none());
    /// assert!(registry.lookup::<Duration>().is_some());
    /// ```
    pub fn register<G: CustomGetter>(&self, getter: G) -> Option<RegisteredGetter> {
        self.register_shared(Arc::new(getter))
    }

    /// Registers a getter the caller keeps a reference to.
    pub fn register_shared<G: CustomGetter>(&self, getter: Arc<G>) -> Option<RegisteredGetter> {
        self.insert(RegisteredGetter::new(getter))
    }

    /// Registers `getter` under an explicit descriptor.
    ///
    /// # Errors
    /// Returns [`GetterError::TypeMismatch`] if `descriptor` is not the
    /// getter's output type. The registry is left unchanged in that case.
    pub fn register_as<G: CustomGetter>(
        &self,
        descriptor: TypeDescriptor,
        getter: G,
    ) -> Result<Option<RegisteredGetter>> {
        let produced = TypeDescriptor::of::<G::Output>();
        if descriptor != produced {
            return Err(GetterError::TypeMismatch {
                expected: descriptor.name().into(),
                actual: produced.name().into(),
                context: Some(type_name::<G>().into()),
            });
        }
        Ok(self.register(getter))
    }

    fn insert(&self, handle: RegisteredGetter) -> Option<RegisteredGetter> {
        let descriptor = handle.descriptor();
        let getter = handle.getter_name();
        let previous = self.getters.write().insert(descriptor, handle);
        debug!(
            output = descriptor.name(),
            getter,
            replaced = previous.is_some(),
            "Custom getter registered"
        );
        previous
    }

    /// Returns the getter registered for `T`, if any.
    #[must_use]
    pub fn lookup<T: 'static>(&self) -> Option<RegisteredGetter> {
        self.lookup_descriptor(&TypeDescriptor::of::<T>())
    }

    /// Returns the getter registered under `descriptor`, if any.
    #[must_use]
    pub fn lookup_descriptor(&self, descriptor: &TypeDescriptor) -> Option<RegisteredGetter> {
        self.getters.read().get(descriptor).cloned()
    }

    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.getters.read().contains_key(&TypeDescriptor::of::<T>())
    }

    /// Removes and returns the getter registered for `T`.
    pub fn remove<T: 'static>(&self) -> Option<RegisteredGetter> {
        let removed = self.getters.write().remove(&TypeDescriptor::of::<T>());
        if removed.is_some() {
            debug!(output = type_name::<T>(), "Custom getter removed");
        }
        removed
    }

    /// Drops every registered getter.
    ///
    /// Returns the number of entries that were removed.
    pub fn clear(&self) -> usize {
        let count = {
            let mut getters = self.getters.write();
            let count = getters.len();
            getters.clear();
            count
        };
        debug!(count, "Custom getter registry cleared");
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.getters.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.getters.read().is_empty()
    }

    /// Registered output types (for diagnostics).
    #[must_use]
    pub fn descriptors(&self) -> Vec<TypeDescriptor> {
        self.getters.read().keys().copied().collect()
    }
}

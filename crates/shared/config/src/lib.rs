//! # Custom typed getters
//!
//! A type-keyed registry of pluggable getters for a hierarchical
//! [`config::Config`]. A getter knows how to turn the raw value at a key into
//! one specific Rust type; the registry files it under that type so a generic
//! resolver can find it without hard-coding every supported type.
//!
//! * [`CustomGetter`] is the contract. Its `Output` type binds a getter to its
//!   registry entry at compile time.
//! * [`GetterRegistry`] holds at most one getter per output type
//!   (last-write-wins). [`global()`] is the process-wide instance.
//! * [`TypedConfig`] reads a `Config` through a registry and falls back to
//!   serde when no getter is registered.
//!
//! Thread-safe: `FxHashMap` + `parking_lot::RwLock`, getters run without the
//! lock held.
//!
//! # Example
//!
//! ```rust
//! use config::{Config, File, FileFormat};
//! use jicoco_config::{DurationMillis, GetterError, GetterRegistry, TypedConfig};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = GetterRegistry::new();
//! registry.register(DurationMillis);
//!
//! let config = Config::builder()
//!     .add_source(File::from_str("timeout = 500", FileFormat::Toml))
//!     .build()?;
//! let typed = TypedConfig::with_registry(&config, &registry);
//!
//! assert_eq!(typed.get::<Duration>("timeout")?, Duration::from_millis(500));
//! assert!(matches!(
//!     typed.get::<Duration>("missing"),
//!     Err(GetterError::MissingKey { .. })
//! ));
//! # Ok(())
//! # }
//! ```

mod builtins;
mod descriptor;
mod error;
mod getter;
pub mod prelude;
mod registry;
mod source;

pub use builtins::{DurationMillis, HumanDuration, register_builtins};
pub use descriptor::TypeDescriptor;
pub use error::{GetterError, GetterErrorExt, Result};
pub use getter::{CustomGetter, FnGetter, getter_fn};
pub use registry::{GetterRegistry, RegisteredGetter, global};
pub use source::TypedConfig;

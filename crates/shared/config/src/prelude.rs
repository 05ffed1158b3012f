pub use crate::{
    CustomGetter, GetterError, GetterErrorExt, GetterRegistry, RegisteredGetter, TypeDescriptor,
    TypedConfig, getter_fn,
};

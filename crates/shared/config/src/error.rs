use std::borrow::Cow;

/// Errors produced while resolving a typed value from a config source.
///
/// Every variant carries an optional `context` that callers attach with
/// [`GetterErrorExt::context`].
#[derive(Debug, thiserror::Error)]
pub enum GetterError {
    /// The requested key does not exist in the config source.
    #[error("Missing config key{}: {key}", format_context(.context))]
    MissingKey { key: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The key exists but the source could not coerce its value.
    #[error("Config conversion error{} at '{key}': {source}", format_context(.context))]
    Conversion {
        key: Cow<'static, str>,
        #[source]
        source: config::ConfigError,
        context: Option<Cow<'static, str>>,
    },

    /// The raw value was read but the getter rejected it.
    #[error("Malformed config value{} at '{key}': {message}", format_context(.context))]
    Malformed {
        key: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A getter was asked to produce, or filed under, a type it does not produce.
    #[error("Getter type mismatch{}: expected {expected}, got {actual}", format_context(.context))]
    TypeMismatch {
        expected: Cow<'static, str>,
        actual: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// No custom getter is registered for the requested type.
    #[error("No custom getter{}: {message}", format_context(.context))]
    NoGetter { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

pub type Result<T> = std::result::Result<T, GetterError>;

impl GetterError {
    pub fn missing_key(key: impl Into<Cow<'static, str>>) -> Self {
        Self::MissingKey { key: key.into(), context: None }
    }

    pub fn malformed(
        key: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Malformed { key: key.into(), message: message.into(), context: None }
    }

    /// Classifies an error returned by [`config::Config`] for `key`.
    ///
    /// `NotFound` becomes [`GetterError::MissingKey`]; anything else is a
    /// [`GetterError::Conversion`].
    pub fn from_config(key: &str, err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(_) => Self::missing_key(key.to_owned()),
            source => Self::Conversion { key: key.to_owned().into(), source, context: None },
        }
    }

    #[must_use]
    pub const fn is_missing_key(&self) -> bool {
        matches!(self, Self::MissingKey { .. })
    }
}

pub trait GetterErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> GetterErrorExt<T> for Result<T> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                GetterError::MissingKey { context: c, .. }
                | GetterError::Conversion { context: c, .. }
                | GetterError::Malformed { context: c, .. }
                | GetterError::TypeMismatch { context: c, .. }
                | GetterError::NoGetter { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> GetterErrorExt<T> for std::result::Result<T, config::ConfigError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| {
            let key = match &source {
                config::ConfigError::NotFound(key)
                | config::ConfigError::Type { key: Some(key), .. } => key.clone(),
                _ => String::new(),
            };
            let mut err = GetterError::from_config(&key, source);
            if let GetterError::MissingKey { context: c, .. }
            | GetterError::Conversion { context: c, .. } = &mut err
            {
                *c = Some(context.into());
            }
            err
        })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

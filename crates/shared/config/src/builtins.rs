//! Getters shipped with the crate.

use crate::error::{GetterError, Result};
use crate::getter::CustomGetter;
use crate::registry::GetterRegistry;
use config::{Config, ConfigError, Value, ValueKind};
use std::time::Duration;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Reads an integer number of milliseconds as a [`Duration`].
///
/// Strings holding a plain integer are accepted as well. Floats, booleans,
/// tables and arrays are rejected with [`GetterError::Malformed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationMillis;

impl CustomGetter for DurationMillis {
    type Output = Duration;

    fn get(&self, key: &str, config: &Config) -> Result<Duration> {
        match raw_kind(key, config)? {
            ValueKind::String(raw) => {
                let millis = raw.trim().parse::<i64>().map_err(|_| {
                    GetterError::from_config(
                        key,
                        ConfigError::Message(format!(
                            "invalid type: string \"{raw}\", expected an integer"
                        )),
                    )
                })?;
                non_negative_millis(key, i128::from(millis))
            },
            kind => match integer(&kind) {
                Some(millis) => non_negative_millis(key, millis),
                None => Err(unsupported(key, &kind)),
            },
        }
    }
}

/// Reads a [`Duration`] written as `<amount><unit>`, e.g. `"250ms"` or `"5 seconds"`.
///
/// An integer value is taken as milliseconds. Supported units are `ms`, `s`,
/// `m`, `h`, `d` and their long forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanDuration;

impl CustomGetter for HumanDuration {
    type Output = Duration;

    fn get(&self, key: &str, config: &Config) -> Result<Duration> {
        match raw_kind(key, config)? {
            ValueKind::String(raw) => parse_duration(&raw).ok_or_else(|| {
                GetterError::malformed(key.to_owned(), format!("Invalid duration '{raw}'"))
            }),
            kind => match integer(&kind) {
                Some(millis) => non_negative_millis(key, millis),
                None => Err(unsupported(key, &kind)),
            },
        }
    }
}

fn raw_kind(key: &str, config: &Config) -> Result<ValueKind> {
    config.get::<Value>(key).map(|value| value.kind).map_err(|e| GetterError::from_config(key, e))
}

fn integer(kind: &ValueKind) -> Option<i128> {
    match *kind {
        ValueKind::I64(v) => Some(i128::from(v)),
        ValueKind::I128(v) => Some(v),
        ValueKind::U64(v) => Some(i128::from(v)),
        ValueKind::U128(v) => i128::try_from(v).ok(),
        _ => None,
    }
}

fn non_negative_millis(key: &str, millis: i128) -> Result<Duration> {
    u64::try_from(millis).map(Duration::from_millis).map_err(|_| {
        GetterError::malformed(key.to_owned(), format!("Duration out of range: {millis}"))
    })
}

fn unsupported(key: &str, kind: &ValueKind) -> GetterError {
    let found = match kind {
        ValueKind::Nil => "nil",
        ValueKind::Boolean(_) => "boolean",
        ValueKind::Float(_) => "float",
        ValueKind::String(_) => "string",
        ValueKind::Table(_) => "table",
        ValueKind::Array(_) => "array",
        _ => "integer",
    };
    GetterError::malformed(key.to_owned(), format!("Expected a duration, found a {found}"))
}

fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let split = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    let (amount, unit) = raw.split_at(split);
    if amount.is_empty() {
        return None;
    }
    let amount: u64 = amount.parse().ok()?;

    let duration = match unit.trim() {
        "" | "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => {
            Duration::from_millis(amount)
        },
        "s" | "second" | "seconds" => Duration::from_secs(amount),
        "m" | "minute" | "minutes" => Duration::from_secs(amount.checked_mul(SECS_PER_MINUTE)?),
        "h" | "hour" | "hours" => Duration::from_secs(amount.checked_mul(SECS_PER_HOUR)?),
        "d" | "day" | "days" => Duration::from_secs(amount.checked_mul(SECS_PER_DAY)?),
        _ => return None,
    };
    Some(duration)
}

/// Installs the default getters into `registry`.
///
/// Currently, [`HumanDuration`] for [`Duration`].
pub fn register_builtins(registry: &GetterRegistry) {
    registry.register(HumanDuration);
}

#![allow(dead_code, unreachable_pub)]

use config::{Config, File, FileFormat, Value};
use jicoco_config::{CustomGetter, GetterError, Result};

pub const KNOWN_KEY: &str = "known.key";

/// Builds an in-memory TOML source.
pub fn toml_source(toml: &str) -> Config {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .expect("fixture TOML should parse")
}

/// Builds an in-memory TOML source with `key` overridden by `value`.
pub fn override_source(toml: &str, key: &str, value: impl Into<Value>) -> Config {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .set_override(key, value)
        .expect("override key should be valid")
        .build()
        .expect("fixture TOML should parse")
}

/// Target type only reachable through a custom getter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting(pub String);

/// Returns a fixed greeting for [`KNOWN_KEY`] and fails for anything else.
#[derive(Debug)]
pub struct FixedGreeting {
    pub id: u32,
    pub value: &'static str,
}

impl CustomGetter for FixedGreeting {
    type Output = Greeting;

    fn get(&self, key: &str, _config: &Config) -> Result<Greeting> {
        if key == KNOWN_KEY {
            Ok(Greeting(self.value.to_owned()))
        } else {
            Err(GetterError::missing_key(key.to_owned()))
        }
    }
}

/// Tags its output with an id so tests can tell instances apart.
#[derive(Debug)]
pub struct Tagged(pub u32);

impl CustomGetter for Tagged {
    type Output = u32;

    fn get(&self, _key: &str, _config: &Config) -> Result<u32> {
        Ok(self.0)
    }
}

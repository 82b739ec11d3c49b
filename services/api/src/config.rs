//! API service settings
//!
//! Read from `WEFAVES__*` environment variables through the `config` crate,
//! e.g. `WEFAVES__BIND_ADDRESS=127.0.0.1:8080`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Which request field feeds `typedCount` when a history entry is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypedCountSource {
    /// Read the misspelled `typeCount` field; clients sending `typedCount`
    /// get 0 stored. Matches the behaviour existing clients were built on.
    #[default]
    Legacy,
    /// Read `typedCount`
    Corrected,
}

impl TypedCountSource {
    /// Name of the request field this source reads
    pub const fn field_name(self) -> &'static str {
        match self {
            TypedCountSource::Legacy => "typeCount",
            TypedCountSource::Corrected => "typedCount",
        }
    }
}

/// API service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Socket address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Source field for `typedCount` on history creation
    #[serde(default)]
    pub typed_count_source: TypedCountSource,
}

fn default_bind_address() -> String {
    "0.0.0.0:3001".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            typed_count_source: TypedCountSource::default(),
        }
    }
}

impl Settings {
    /// Load settings from `WEFAVES__*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("WEFAVES").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("WEFAVES__BIND_ADDRESS");
            std::env::remove_var("WEFAVES__TYPED_COUNT_SOURCE");
        }
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        clear_env();

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:3001");
        assert_eq!(settings.typed_count_source, TypedCountSource::Legacy);
    }

    #[test]
    #[serial]
    fn test_settings_from_env() {
        clear_env();
        unsafe {
            std::env::set_var("WEFAVES__BIND_ADDRESS", "127.0.0.1:8080");
            std::env::set_var("WEFAVES__TYPED_COUNT_SOURCE", "corrected");
        }

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.typed_count_source, TypedCountSource::Corrected);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_settings_reject_unknown_source() {
        clear_env();
        unsafe {
            std::env::set_var("WEFAVES__TYPED_COUNT_SOURCE", "sometimes");
        }

        assert!(Settings::from_env().is_err());

        clear_env();
    }

    #[test]
    fn test_field_names() {
        assert_eq!(TypedCountSource::Legacy.field_name(), "typeCount");
        assert_eq!(TypedCountSource::Corrected.field_name(), "typedCount");
    }
}

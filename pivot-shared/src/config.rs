//! Option-map helpers shared across the platform layer
//!
//! Engine configuration arrives as a string-keyed map of loosely typed
//! values. This module provides the value type, the coercion rules for the
//! boolean options the platform reads, and the catalogue of option keys.

use crate::exception::{PivotError, PivotResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recognized option keys.
pub mod settings {
    /// Whether the coordinator handle may be cached across transactions.
    pub const CACHE_COORDINATOR: &str = "pivot.platform.cache_coordinator";

    /// Whether the user-transaction handle may be cached across transactions.
    pub const CACHE_USER_TRANSACTION: &str = "pivot.platform.cache_user_transaction";

    /// Directory bind name of the coordinator handle.
    pub const COORDINATOR_NAME: &str = "pivot.platform.coordinator_name";

    /// Directory bind name of the user-transaction handle.
    pub const USER_TRANSACTION_NAME: &str = "pivot.platform.user_transaction_name";

    /// Which deployment environment to assemble ("directory" or "unmanaged").
    pub const ENVIRONMENT: &str = "pivot.platform.environment";
}

/// A loosely typed configuration value as found in an engine option map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl ConfigValue {
    /// Boolean coercion: native booleans pass through, strings accept
    /// "true"/"false" (case-insensitive). Anything else is not a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            ConfigValue::Str(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            ConfigValue::Int(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_string())
    }
}

/// Option map as handed over by the engine at configuration time.
pub type ConfigValues = HashMap<String, ConfigValue>;

/// Read an optional boolean option. Absent keys yield `None`; present but
/// non-coercible values are a configuration error rather than a silent
/// fallback.
pub fn optional_boolean_setting(values: &ConfigValues, key: &str) -> PivotResult<Option<bool>> {
    match values.get(key) {
        None => Ok(None),
        Some(value) => value.as_bool().map(Some).ok_or_else(|| {
            PivotError::configuration(format!("option '{}' is not a boolean: {:?}", key, value))
        }),
    }
}

/// Read a boolean option, falling back to `default` when absent.
pub fn boolean_setting(values: &ConfigValues, key: &str, default: bool) -> PivotResult<bool> {
    Ok(optional_boolean_setting(values, key)?.unwrap_or(default))
}

/// Read an optional string option.
pub fn string_setting(values: &ConfigValues, key: &str) -> PivotResult<Option<String>> {
    match values.get(key) {
        None => Ok(None),
        Some(value) => value.as_str().map(|s| Some(s.to_string())).ok_or_else(|| {
            PivotError::configuration(format!("option '{}' is not a string: {:?}", key, value))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(entries: &[(&str, ConfigValue)]) -> ConfigValues {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_boolean_from_native_bool() {
        let values = values(&[(settings::CACHE_COORDINATOR, ConfigValue::Bool(false))]);
        assert_eq!(
            boolean_setting(&values, settings::CACHE_COORDINATOR, true).unwrap(),
            false
        );
    }

    #[test]
    fn test_boolean_from_string() {
        let values = values(&[
            (settings::CACHE_COORDINATOR, ConfigValue::from("TRUE")),
            (settings::CACHE_USER_TRANSACTION, ConfigValue::from("false")),
        ]);
        assert_eq!(
            boolean_setting(&values, settings::CACHE_COORDINATOR, false).unwrap(),
            true
        );
        assert_eq!(
            boolean_setting(&values, settings::CACHE_USER_TRANSACTION, true).unwrap(),
            false
        );
    }

    #[test]
    fn test_absent_key_uses_default() {
        let values = ConfigValues::new();
        assert!(boolean_setting(&values, settings::CACHE_COORDINATOR, true).unwrap());
        assert_eq!(
            optional_boolean_setting(&values, settings::CACHE_COORDINATOR).unwrap(),
            None
        );
    }

    #[test]
    fn test_unparseable_boolean_is_a_configuration_error() {
        let values = values(&[(settings::CACHE_COORDINATOR, ConfigValue::from("maybe"))]);
        let error = boolean_setting(&values, settings::CACHE_COORDINATOR, true).unwrap_err();
        assert!(matches!(error, crate::PivotError::Configuration(_)));
    }

    #[test]
    fn test_integer_is_not_a_boolean() {
        let values = values(&[(settings::CACHE_COORDINATOR, ConfigValue::Int(1))]);
        assert!(boolean_setting(&values, settings::CACHE_COORDINATOR, true).is_err());
    }

    #[test]
    fn test_option_map_deserializes_from_json() {
        let values: ConfigValues = serde_json::from_str(
            r#"{
                "pivot.platform.cache_coordinator": false,
                "pivot.platform.cache_user_transaction": "true",
                "pivot.platform.environment": "directory"
            }"#,
        )
        .unwrap();

        assert_eq!(
            boolean_setting(&values, settings::CACHE_COORDINATOR, true).unwrap(),
            false
        );
        assert_eq!(
            boolean_setting(&values, settings::CACHE_USER_TRANSACTION, false).unwrap(),
            true
        );
        assert_eq!(
            string_setting(&values, settings::ENVIRONMENT).unwrap().as_deref(),
            Some("directory")
        );
    }

    #[test]
    fn test_string_setting() {
        let values = values(&[(
            settings::COORDINATOR_NAME,
            ConfigValue::from("transaction/coordinator"),
        )]);
        assert_eq!(
            string_setting(&values, settings::COORDINATOR_NAME)
                .unwrap()
                .as_deref(),
            Some("transaction/coordinator")
        );
        assert_eq!(
            string_setting(&values, settings::USER_TRANSACTION_NAME).unwrap(),
            None
        );
    }
}

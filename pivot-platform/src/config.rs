//! Platform configuration
//!
//! Read once at assembly time from the engine's option map (or built
//! programmatically) and immutable afterward.

use pivot_shared::{
    optional_boolean_setting, settings, string_setting, ConfigValues, PivotError, PivotResult,
};
use serde::{Deserialize, Serialize};

use crate::environments::DirectoryNames;

/// Per-capability cache overrides. `None` defers to the environment
/// variant's default (coordinator caching on, user-transaction caching
/// off, unless the variant says otherwise).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    pub cache_coordinator: Option<bool>,
    pub cache_user_transaction: Option<bool>,
}

impl PlatformSettings {
    pub fn from_values(values: &ConfigValues) -> PivotResult<Self> {
        Ok(Self {
            cache_coordinator: optional_boolean_setting(values, settings::CACHE_COORDINATOR)?,
            cache_user_transaction: optional_boolean_setting(
                values,
                settings::CACHE_USER_TRANSACTION,
            )?,
        })
    }
}

/// Configuration of the directory-based environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Bind name of the coordinator handle; the well-known default applies
    /// when absent.
    pub coordinator_name: Option<String>,
    /// Bind name of the user-transaction handle.
    pub user_transaction_name: Option<String>,
}

impl DirectoryConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (label, name) in [
            ("coordinator_name", &self.coordinator_name),
            ("user_transaction_name", &self.user_transaction_name),
        ] {
            if let Some(name) = name {
                if name.trim().is_empty() {
                    return Err(format!("{} must not be empty", label));
                }
            }
        }
        Ok(())
    }

    pub fn names(&self) -> DirectoryNames {
        let defaults = DirectoryNames::default();
        DirectoryNames {
            coordinator: self
                .coordinator_name
                .clone()
                .unwrap_or(defaults.coordinator),
            user_transaction: self
                .user_transaction_name
                .clone()
                .unwrap_or(defaults.user_transaction),
        }
    }
}

/// Which deployment environment to assemble. Environments carrying live
/// handles (`ProvidedEnvironment`) are constructed programmatically and
/// have no configuration representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvironmentConfig {
    Directory(DirectoryConfig),
    Unmanaged,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        EnvironmentConfig::Unmanaged
    }
}

/// Complete platform configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub environment: EnvironmentConfig,
    pub settings: PlatformSettings,
}

impl PlatformConfig {
    /// Build the configuration from an engine option map. The environment
    /// selector defaults to "unmanaged" when absent; an unrecognized
    /// selector is a configuration error.
    pub fn from_values(values: &ConfigValues) -> PivotResult<Self> {
        let environment = match string_setting(values, settings::ENVIRONMENT)?.as_deref() {
            None | Some("unmanaged") => EnvironmentConfig::Unmanaged,
            Some("directory") => EnvironmentConfig::Directory(DirectoryConfig {
                coordinator_name: string_setting(values, settings::COORDINATOR_NAME)?,
                user_transaction_name: string_setting(values, settings::USER_TRANSACTION_NAME)?,
            }),
            Some(other) => {
                return Err(PivotError::configuration(format!(
                    "unknown environment '{}'",
                    other
                )))
            }
        };
        Ok(Self {
            environment,
            settings: PlatformSettings::from_values(values)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_shared::ConfigValue;

    fn values(entries: &[(&str, ConfigValue)]) -> ConfigValues {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_settings_default_to_deferred() {
        let settings = PlatformSettings::from_values(&ConfigValues::new()).unwrap();
        assert_eq!(settings.cache_coordinator, None);
        assert_eq!(settings.cache_user_transaction, None);
    }

    #[test]
    fn test_settings_overrides() {
        let settings = PlatformSettings::from_values(&values(&[
            (settings::CACHE_COORDINATOR, ConfigValue::Bool(false)),
            (settings::CACHE_USER_TRANSACTION, ConfigValue::from("true")),
        ]))
        .unwrap();
        assert_eq!(settings.cache_coordinator, Some(false));
        assert_eq!(settings.cache_user_transaction, Some(true));
    }

    #[test]
    fn test_directory_names_fall_back_to_defaults() {
        let config = DirectoryConfig {
            coordinator_name: Some("custom/tm".to_string()),
            user_transaction_name: None,
        };
        let names = config.names();
        assert_eq!(names.coordinator, "custom/tm");
        assert_eq!(names.user_transaction, "transaction/user");
    }

    #[test]
    fn test_empty_bind_name_is_invalid() {
        let config = DirectoryConfig {
            coordinator_name: Some("  ".to_string()),
            user_transaction_name: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_selector() {
        let config = PlatformConfig::from_values(&values(&[
            (settings::ENVIRONMENT, ConfigValue::from("directory")),
            (settings::COORDINATOR_NAME, ConfigValue::from("env/tm")),
        ]))
        .unwrap();
        match config.environment {
            EnvironmentConfig::Directory(directory) => {
                assert_eq!(directory.coordinator_name.as_deref(), Some("env/tm"));
            }
            other => panic!("expected directory environment, got {:?}", other),
        }
    }

    #[test]
    fn test_environment_defaults_to_unmanaged() {
        let config = PlatformConfig::from_values(&ConfigValues::new()).unwrap();
        assert_eq!(config.environment, EnvironmentConfig::Unmanaged);
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = PlatformConfig {
            environment: EnvironmentConfig::Directory(DirectoryConfig {
                coordinator_name: Some("env/tm".to_string()),
                user_transaction_name: None,
            }),
            settings: PlatformSettings {
                cache_coordinator: Some(false),
                cache_user_transaction: None,
            },
        };

        let encoded = serde_json::to_string(&config).unwrap();
        let decoded: PlatformConfig = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_unknown_environment_is_rejected() {
        let error =
            PlatformConfig::from_values(&values(&[(
                settings::ENVIRONMENT,
                ConfigValue::from("clustered"),
            )]))
            .unwrap_err();
        assert!(matches!(error, PivotError::Configuration(_)));
    }
}

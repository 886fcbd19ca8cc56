//! Factory functions assembling a platform from configuration.

use pivot_shared::{ConfigValues, PivotError, PivotResult};
use std::sync::Arc;
use tracing::debug;

use crate::config::{EnvironmentConfig, PlatformConfig};
use crate::directory::DirectoryService;
use crate::environments::{DirectoryEnvironment, TransactionEnvironment, UnmanagedEnvironment};
use crate::platform::Platform;

/// Create the discovery strategy selected by the configuration. The
/// directory variant needs the host's directory service.
pub fn create_environment(
    config: &EnvironmentConfig,
    directory: Option<Arc<dyn DirectoryService>>,
) -> PivotResult<Arc<dyn TransactionEnvironment>> {
    match config {
        EnvironmentConfig::Directory(directory_config) => {
            directory_config
                .validate()
                .map_err(PivotError::configuration)?;
            let directory = directory.ok_or_else(|| {
                PivotError::configuration(
                    "directory environment requires a directory service",
                )
            })?;
            let names = directory_config.names();
            debug!(
                coordinator = %names.coordinator,
                user_transaction = %names.user_transaction,
                "assembling directory environment"
            );
            Ok(Arc::new(DirectoryEnvironment::with_names(directory, names)))
        }
        EnvironmentConfig::Unmanaged => {
            debug!("assembling unmanaged environment");
            Ok(Arc::new(UnmanagedEnvironment))
        }
    }
}

/// Assemble a platform from a complete configuration.
pub fn create_platform(
    config: &PlatformConfig,
    directory: Option<Arc<dyn DirectoryService>>,
) -> PivotResult<Platform> {
    let environment = create_environment(&config.environment, directory)?;
    Ok(Platform::new(environment, config.settings.clone()))
}

/// Assemble a platform straight from an engine option map.
pub fn create_platform_from_values(
    values: &ConfigValues,
    directory: Option<Arc<dyn DirectoryService>>,
) -> PivotResult<Platform> {
    let config = PlatformConfig::from_values(values)?;
    create_platform(&config, directory)
}

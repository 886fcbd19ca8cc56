//! Transaction-platform integration layer
//!
//! This crate is the seam between a persistence engine and the
//! distributed-transaction machinery of whatever environment it is deployed
//! in. Hosts differ in how their coordinator is discovered (directory
//! lookup, injected handles, none at all) and in how completion callbacks
//! are registered; the [`Platform`] facade hides both behind one capability
//! surface:
//!
//! - handle retrieval with optional per-capability caching
//! - transaction-identity resolution for active transactions
//! - synchronization (completion-callback) registration
//! - current-status queries
//!
//! Discovery is pluggable through [`environments::TransactionEnvironment`],
//! registration through [`synchronization::SynchronizationStrategy`], and
//! [`factory`] assembles the whole thing from engine configuration.

pub mod config;
pub mod directory;
pub mod environments;
pub mod factory;
pub mod platform;
pub mod synchronization;

pub use config::{DirectoryConfig, EnvironmentConfig, PlatformConfig, PlatformSettings};
pub use directory::{DirectoryEntry, DirectoryService};
pub use environments::{
    DirectoryEnvironment, DirectoryNames, ProvidedEnvironment, TransactionEnvironment,
    UnmanagedEnvironment,
};
pub use factory::{create_environment, create_platform, create_platform_from_values};
pub use platform::{Platform, PlatformCore};
pub use synchronization::{
    CoordinatorAccess, CoordinatorSynchronizationStrategy, RegistrySynchronizationStrategy,
    SynchronizationRegistry, SynchronizationRegistryAccess, SynchronizationStrategy,
};

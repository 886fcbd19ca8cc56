//! Shared boundary types for the pivot transaction-platform layer
//!
//! Everything the facade crate and its consumers agree on lives here:
//! the error taxonomy, transaction status codes, the collaborator traits
//! for the host environment's transaction machinery, and option-map
//! helpers for engine configuration.

pub mod config;
pub mod exception;
pub mod status;
pub mod transaction;

pub use config::{
    boolean_setting, optional_boolean_setting, settings, string_setting, ConfigValue, ConfigValues,
};
pub use exception::{PivotError, PivotResult};
pub use status::TransactionStatus;
pub use transaction::{
    CoordinatedTransaction, Synchronization, TransactionCoordinator, TransactionIdentity,
    UserTransaction,
};

//! Deployment-environment discovery strategies
//!
//! One variant per way a host environment exposes its transaction handles:
//! - [`DirectoryEnvironment`] resolves handles through the naming directory
//! - [`ProvidedEnvironment`] carries handles injected at construction
//! - [`UnmanagedEnvironment`] is the absence of a coordinator
//!
//! The facade depends only on the [`TransactionEnvironment`] trait; a
//! variant supplies the two locate operations and may tune the caching
//! defaults and the transaction-identity policy.

use async_trait::async_trait;
use pivot_shared::{
    CoordinatedTransaction, PivotResult, TransactionCoordinator, TransactionIdentity,
    UserTransaction,
};
use std::sync::Arc;

pub mod directory;
pub mod provided;
pub mod unmanaged;

pub use directory::{DirectoryEnvironment, DirectoryNames};
pub use provided::ProvidedEnvironment;
pub use unmanaged::UnmanagedEnvironment;

/// Discovery strategy for one deployment environment.
///
/// Each locate operation performs a fresh discovery and is free of side
/// effects, so retrying it on a later call is always safe. An environment
/// that cannot currently produce a handle fails with
/// `PivotError::Discovery`; "unavailable" is never an empty success.
#[async_trait]
pub trait TransactionEnvironment: Send + Sync {
    async fn locate_coordinator(&self) -> PivotResult<Arc<dyn TransactionCoordinator>>;

    async fn locate_user_transaction(&self) -> PivotResult<Arc<dyn UserTransaction>>;

    /// Coordinator handles are stable in most environments.
    fn cache_coordinator_by_default(&self) -> bool {
        true
    }

    /// User-transaction handles are frequently rotated per transaction, so
    /// re-discovery is the safe default.
    fn cache_user_transaction_by_default(&self) -> bool {
        false
    }

    /// Identity policy for active-transaction objects. The default treats
    /// the handle itself as the identity; environments that hand out a
    /// fresh proxy per call must override this.
    fn transaction_identifier(
        &self,
        transaction: &Arc<dyn CoordinatedTransaction>,
    ) -> TransactionIdentity {
        TransactionIdentity::of(transaction)
    }
}

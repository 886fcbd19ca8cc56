//! Boundary traits for the host environment's transaction machinery
//!
//! The platform layer never implements a coordinator or a two-phase-commit
//! protocol itself; it only holds handles supplied by the deployment
//! environment. These traits are that boundary: the coordinator, the
//! transaction object it currently manages, the application-facing
//! user-transaction handle, and the completion callback a persistence
//! engine enlists.

use crate::exception::PivotResult;
use crate::status::TransactionStatus;
use async_trait::async_trait;
use std::sync::Arc;

/// Handle to the distributed-transaction coordinator of the host
/// environment. Starts, completes, and reports on transactions; the
/// platform layer treats it as opaque and environment-managed.
#[async_trait]
pub trait TransactionCoordinator: Send + Sync {
    async fn begin(&self) -> PivotResult<()>;

    async fn commit(&self) -> PivotResult<()>;

    async fn rollback(&self) -> PivotResult<()>;

    /// Status of the transaction currently associated with the caller,
    /// `NoTransaction` when none is.
    async fn status(&self) -> PivotResult<TransactionStatus>;

    /// The transaction object currently associated with the caller, if any.
    async fn current_transaction(&self)
        -> PivotResult<Option<Arc<dyn CoordinatedTransaction>>>;
}

/// A transaction currently managed by the coordinator. This is the object
/// completion callbacks are registered against.
#[async_trait]
pub trait CoordinatedTransaction: Send + Sync {
    async fn status(&self) -> PivotResult<TransactionStatus>;

    async fn register_synchronization(
        &self,
        synchronization: Arc<dyn Synchronization>,
    ) -> PivotResult<()>;
}

/// Application-facing handle for demarcating a unit of work. Distinct from
/// the coordinator; some environments expose only one of the two.
#[async_trait]
pub trait UserTransaction: Send + Sync {
    async fn begin(&self) -> PivotResult<()>;

    async fn commit(&self) -> PivotResult<()>;

    async fn rollback(&self) -> PivotResult<()>;

    async fn status(&self) -> PivotResult<TransactionStatus>;
}

/// Completion callback invoked by the environment around transaction
/// completion. Callbacks run on the environment's completion path and must
/// not block on the transaction they are enlisted in.
pub trait Synchronization: Send + Sync {
    fn before_completion(&self);

    fn after_completion(&self, status: TransactionStatus);
}

/// Opaque identity of an active-transaction object.
///
/// The default policy treats the transaction handle itself as its own
/// identity (pointer identity of the shared handle). Environments that hand
/// out a fresh proxy object per call for the same logical transaction must
/// supply their own policy via `TransactionEnvironment::transaction_identifier`
/// and build identities with [`TransactionIdentity::from_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionIdentity(u64);

impl TransactionIdentity {
    /// Reference identity of the given transaction handle.
    pub fn of(transaction: &Arc<dyn CoordinatedTransaction>) -> Self {
        TransactionIdentity(Arc::as_ptr(transaction) as *const () as usize as u64)
    }

    /// Identity from an environment-computed token, for hosts where object
    /// identity does not coincide with logical-transaction identity.
    pub fn from_token(token: u64) -> Self {
        TransactionIdentity(token)
    }
}

impl std::fmt::Display for TransactionIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "txn:{:x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::PivotError;

    struct FixedStatusTransaction {
        status: TransactionStatus,
    }

    #[async_trait]
    impl CoordinatedTransaction for FixedStatusTransaction {
        async fn status(&self) -> PivotResult<TransactionStatus> {
            Ok(self.status)
        }

        async fn register_synchronization(
            &self,
            _synchronization: Arc<dyn Synchronization>,
        ) -> PivotResult<()> {
            Err(PivotError::transaction("registration not supported"))
        }
    }

    fn transaction(status: TransactionStatus) -> Arc<dyn CoordinatedTransaction> {
        Arc::new(FixedStatusTransaction { status })
    }

    #[test]
    fn test_identity_is_stable_across_calls() {
        let txn = transaction(TransactionStatus::Active);
        assert_eq!(TransactionIdentity::of(&txn), TransactionIdentity::of(&txn));
    }

    #[test]
    fn test_identity_follows_the_handle_not_the_clone() {
        let txn = transaction(TransactionStatus::Active);
        let alias = txn.clone();
        assert_eq!(TransactionIdentity::of(&txn), TransactionIdentity::of(&alias));
    }

    #[test]
    fn test_distinct_transactions_have_distinct_identities() {
        let a = transaction(TransactionStatus::Active);
        let b = transaction(TransactionStatus::Active);
        assert_ne!(TransactionIdentity::of(&a), TransactionIdentity::of(&b));
    }

    #[tokio::test]
    async fn test_boundary_trait_objects_are_usable_through_handles() {
        let txn = transaction(TransactionStatus::MarkedRollback);
        let status = txn.status().await.unwrap();
        assert_eq!(status, TransactionStatus::MarkedRollback);
        assert!(status.is_active());
    }

    #[test]
    fn test_token_identity() {
        assert_eq!(
            TransactionIdentity::from_token(42),
            TransactionIdentity::from_token(42)
        );
        assert_ne!(
            TransactionIdentity::from_token(42),
            TransactionIdentity::from_token(43)
        );
    }
}

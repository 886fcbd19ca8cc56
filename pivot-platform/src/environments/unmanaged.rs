//! The no-coordinator environment.

use async_trait::async_trait;
use pivot_shared::{PivotError, PivotResult, TransactionCoordinator, UserTransaction};
use std::sync::Arc;

use super::TransactionEnvironment;

/// Environment of a process that runs outside any transaction manager.
/// Every discovery fails; synchronization registration is therefore never
/// possible through a platform assembled on top of this variant.
#[derive(Debug, Default)]
pub struct UnmanagedEnvironment;

#[async_trait]
impl TransactionEnvironment for UnmanagedEnvironment {
    async fn locate_coordinator(&self) -> PivotResult<Arc<dyn TransactionCoordinator>> {
        Err(PivotError::discovery(
            "coordinator",
            "no transaction coordinator is available in an unmanaged environment",
        ))
    }

    async fn locate_user_transaction(&self) -> PivotResult<Arc<dyn UserTransaction>> {
        Err(PivotError::discovery(
            "user transaction",
            "no user transaction is available in an unmanaged environment",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_discovery_fails() {
        let env = UnmanagedEnvironment;
        assert!(matches!(
            env.locate_coordinator().await,
            Err(PivotError::Discovery { .. })
        ));
        assert!(matches!(
            env.locate_user_transaction().await,
            Err(PivotError::Discovery { .. })
        ));
    }
}

//! Discovery for embedded deployments where the handles are handed to the
//! platform at construction time (in-process coordinator, test harnesses).

use async_trait::async_trait;
use pivot_shared::{PivotError, PivotResult, TransactionCoordinator, UserTransaction};
use std::sync::Arc;

use super::TransactionEnvironment;

/// Carries handles injected by the embedding application. Discovery never
/// goes out to the host, so both handles are safe to cache.
pub struct ProvidedEnvironment {
    coordinator: Arc<dyn TransactionCoordinator>,
    user_transaction: Option<Arc<dyn UserTransaction>>,
}

impl ProvidedEnvironment {
    pub fn new(
        coordinator: Arc<dyn TransactionCoordinator>,
        user_transaction: Arc<dyn UserTransaction>,
    ) -> Self {
        Self {
            coordinator,
            user_transaction: Some(user_transaction),
        }
    }

    /// Some embedded deployments expose no application-facing transaction
    /// handle; locating one then fails like any other missing capability.
    pub fn coordinator_only(coordinator: Arc<dyn TransactionCoordinator>) -> Self {
        Self {
            coordinator,
            user_transaction: None,
        }
    }
}

#[async_trait]
impl TransactionEnvironment for ProvidedEnvironment {
    async fn locate_coordinator(&self) -> PivotResult<Arc<dyn TransactionCoordinator>> {
        Ok(self.coordinator.clone())
    }

    async fn locate_user_transaction(&self) -> PivotResult<Arc<dyn UserTransaction>> {
        self.user_transaction.clone().ok_or_else(|| {
            PivotError::discovery(
                "user transaction",
                "no user-transaction handle was provided to this environment",
            )
        })
    }

    fn cache_user_transaction_by_default(&self) -> bool {
        true
    }
}

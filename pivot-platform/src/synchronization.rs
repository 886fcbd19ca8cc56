//! Synchronization-registration strategies
//!
//! Enlisting a completion callback requires reaching the *currently active*
//! transaction, and environments differ in how much of it they expose. The
//! coordinator-based strategy asks the coordinator for its current
//! transaction object; the registry-based strategy goes through an
//! environment-provided synchronization registry for hosts that restrict
//! direct transaction-object access. The facade is agnostic to which
//! variant is installed.

use async_trait::async_trait;
use pivot_shared::{
    PivotError, PivotResult, Synchronization, TransactionCoordinator, TransactionStatus,
};
use std::sync::Arc;
use tracing::debug;

/// How a strategy reaches the coordinator. Satisfied by the platform's
/// cache core, so the strategy and the facade observe the same cache slot.
#[async_trait]
pub trait CoordinatorAccess: Send + Sync {
    async fn coordinator(&self) -> PivotResult<Arc<dyn TransactionCoordinator>>;
}

/// An environment-provided registry of completion callbacks, for hosts
/// where the transaction object itself is off limits.
#[async_trait]
pub trait SynchronizationRegistry: Send + Sync {
    async fn register_interposed_synchronization(
        &self,
        synchronization: Arc<dyn Synchronization>,
    ) -> PivotResult<()>;

    async fn transaction_status(&self) -> PivotResult<TransactionStatus>;
}

/// How a strategy reaches the synchronization registry.
#[async_trait]
pub trait SynchronizationRegistryAccess: Send + Sync {
    async fn synchronization_registry(&self) -> PivotResult<Arc<dyn SynchronizationRegistry>>;
}

/// Registers completion callbacks against the currently active transaction.
///
/// `register_synchronization` never registers partially: any failing step
/// surfaces as a single registration-failure error wrapping the cause.
#[async_trait]
pub trait SynchronizationStrategy: Send + Sync {
    /// Whether a registration attempted right now would succeed.
    async fn can_register_synchronization(&self) -> bool;

    async fn register_synchronization(
        &self,
        synchronization: Arc<dyn Synchronization>,
    ) -> PivotResult<()>;
}

/// Strategy for environments that expose the active transaction through the
/// coordinator.
pub struct CoordinatorSynchronizationStrategy {
    coordinator_access: Arc<dyn CoordinatorAccess>,
}

impl CoordinatorSynchronizationStrategy {
    pub fn new(coordinator_access: Arc<dyn CoordinatorAccess>) -> Self {
        Self { coordinator_access }
    }
}

#[async_trait]
impl SynchronizationStrategy for CoordinatorSynchronizationStrategy {
    async fn can_register_synchronization(&self) -> bool {
        let coordinator = match self.coordinator_access.coordinator().await {
            Ok(coordinator) => coordinator,
            Err(error) => {
                debug!(%error, "coordinator unavailable, cannot register synchronization");
                return false;
            }
        };
        match coordinator.status().await {
            Ok(status) => status.is_active(),
            Err(error) => {
                debug!(%error, "status query failed, cannot register synchronization");
                false
            }
        }
    }

    async fn register_synchronization(
        &self,
        synchronization: Arc<dyn Synchronization>,
    ) -> PivotResult<()> {
        let coordinator = self
            .coordinator_access
            .coordinator()
            .await
            .map_err(|e| PivotError::registration_caused("could not retrieve coordinator", e))?;

        let transaction = coordinator
            .current_transaction()
            .await
            .map_err(|e| {
                PivotError::registration_caused("could not access current transaction", e)
            })?
            .ok_or_else(|| PivotError::registration("no transaction is currently active"))?;

        transaction
            .register_synchronization(synchronization)
            .await
            .map_err(|e| {
                PivotError::registration_caused("transaction rejected the synchronization", e)
            })?;

        debug!("synchronization registered with current transaction");
        Ok(())
    }
}

/// Strategy for environments that expose a synchronization registry
/// instead of the transaction object.
pub struct RegistrySynchronizationStrategy {
    registry_access: Arc<dyn SynchronizationRegistryAccess>,
}

impl RegistrySynchronizationStrategy {
    pub fn new(registry_access: Arc<dyn SynchronizationRegistryAccess>) -> Self {
        Self { registry_access }
    }
}

#[async_trait]
impl SynchronizationStrategy for RegistrySynchronizationStrategy {
    async fn can_register_synchronization(&self) -> bool {
        let registry = match self.registry_access.synchronization_registry().await {
            Ok(registry) => registry,
            Err(error) => {
                debug!(%error, "synchronization registry unavailable");
                return false;
            }
        };
        match registry.transaction_status().await {
            Ok(status) => status.is_active(),
            Err(error) => {
                debug!(%error, "status query failed, cannot register synchronization");
                false
            }
        }
    }

    async fn register_synchronization(
        &self,
        synchronization: Arc<dyn Synchronization>,
    ) -> PivotResult<()> {
        let registry = self
            .registry_access
            .synchronization_registry()
            .await
            .map_err(|e| {
                PivotError::registration_caused("could not retrieve synchronization registry", e)
            })?;

        registry
            .register_interposed_synchronization(synchronization)
            .await
            .map_err(|e| {
                PivotError::registration_caused("registry rejected the synchronization", e)
            })
    }
}

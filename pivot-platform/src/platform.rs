//! The platform facade and its capability-access cache
//!
//! One `Platform` per persistence-engine instantiation. It composes the
//! environment's discovery strategy, per-capability caching, and the
//! installed synchronization strategy into the single surface the engine
//! consumes.
//!
//! Caching model, per capability slot: a slot fills at most once and is
//! never cleared, and only when caching is enabled for that capability.
//! With caching disabled the slot is never touched and every call
//! re-discovers. There is no invalidation path; a handle rotated by the
//! host while cached is an accepted risk of enabling the cache, not
//! something this layer detects. A failed discovery leaves the slot
//! unpopulated, so a later call retries. Steady-state reads of a populated
//! slot take no lock.

use async_trait::async_trait;
use pivot_shared::{
    CoordinatedTransaction, PivotResult, Synchronization, TransactionCoordinator,
    TransactionIdentity, TransactionStatus, UserTransaction,
};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::config::PlatformSettings;
use crate::environments::TransactionEnvironment;
use crate::synchronization::{
    CoordinatorAccess, CoordinatorSynchronizationStrategy, SynchronizationStrategy,
};

/// Discovery strategy plus the per-capability cache. Shared between the
/// facade and the installed synchronization strategy so both observe the
/// same slots.
pub struct PlatformCore {
    environment: Arc<dyn TransactionEnvironment>,
    cache_coordinator: bool,
    cache_user_transaction: bool,
    coordinator: OnceCell<Arc<dyn TransactionCoordinator>>,
    user_transaction: OnceCell<Arc<dyn UserTransaction>>,
}

impl PlatformCore {
    pub fn new(environment: Arc<dyn TransactionEnvironment>, settings: PlatformSettings) -> Self {
        let cache_coordinator = settings
            .cache_coordinator
            .unwrap_or_else(|| environment.cache_coordinator_by_default());
        let cache_user_transaction = settings
            .cache_user_transaction
            .unwrap_or_else(|| environment.cache_user_transaction_by_default());
        Self {
            environment,
            cache_coordinator,
            cache_user_transaction,
            coordinator: OnceCell::new(),
            user_transaction: OnceCell::new(),
        }
    }

    pub fn caches_coordinator(&self) -> bool {
        self.cache_coordinator
    }

    pub fn caches_user_transaction(&self) -> bool {
        self.cache_user_transaction
    }

    pub async fn retrieve_coordinator(&self) -> PivotResult<Arc<dyn TransactionCoordinator>> {
        if self.cache_coordinator {
            let coordinator = self
                .coordinator
                .get_or_try_init(|| async {
                    debug!("populating coordinator cache slot");
                    self.environment.locate_coordinator().await
                })
                .await?;
            Ok(coordinator.clone())
        } else {
            self.environment.locate_coordinator().await
        }
    }

    pub async fn retrieve_user_transaction(&self) -> PivotResult<Arc<dyn UserTransaction>> {
        if self.cache_user_transaction {
            let user_transaction = self
                .user_transaction
                .get_or_try_init(|| async {
                    debug!("populating user-transaction cache slot");
                    self.environment.locate_user_transaction().await
                })
                .await?;
            Ok(user_transaction.clone())
        } else {
            self.environment.locate_user_transaction().await
        }
    }

    pub fn transaction_identifier(
        &self,
        transaction: &Arc<dyn CoordinatedTransaction>,
    ) -> TransactionIdentity {
        self.environment.transaction_identifier(transaction)
    }
}

#[async_trait]
impl CoordinatorAccess for PlatformCore {
    async fn coordinator(&self) -> PivotResult<Arc<dyn TransactionCoordinator>> {
        self.retrieve_coordinator().await
    }
}

/// The capability surface consumed by the persistence engine.
pub struct Platform {
    core: Arc<PlatformCore>,
    synchronization: Arc<dyn SynchronizationStrategy>,
}

impl Platform {
    /// Platform with the coordinator-based synchronization strategy, wired
    /// to the same cache core the facade uses.
    pub fn new(environment: Arc<dyn TransactionEnvironment>, settings: PlatformSettings) -> Self {
        let core = Arc::new(PlatformCore::new(environment, settings));
        let synchronization = Arc::new(CoordinatorSynchronizationStrategy::new(
            core.clone() as Arc<dyn CoordinatorAccess>
        ));
        Self::from_parts(core, synchronization)
    }

    /// Platform with a caller-chosen synchronization strategy, for
    /// environments that restrict transaction-object access.
    pub fn with_strategy(
        environment: Arc<dyn TransactionEnvironment>,
        settings: PlatformSettings,
        synchronization: Arc<dyn SynchronizationStrategy>,
    ) -> Self {
        Self::from_parts(Arc::new(PlatformCore::new(environment, settings)), synchronization)
    }

    /// Assemble from an existing cache core, for strategies that need the
    /// core's `CoordinatorAccess` while observing the same cache slots as
    /// the facade.
    pub fn from_parts(
        core: Arc<PlatformCore>,
        synchronization: Arc<dyn SynchronizationStrategy>,
    ) -> Self {
        Self {
            core,
            synchronization,
        }
    }

    pub async fn retrieve_coordinator(&self) -> PivotResult<Arc<dyn TransactionCoordinator>> {
        self.core.retrieve_coordinator().await
    }

    /// Legacy alias for [`Platform::retrieve_coordinator`]; observes the
    /// same cache slot.
    pub async fn transaction_manager(&self) -> PivotResult<Arc<dyn TransactionCoordinator>> {
        self.retrieve_coordinator().await
    }

    pub async fn retrieve_user_transaction(&self) -> PivotResult<Arc<dyn UserTransaction>> {
        self.core.retrieve_user_transaction().await
    }

    pub fn transaction_identifier(
        &self,
        transaction: &Arc<dyn CoordinatedTransaction>,
    ) -> TransactionIdentity {
        self.core.transaction_identifier(transaction)
    }

    pub async fn register_synchronization(
        &self,
        synchronization: Arc<dyn Synchronization>,
    ) -> PivotResult<()> {
        self.synchronization
            .register_synchronization(synchronization)
            .await
    }

    pub async fn can_register_synchronization(&self) -> bool {
        self.synchronization.can_register_synchronization().await
    }

    /// Status of the transaction currently associated with the caller,
    /// queried through the (possibly cached) coordinator. Fails if the
    /// coordinator cannot be retrieved; the coordinator's own status
    /// failure propagates unchanged.
    pub async fn current_status(&self) -> PivotResult<TransactionStatus> {
        let coordinator = self.core.retrieve_coordinator().await?;
        coordinator.status().await
    }
}

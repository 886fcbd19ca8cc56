//! Naming-directory boundary
//!
//! Some deployment environments publish their transaction handles through a
//! naming directory. The platform only consumes the lookup operation; the
//! directory client itself is supplied by the host.

use async_trait::async_trait;
use pivot_shared::{PivotResult, TransactionCoordinator, UserTransaction};
use std::sync::Arc;

use crate::synchronization::SynchronizationRegistry;

/// A handle bound in the naming directory. Lookups are typed so that a name
/// bound to the wrong kind of handle surfaces as an explicit error instead
/// of a downcast failure.
#[derive(Clone)]
pub enum DirectoryEntry {
    Coordinator(Arc<dyn TransactionCoordinator>),
    UserTransaction(Arc<dyn UserTransaction>),
    SynchronizationRegistry(Arc<dyn SynchronizationRegistry>),
}

impl DirectoryEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            DirectoryEntry::Coordinator(_) => "coordinator",
            DirectoryEntry::UserTransaction(_) => "user-transaction",
            DirectoryEntry::SynchronizationRegistry(_) => "synchronization-registry",
        }
    }
}

impl std::fmt::Debug for DirectoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DirectoryEntry").field(&self.kind()).finish()
    }
}

/// Lookup service of the host's naming directory. Fails with
/// `PivotError::DirectoryLookup` when the name is unbound.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn lookup(&self, name: &str) -> PivotResult<DirectoryEntry>;
}

//! Directory-based discovery
//!
//! For environments that publish transaction handles in the naming
//! directory under well-known (but overridable) bind names.

use async_trait::async_trait;
use pivot_shared::{PivotError, PivotResult, TransactionCoordinator, UserTransaction};
use std::sync::Arc;
use tracing::debug;

use super::TransactionEnvironment;
use crate::directory::{DirectoryEntry, DirectoryService};

/// Bind names under which the handles are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNames {
    pub coordinator: String,
    pub user_transaction: String,
}

impl Default for DirectoryNames {
    fn default() -> Self {
        Self {
            coordinator: "transaction/coordinator".to_string(),
            user_transaction: "transaction/user".to_string(),
        }
    }
}

/// Discovers handles through the naming directory.
pub struct DirectoryEnvironment {
    directory: Arc<dyn DirectoryService>,
    names: DirectoryNames,
}

impl DirectoryEnvironment {
    pub fn new(directory: Arc<dyn DirectoryService>) -> Self {
        Self::with_names(directory, DirectoryNames::default())
    }

    pub fn with_names(directory: Arc<dyn DirectoryService>, names: DirectoryNames) -> Self {
        Self { directory, names }
    }

    pub fn names(&self) -> &DirectoryNames {
        &self.names
    }

    async fn lookup(&self, capability: &str, name: &str) -> PivotResult<DirectoryEntry> {
        debug!(capability, name, "looking up transaction handle");
        self.directory
            .lookup(name)
            .await
            .map_err(|e| PivotError::discovery(capability, format!("'{}': {}", name, e)))
    }
}

#[async_trait]
impl TransactionEnvironment for DirectoryEnvironment {
    async fn locate_coordinator(&self) -> PivotResult<Arc<dyn TransactionCoordinator>> {
        match self.lookup("coordinator", &self.names.coordinator).await? {
            DirectoryEntry::Coordinator(coordinator) => Ok(coordinator),
            other => Err(PivotError::discovery(
                "coordinator",
                format!(
                    "'{}' is bound to a {} handle",
                    self.names.coordinator,
                    other.kind()
                ),
            )),
        }
    }

    async fn locate_user_transaction(&self) -> PivotResult<Arc<dyn UserTransaction>> {
        match self
            .lookup("user transaction", &self.names.user_transaction)
            .await?
        {
            DirectoryEntry::UserTransaction(user_transaction) => Ok(user_transaction),
            other => Err(PivotError::discovery(
                "user transaction",
                format!(
                    "'{}' is bound to a {} handle",
                    self.names.user_transaction,
                    other.kind()
                ),
            )),
        }
    }
}

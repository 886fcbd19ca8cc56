//! Transaction status codes as reported by the coordinator
//!
//! Translation of these codes into engine-internal status tables is the
//! consumer's concern; this module only carries the codes and the
//! predicates the platform layer itself needs.

use serde::{Deserialize, Serialize};

/// Status of a coordinated transaction as reported by the coordinator
/// or the user-transaction handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// A transaction is associated and in the active state
    Active,
    /// A transaction is associated and has been marked for rollback
    MarkedRollback,
    /// A transaction is associated and has been prepared
    Prepared,
    /// The transaction has been committed
    Committed,
    /// The transaction has been rolled back
    RolledBack,
    /// The status could not be determined
    Unknown,
    /// No transaction is currently associated
    NoTransaction,
    /// The transaction is in the prepare phase
    Preparing,
    /// The transaction is in the commit phase
    Committing,
    /// The transaction is being rolled back
    RollingBack,
}

impl TransactionStatus {
    /// A synchronization may still be enlisted while the transaction is
    /// active, including when it has already been marked rollback-only.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Active | TransactionStatus::MarkedRollback
        )
    }

    pub fn is_rollback(&self) -> bool {
        matches!(
            self,
            TransactionStatus::MarkedRollback
                | TransactionStatus::RollingBack
                | TransactionStatus::RolledBack
        )
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, TransactionStatus::Committed)
    }

    /// Completed one way or the other.
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Committed | TransactionStatus::RolledBack
        )
    }

    /// Prepared but with an outcome this node cannot currently determine.
    pub fn is_in_doubt(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Prepared | TransactionStatus::Unknown
        )
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionStatus::Active => "active",
            TransactionStatus::MarkedRollback => "marked-rollback",
            TransactionStatus::Prepared => "prepared",
            TransactionStatus::Committed => "committed",
            TransactionStatus::RolledBack => "rolled-back",
            TransactionStatus::Unknown => "unknown",
            TransactionStatus::NoTransaction => "no-transaction",
            TransactionStatus::Preparing => "preparing",
            TransactionStatus::Committing => "committing",
            TransactionStatus::RollingBack => "rolling-back",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_includes_marked_rollback() {
        assert!(TransactionStatus::Active.is_active());
        assert!(TransactionStatus::MarkedRollback.is_active());
        assert!(!TransactionStatus::NoTransaction.is_active());
        assert!(!TransactionStatus::Committed.is_active());
    }

    #[test]
    fn test_rollback_states() {
        assert!(TransactionStatus::MarkedRollback.is_rollback());
        assert!(TransactionStatus::RollingBack.is_rollback());
        assert!(TransactionStatus::RolledBack.is_rollback());
        assert!(!TransactionStatus::Active.is_rollback());
    }

    #[test]
    fn test_completion_states() {
        assert!(TransactionStatus::Committed.is_complete());
        assert!(TransactionStatus::RolledBack.is_complete());
        assert!(!TransactionStatus::Committing.is_complete());
        assert!(!TransactionStatus::Prepared.is_complete());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(TransactionStatus::Active.to_string(), "active");
        assert_eq!(TransactionStatus::NoTransaction.to_string(), "no-transaction");
    }
}

use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionId};

/// Records touched by a single transform, for the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionDiff {
    #[serde(default)]
    pub added: Vec<Transaction>,
    #[serde(default)]
    pub updated: Vec<Transaction>,
    #[serde(default)]
    pub deleted: Vec<TransactionId>,
}

impl TransactionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// New collection plus the diff that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionChange {
    pub data: Vec<Transaction>,
    pub diff: TransactionDiff,
}

impl TransactionChange {
    /// Id of the first added record, used to hand focus to a freshly created split.
    pub fn added_id(&self) -> Option<&TransactionId> {
        self.diff.added.first().map(|txn| &txn.id)
    }
}

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::is_temporary_id;

/// Opaque transaction identifier.
///
/// Temporary client-side ids and permanent ids share this type; use
/// [`TransactionId::is_temporary`] to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_temporary(&self) -> bool {
        is_temporary_id(&self.0)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Balance mismatch carried by every member of an unbalanced split group.
///
/// `difference` is `parent.amount - sum(children.amount)` in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "SplitTransactionError")]
pub struct SplitError {
    pub difference: i64,
}

impl SplitError {
    pub fn new(difference: i64) -> Self {
        Self { difference }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Standalone,
    Parent,
    Child,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Signed minor currency units; negative is a debit.
    pub amount: i64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub cleared: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_parent: bool,
    #[serde(default)]
    pub is_child: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TransactionId>,
    /// Derived from the split group; never persisted.
    #[serde(skip)]
    pub error: Option<SplitError>,
    #[serde(default)]
    pub reconciled: bool,
    #[serde(default)]
    pub starting_balance_flag: bool,
}

impl Transaction {
    pub fn new(
        id: impl Into<TransactionId>,
        account: impl Into<String>,
        date: NaiveDate,
        amount: i64,
    ) -> Self {
        Self {
            id: id.into(),
            account: account.into(),
            payee: None,
            category: None,
            amount,
            date,
            notes: None,
            cleared: false,
            sort_order: 0,
            is_parent: false,
            is_child: false,
            parent_id: None,
            error: None,
            reconciled: false,
            starting_balance_flag: false,
        }
    }

    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn kind(&self) -> TransactionKind {
        if self.is_child {
            TransactionKind::Child
        } else if self.is_parent {
            TransactionKind::Parent
        } else {
            TransactionKind::Standalone
        }
    }

    /// Identifier of the split group this record belongs to, if any.
    pub fn group_id(&self) -> Option<&TransactionId> {
        match self.kind() {
            TransactionKind::Parent => Some(&self.id),
            TransactionKind::Child => self.parent_id.as_ref(),
            TransactionKind::Standalone => None,
        }
    }

    pub fn is_child_of(&self, parent_id: &TransactionId) -> bool {
        self.is_child && self.parent_id.as_ref() == Some(parent_id)
    }

    /// Builds an empty split child inheriting the parent's account, payee, date and cleared flag.
    pub fn make_child(&self, id: TransactionId, sort_order: i64) -> Transaction {
        Transaction {
            id,
            account: self.account.clone(),
            payee: self.payee.clone(),
            category: None,
            amount: 0,
            date: self.date,
            notes: None,
            cleared: self.cleared,
            sort_order,
            is_parent: false,
            is_child: true,
            parent_id: Some(self.id.clone()),
            error: None,
            reconciled: self.reconciled,
            starting_balance_flag: false,
        }
    }
}

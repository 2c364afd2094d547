use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// User preference selecting how budget cells are computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetType {
    /// Envelope budgeting: leftover money rolls into the next month.
    #[default]
    Rollover,
    /// Tracking budgeting: budgets are targets, nothing rolls over.
    Tracking,
}

impl BudgetType {
    pub fn sheet_name(self) -> SheetName {
        match self {
            BudgetType::Rollover => SheetName::EnvelopeBudget,
            BudgetType::Tracking => SheetName::TrackingBudget,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SheetName {
    EnvelopeBudget,
    TrackingBudget,
}

impl SheetName {
    pub fn as_str(self) -> &'static str {
        match self {
            SheetName::EnvelopeBudget => "envelope-budget",
            SheetName::TrackingBudget => "tracking-budget",
        }
    }
}

/// Which computed value a budget cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Balance,
    Budgeted,
    Spent,
    Carryover,
}

/// Key of a computed financial value: budget kind, month namespace and cell name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub budget: SheetName,
    pub sheet: String,
    pub name: String,
}

impl Binding {
    /// Binding for a single category cell in `month` (`YYYY-MM`).
    pub fn category(
        budget_type: BudgetType,
        month: &str,
        kind: CellKind,
        category_id: &str,
    ) -> Result<Self> {
        let name = match kind {
            CellKind::Balance => format!("leftover-{category_id}"),
            CellKind::Budgeted => format!("budget-{category_id}"),
            CellKind::Spent => format!("sum-amount-{category_id}"),
            CellKind::Carryover => format!("carryover-{category_id}"),
        };
        Self::build(budget_type, month, name)
    }

    /// Binding for a category group total in `month`.
    pub fn group(budget_type: BudgetType, month: &str, kind: CellKind, group_id: &str) -> Result<Self> {
        let name = match kind {
            CellKind::Balance => format!("group-leftover-{group_id}"),
            CellKind::Budgeted => format!("group-budget-{group_id}"),
            CellKind::Spent => format!("group-sum-amount-{group_id}"),
            CellKind::Carryover => {
                return Err(LedgerError::InvalidInput(
                    "category groups have no carryover cell".into(),
                ))
            }
        };
        Self::build(budget_type, month, name)
    }

    fn build(budget_type: BudgetType, month: &str, name: String) -> Result<Self> {
        Ok(Self {
            budget: budget_type.sheet_name(),
            sheet: sheet_for_month(month)?,
            name,
        })
    }

    /// Fully qualified key, e.g. `budget202403!leftover-food`.
    pub fn key(&self) -> String {
        format!("{}!{}", self.sheet, self.name)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}!{}", self.budget.as_str(), self.sheet, self.name)
    }
}

/// Maps a `YYYY-MM` month to its sheet namespace, e.g. `budget202403`.
pub fn sheet_for_month(month: &str) -> Result<String> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidInput(format!("invalid month `{month}`")))?;
    Ok(format!("budget{}", month.replace('-', "")))
}

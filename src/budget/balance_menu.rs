//! Category balance menu: transfer, cover overspending and rollover toggling.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Transfer,
    Cover,
    Carryover,
}

impl MenuOption {
    pub fn name(self) -> &'static str {
        match self {
            MenuOption::Transfer => "transfer",
            MenuOption::Cover => "cover",
            MenuOption::Carryover => "carryover",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "transfer" => Ok(MenuOption::Transfer),
            "cover" => Ok(MenuOption::Cover),
            "carryover" => Ok(MenuOption::Carryover),
            other => Err(LedgerError::InvalidInput(format!(
                "unrecognized menu option: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub option: MenuOption,
    pub label: &'static str,
}

/// Options offered for a category with `balance` minor units left.
pub fn balance_menu_items(balance: i64, carryover: bool) -> Vec<MenuItem> {
    let mut items = Vec::with_capacity(2);
    if balance > 0 {
        items.push(MenuItem {
            option: MenuOption::Transfer,
            label: "Transfer to another category",
        });
    }
    if balance < 0 {
        items.push(MenuItem {
            option: MenuOption::Cover,
            label: "Cover overspending",
        });
    }
    items.push(MenuItem {
        option: MenuOption::Carryover,
        label: if carryover {
            "Remove overspending rollover"
        } else {
            "Rollover overspending"
        },
    });
    items
}

/// Budget mutation requested from the menu, applied to `month`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum BudgetAction {
    Carryover {
        month: String,
        category: String,
        flag: bool,
    },
    TransferCategory {
        month: String,
        amount: i64,
        from: String,
        to: String,
    },
    CoverOverspending {
        month: String,
        from: String,
        to: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuView {
    Menu,
    Transfer,
    Cover,
}

/// Menu state for one category balance cell.
#[derive(Debug, Clone)]
pub struct BalanceMenu {
    category_id: String,
    month: String,
    balance: i64,
    carryover: bool,
    view: MenuView,
}

impl BalanceMenu {
    pub fn new(
        category_id: impl Into<String>,
        month: impl Into<String>,
        balance: i64,
        carryover: bool,
    ) -> Self {
        Self {
            category_id: category_id.into(),
            month: month.into(),
            balance,
            carryover,
            view: MenuView::Menu,
        }
    }

    pub fn view(&self) -> MenuView {
        self.view
    }

    pub fn items(&self) -> Vec<MenuItem> {
        balance_menu_items(self.balance, self.carryover)
    }

    /// Amount pre-filled in the transfer form.
    pub fn initial_transfer_amount(&self) -> i64 {
        self.balance
    }

    /// Handles a menu selection. Sub-menus switch the view and return
    /// `None`; the carryover toggle returns its action immediately.
    pub fn select(&mut self, name: &str) -> Result<Option<BudgetAction>> {
        let option = MenuOption::parse(name)?;
        if !self.items().iter().any(|item| item.option == option) {
            return Err(LedgerError::InvalidInput(format!(
                "menu option `{name}` is not available for this balance"
            )));
        }
        debug!(category = %self.category_id, option = option.name(), "balance menu selection");
        match option {
            MenuOption::Transfer => {
                self.view = MenuView::Transfer;
                Ok(None)
            }
            MenuOption::Cover => {
                self.view = MenuView::Cover;
                Ok(None)
            }
            MenuOption::Carryover => Ok(Some(BudgetAction::Carryover {
                month: self.month.clone(),
                category: self.category_id.clone(),
                flag: !self.carryover,
            })),
        }
    }

    pub fn submit_transfer(&self, amount: i64, to_category: &str) -> Result<BudgetAction> {
        if self.view != MenuView::Transfer {
            return Err(LedgerError::InvalidInput("transfer form is not open".into()));
        }
        if amount <= 0 {
            return Err(LedgerError::InvalidInput(
                "transfer amount must be positive".into(),
            ));
        }
        Ok(BudgetAction::TransferCategory {
            month: self.month.clone(),
            amount,
            from: self.category_id.clone(),
            to: to_category.to_string(),
        })
    }

    pub fn submit_cover(&self, from_category: &str) -> Result<BudgetAction> {
        if self.view != MenuView::Cover {
            return Err(LedgerError::InvalidInput("cover form is not open".into()));
        }
        Ok(BudgetAction::CoverOverspending {
            month: self.month.clone(),
            from: from_category.to_string(),
            to: self.category_id.clone(),
        })
    }
}

//! Budget cell bindings, the cell-value capability and the balance menu model.

pub mod balance_menu;
pub mod bindings;
pub mod sheet;

pub use balance_menu::{
    balance_menu_items, BalanceMenu, BudgetAction, MenuItem, MenuOption, MenuView,
};
pub use bindings::{sheet_for_month, Binding, BudgetType, CellKind, SheetName};
pub use sheet::{CellSource, ChangeHandler, MemorySheet, Subscription, SubscriptionId};

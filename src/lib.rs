#![doc(test(attr(deny(warnings))))]

//! Budget Splits keeps split transactions balanced and supplies the
//! view-state helpers a budgeting client renders from: budget cell bindings,
//! the balance menu, grid navigation and amount display.
//!
//! ```
//! use budget_splits::core::services::SplitService;
//! use budget_splits::domain::chrono::NaiveDate;
//! use budget_splits::domain::{SplitError, Transaction};
//!
//! let date = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
//! let ledger = vec![Transaction::new("t1", "checking", date, -2777)];
//!
//! let change = SplitService::split(&ledger, &"t1".into()).unwrap();
//! assert!(change.data[0].is_parent);
//! assert_eq!(change.data[0].error, Some(SplitError::new(-2777)));
//! ```

pub mod budget;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod grid;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Splits tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}

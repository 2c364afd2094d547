#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use budget_splits::config::ConfigManager;
use budget_splits::domain::chrono::NaiveDate;
use budget_splits::domain::Transaction;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const ACCOUNT: &str = "bank-of-america";

/// Creates a config manager rooted in a unique temporary directory.
pub fn setup_config_env() -> (ConfigManager, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    let manager = ConfigManager::with_base_dir(base.clone()).expect("create config manager");
    (manager, base)
}

/// Five standalone transactions; the first one is hardcoded to -27.77.
pub fn sample_transactions() -> Vec<Transaction> {
    let date = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
    (0..5)
        .map(|i| {
            let amount = if i == 0 { -2777 } else { -1000 * (i + 1) };
            Transaction::new(format!("t{}", i + 1), ACCOUNT, date, amount)
                .with_payee("alice-id")
                .with_notes("Notes")
                .with_sort_order(i)
        })
        .collect()
}

/// Deterministic id source: `id1`, `id2`, ...
pub fn sequential_ids() -> impl FnMut() -> String {
    let mut next = 0;
    move || {
        next += 1;
        format!("id{next}")
    }
}

/// Asserts the split balance property for every parent in `data` and that
/// every record has exactly one kind.
pub fn assert_groups_consistent(data: &[Transaction]) {
    for txn in data {
        assert!(!(txn.is_parent && txn.is_child), "{} is both parent and child", txn.id);
        assert_eq!(txn.is_child, txn.parent_id.is_some(), "parent id of {}", txn.id);
        if !txn.is_parent && !txn.is_child {
            assert!(txn.error.is_none(), "standalone {} carries a split error", txn.id);
        }
    }
    for parent in data.iter().filter(|txn| txn.is_parent) {
        let children: Vec<&Transaction> = data
            .iter()
            .filter(|txn| txn.is_child_of(&parent.id))
            .collect();
        let sum: i64 = children.iter().map(|txn| txn.amount).sum();
        let balanced = sum == parent.amount;
        assert_eq!(parent.error.is_none(), balanced, "parent {}", parent.id);
        for child in children {
            assert_eq!(child.error, parent.error, "child {}", child.id);
        }
    }
}

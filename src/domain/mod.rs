pub mod diff;
pub mod ids;
pub mod transaction;

pub use diff::{TransactionChange, TransactionDiff};
pub use ids::{is_temporary_id, temp_id, IdGenerator, UuidGenerator};
pub use transaction::{SplitError, Transaction, TransactionId, TransactionKind};

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;

//! View-state for the transaction grid.

pub mod amounts;
pub mod navigation;

pub use amounts::{amount_cells, parent_of, split_error_message, AmountCells};
pub use navigation::{Column, GridCursor, GridEvent, GridKey, GridLayout};

//! Keyboard navigation between transaction grid cells.
//!
//! Enter and Shift+Enter move down and up within a column. Tab and
//! Shift+Tab move right and left, wrapping onto the neighbouring row. All
//! moves clamp at the grid edges instead of failing.

use tracing::trace;

use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Select,
    Date,
    Account,
    Payee,
    Notes,
    Category,
    Debit,
    Credit,
    Cleared,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Select,
        Column::Date,
        Column::Account,
        Column::Payee,
        Column::Notes,
        Column::Category,
        Column::Debit,
        Column::Credit,
        Column::Cleared,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Select => "select",
            Column::Date => "date",
            Column::Account => "account",
            Column::Payee => "payee",
            Column::Notes => "notes",
            Column::Category => "category",
            Column::Debit => "debit",
            Column::Credit => "credit",
            Column::Cleared => "cleared",
        }
    }
}

/// Visible columns and row count of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    columns: Vec<Column>,
    rows: usize,
}

impl GridLayout {
    pub fn new(rows: usize, show_account: bool, show_category: bool, show_cleared: bool) -> Self {
        let columns = Column::ALL
            .into_iter()
            .filter(|column| match column {
                Column::Account => show_account,
                Column::Category => show_category,
                Column::Cleared => show_cleared,
                _ => true,
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    fn index_of(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKey {
    Enter,
    ShiftEnter,
    Tab,
    ShiftTab,
    Escape,
    Blur,
}

/// Outcome the UI must act on after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    Commit {
        row: usize,
        column: Column,
        value: String,
    },
    Discard {
        row: usize,
        column: Column,
    },
}

/// Focused cell, edit mode and the not-yet-saved input value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridCursor {
    focus: Option<(usize, Column)>,
    editing: bool,
    pending: Option<String>,
}

impl GridCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Option<(usize, Column)> {
        self.focus
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Starts editing `column` of `row`, dropping any uncommitted input.
    pub fn edit(&mut self, row: usize, column: Column, layout: &GridLayout) -> Result<()> {
        if row >= layout.rows() {
            return Err(LedgerError::InvalidInput(format!(
                "row {row} is outside the grid ({} rows)",
                layout.rows()
            )));
        }
        if layout.index_of(column).is_none() {
            return Err(LedgerError::InvalidInput(format!(
                "column `{}` is hidden",
                column.name()
            )));
        }
        self.focus = Some((row, column));
        self.editing = true;
        self.pending = None;
        Ok(())
    }

    /// Records typed input for the cell being edited.
    pub fn input(&mut self, value: impl Into<String>) {
        if self.editing {
            self.pending = Some(value.into());
        }
    }

    pub fn handle(&mut self, key: GridKey, layout: &GridLayout) -> Option<GridEvent> {
        let (row, column) = self.focus?;
        if !self.editing || layout.rows() == 0 {
            return None;
        }

        match key {
            GridKey::Escape => {
                self.editing = false;
                self.pending = None;
                Some(GridEvent::Discard { row, column })
            }
            GridKey::Blur => {
                self.editing = false;
                self.commit(row, column)
            }
            GridKey::Enter | GridKey::ShiftEnter | GridKey::Tab | GridKey::ShiftTab => {
                let event = self.commit(row, column);
                let next = Self::step(key, row, column, layout);
                trace!(from = ?(row, column), to = ?next, ?key, "grid move");
                self.focus = Some(next);
                event
            }
        }
    }

    fn commit(&mut self, row: usize, column: Column) -> Option<GridEvent> {
        self.pending
            .take()
            .map(|value| GridEvent::Commit { row, column, value })
    }

    fn step(key: GridKey, row: usize, column: Column, layout: &GridLayout) -> (usize, Column) {
        let columns = layout.columns();
        let last_row = layout.rows() - 1;
        let row = row.min(last_row);
        let Some(idx) = layout.index_of(column) else {
            return (row, columns[0]);
        };
        match key {
            GridKey::Enter => ((row + 1).min(last_row), column),
            GridKey::ShiftEnter => (row.saturating_sub(1), column),
            GridKey::Tab if idx + 1 < columns.len() => (row, columns[idx + 1]),
            GridKey::Tab if row < last_row => (row + 1, columns[0]),
            GridKey::ShiftTab if idx > 0 => (row, columns[idx - 1]),
            GridKey::ShiftTab if row > 0 => (row - 1, columns[columns.len() - 1]),
            _ => (row, column),
        }
    }
}

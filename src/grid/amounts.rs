use crate::currency::{integer_to_currency, FormatOptions};
use crate::domain::Transaction;

/// Magnitudes shown in the debit and credit columns; `None` renders empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmountCells {
    pub debit: Option<i64>,
    pub credit: Option<i64>,
}

impl AmountCells {
    pub fn render(&self, options: &FormatOptions) -> (String, String) {
        let cell = |value: Option<i64>| {
            value
                .map(|amount| integer_to_currency(amount, options))
                .unwrap_or_default()
        };
        (cell(self.debit), cell(self.credit))
    }
}

pub fn parent_of<'a>(txn: &Transaction, transactions: &'a [Transaction]) -> Option<&'a Transaction> {
    let parent_id = txn.parent_id.as_ref().filter(|_| txn.is_child)?;
    transactions.iter().find(|candidate| &candidate.id == parent_id)
}

/// Places an amount in the debit or credit column. Zero-amount split
/// children follow their parent's side so an empty split lines up with it.
pub fn amount_cells(txn: &Transaction, parent: Option<&Transaction>) -> AmountCells {
    let credit_side = match txn.amount {
        amount if amount > 0 => true,
        amount if amount < 0 => false,
        _ => parent.map_or(false, |parent| parent.amount > 0),
    };
    if credit_side {
        AmountCells {
            debit: None,
            credit: Some(txn.amount),
        }
    } else {
        AmountCells {
            debit: Some(-txn.amount),
            credit: None,
        }
    }
}

/// Toolbar text for an unbalanced split parent, e.g. `Amount left: 17.77`.
pub fn split_error_message(parent: &Transaction, options: &FormatOptions) -> Option<String> {
    if !parent.is_parent {
        return None;
    }
    let error = parent.error?;
    let left = if parent.amount > 0 {
        error.difference
    } else {
        -error.difference
    };
    Some(format!("Amount left: {}", integer_to_currency(left, options)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{SplitError, TransactionId};

    fn txn(amount: i64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        Transaction::new("t1", "checking", date, amount)
    }

    #[test]
    fn negative_amounts_are_debits() {
        let cells = amount_cells(&txn(-2777), None);
        assert_eq!(cells.debit, Some(2777));
        assert_eq!(cells.render(&FormatOptions::default()), ("27.77".into(), String::new()));
    }

    #[test]
    fn zero_children_follow_parent_side() {
        let mut parent = txn(-2777);
        parent.is_parent = true;
        let child = parent.make_child(TransactionId::new("t1/a"), -1);
        let data = vec![parent.clone(), child.clone()];
        let found = parent_of(&child, &data).unwrap();
        let options = FormatOptions::default();
        assert_eq!(
            amount_cells(&child, Some(found)).render(&options),
            ("0.00".into(), String::new())
        );

        parent.amount = 5500;
        assert_eq!(
            amount_cells(&child, Some(&parent)).render(&options),
            (String::new(), "0.00".into())
        );
    }

    #[test]
    fn error_message_reports_amount_left() {
        let mut parent = txn(-2777);
        parent.is_parent = true;
        assert_eq!(split_error_message(&parent, &FormatOptions::default()), None);
        parent.error = Some(SplitError::new(-1777));
        assert_eq!(
            split_error_message(&parent, &FormatOptions::default()).as_deref(),
            Some("Amount left: 17.77")
        );
    }
}

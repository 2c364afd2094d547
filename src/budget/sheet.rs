use std::collections::HashMap;

use tracing::trace;

use super::bindings::Binding;

/// Callback invoked with the new value whenever a bound cell changes.
pub type ChangeHandler = Box<dyn FnMut(i64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    /// Value at subscription time; `None` until the cell has been computed.
    pub current: Option<i64>,
}

/// Source of computed financial values that UI cells bind to.
pub trait CellSource {
    fn subscribe(&mut self, binding: &Binding, on_change: ChangeHandler) -> Subscription;
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
    fn value(&self, binding: &Binding) -> Option<i64>;
}

/// In-memory [`CellSource`] whose values are pushed with [`MemorySheet::set`].
#[derive(Default)]
pub struct MemorySheet {
    values: HashMap<Binding, i64>,
    listeners: HashMap<Binding, Vec<(SubscriptionId, ChangeHandler)>>,
    next_id: u64,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and notifies subscribers when it differs from the
    /// previous value. Returns how many handlers ran.
    pub fn set(&mut self, binding: &Binding, value: i64) -> usize {
        if self.values.insert(binding.clone(), value) == Some(value) {
            return 0;
        }
        let Some(handlers) = self.listeners.get_mut(binding) else {
            return 0;
        };
        for (_, handler) in handlers.iter_mut() {
            handler(value);
        }
        trace!(binding = %binding, value, notified = handlers.len(), "cell changed");
        handlers.len()
    }
}

impl CellSource for MemorySheet {
    fn subscribe(&mut self, binding: &Binding, on_change: ChangeHandler) -> Subscription {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners
            .entry(binding.clone())
            .or_default()
            .push((id, on_change));
        Subscription {
            id,
            current: self.value(binding),
        }
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        self.listeners.retain(|_, handlers| {
            let before = handlers.len();
            handlers.retain(|(existing, _)| *existing != id);
            removed |= handlers.len() != before;
            !handlers.is_empty()
        });
        removed
    }

    fn value(&self, binding: &Binding) -> Option<i64> {
        self.values.get(binding).copied()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::budget::bindings::{BudgetType, CellKind};

    fn balance() -> Binding {
        Binding::category(BudgetType::Rollover, "2024-03", CellKind::Balance, "food").unwrap()
    }

    #[test]
    fn subscribers_see_current_value_and_changes() {
        let mut sheet = MemorySheet::new();
        sheet.set(&balance(), 12_987);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = sheet.subscribe(&balance(), Box::new(move |v| sink.borrow_mut().push(v)));
        assert_eq!(sub.current, Some(12_987));

        assert_eq!(sheet.set(&balance(), 12_987), 0);
        assert_eq!(sheet.set(&balance(), -500), 1);
        assert_eq!(*seen.borrow(), vec![-500]);

        assert!(sheet.unsubscribe(sub.id));
        assert!(!sheet.unsubscribe(sub.id));
        assert_eq!(sheet.set(&balance(), 0), 0);
        assert_eq!(*seen.borrow(), vec![-500]);
    }

    #[test]
    fn unknown_cells_start_empty() {
        let mut sheet = MemorySheet::new();
        let sub = sheet.subscribe(&balance(), Box::new(|_| {}));
        assert_eq!(sub.current, None);
    }
}

//! Split-transaction transforms.
//!
//! Every operation takes the caller's collection by reference and returns a
//! fresh collection. Split groups (a parent plus its children) are rebalanced
//! after each change: when `parent.amount` differs from the children's sum,
//! every member carries a [`SplitError`] with the outstanding difference.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{
    IdGenerator, SplitError, Transaction, TransactionChange, TransactionDiff, TransactionId,
    TransactionKind, UuidGenerator,
};

/// Pure transforms over an ordered transaction collection.
pub struct SplitService;

impl SplitService {
    /// Turns a standalone transaction into a parent with one empty child.
    pub fn split(
        transactions: &[Transaction],
        id: &TransactionId,
    ) -> ServiceResult<TransactionChange> {
        Self::split_with(transactions, id, &mut UuidGenerator)
    }

    pub fn split_with<G>(
        transactions: &[Transaction],
        id: &TransactionId,
        ids: &mut G,
    ) -> ServiceResult<TransactionChange>
    where
        G: IdGenerator + ?Sized,
    {
        let index = position(transactions, id)?;
        let target = &transactions[index];
        match target.kind() {
            TransactionKind::Child => {
                warn!(%id, "refusing to split a child transaction");
                return Err(ServiceError::InvalidState(format!(
                    "transaction {id} is a split child and cannot be split"
                )));
            }
            TransactionKind::Parent => {
                warn!(%id, "refusing to split an existing parent");
                return Err(ServiceError::InvalidState(format!(
                    "transaction {id} is already split"
                )));
            }
            TransactionKind::Standalone => {}
        }

        let mut parent = target.clone();
        parent.is_parent = true;
        let child = parent.make_child(child_id(&parent.id, ids), -1);

        let mut data = Vec::with_capacity(transactions.len() + 1);
        data.extend_from_slice(&transactions[..index]);
        data.push(parent);
        data.push(child);
        data.extend_from_slice(&transactions[index + 1..]);

        let difference = recompute_group(&mut data, id);
        debug!(%id, ?difference, "split transaction");

        let diff = TransactionDiff {
            added: vec![data[index + 1].clone()],
            updated: vec![data[index].clone()],
            deleted: Vec::new(),
        };
        Ok(TransactionChange { data, diff })
    }

    /// Appends one more empty child to an existing parent.
    pub fn add_split(
        transactions: &[Transaction],
        parent_id: &TransactionId,
    ) -> ServiceResult<TransactionChange> {
        Self::add_split_with(transactions, parent_id, &mut UuidGenerator)
    }

    pub fn add_split_with<G>(
        transactions: &[Transaction],
        parent_id: &TransactionId,
        ids: &mut G,
    ) -> ServiceResult<TransactionChange>
    where
        G: IdGenerator + ?Sized,
    {
        let parent_index = position(transactions, parent_id)?;
        let parent = &transactions[parent_index];
        if !parent.is_parent {
            warn!(%parent_id, "add-split requested on a non-parent transaction");
            return Err(ServiceError::InvalidState(format!(
                "transaction {parent_id} is not a split parent"
            )));
        }

        let mut last_member = parent_index;
        let mut min_sort: Option<i64> = None;
        for (idx, txn) in transactions.iter().enumerate() {
            if txn.is_child_of(parent_id) {
                last_member = last_member.max(idx);
                min_sort = Some(min_sort.map_or(txn.sort_order, |m| m.min(txn.sort_order)));
            }
        }
        let sort_order = min_sort.map_or(-1, |m| m - 1);
        let child = parent.make_child(child_id(parent_id, ids), sort_order);

        let insert_at = last_member + 1;
        let mut data = transactions.to_vec();
        data.insert(insert_at, child);

        let difference = recompute_group(&mut data, parent_id);
        debug!(%parent_id, sort_order, ?difference, "added split child");

        let parent_index = position(&data, parent_id)?;
        let diff = TransactionDiff {
            added: vec![data[insert_at].clone()],
            updated: vec![data[parent_index].clone()],
            deleted: Vec::new(),
        };
        Ok(TransactionChange { data, diff })
    }

    /// Replaces the record sharing `transaction.id` and rebalances its group.
    ///
    /// The record keeps its kind: a parent stays a parent, a standalone record
    /// stays standalone, and a child may only move to another existing parent.
    /// `diff.updated` holds every record whose contents may have changed.
    pub fn update(
        transactions: &[Transaction],
        transaction: &Transaction,
    ) -> ServiceResult<TransactionChange> {
        let index = position(transactions, &transaction.id)?;
        let previous = &transactions[index];
        check_structure(transactions, previous, transaction)?;
        let previous_group = previous.group_id().cloned();

        let mut record = transaction.clone();
        if previous.kind() != TransactionKind::Standalone {
            record.error = None;
        }
        let current_group = record.group_id().cloned();

        let mut data = transactions.to_vec();
        data[index] = record;

        let mut groups: Vec<TransactionId> = Vec::new();
        for group in [previous_group, current_group].into_iter().flatten() {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        for group in &groups {
            let difference = recompute_group(&mut data, group);
            debug!(id = %transaction.id, group = %group, ?difference, "rebalanced split group");
        }

        let updated = data
            .iter()
            .filter(|txn| {
                txn.id == transaction.id
                    || txn.group_id().map_or(false, |group| groups.contains(group))
            })
            .cloned()
            .collect();
        Ok(TransactionChange {
            data,
            diff: TransactionDiff {
                added: Vec::new(),
                updated,
                deleted: Vec::new(),
            },
        })
    }

    /// Replaces temporary ids in a freshly created batch with permanent ones.
    pub fn realize_temp_transactions(batch: &[Transaction]) -> ServiceResult<Vec<Transaction>> {
        Self::realize_temp_transactions_with(batch, &mut UuidGenerator)
    }

    pub fn realize_temp_transactions_with<G>(
        batch: &[Transaction],
        ids: &mut G,
    ) -> ServiceResult<Vec<Transaction>>
    where
        G: IdGenerator + ?Sized,
    {
        let mut mapping: HashMap<TransactionId, TransactionId> = HashMap::new();
        for txn in batch.iter().filter(|t| !t.is_child && t.id.is_temporary()) {
            mapping.insert(txn.id.clone(), TransactionId::new(ids.next_id()));
        }

        let batch_ids: HashSet<&TransactionId> = batch.iter().map(|txn| &txn.id).collect();
        for txn in batch.iter().filter(|t| t.is_child) {
            let Some(parent_id) = txn.parent_id.as_ref() else {
                warn!(id = %txn.id, "split child without a parent id");
                return Err(ServiceError::InvalidState(format!(
                    "child {} has no parent id",
                    txn.id
                )));
            };
            if !batch_ids.contains(parent_id) {
                warn!(id = %txn.id, %parent_id, "parent missing from batch");
                return Err(ServiceError::NotFound(format!(
                    "parent {parent_id} of {} is not part of the batch",
                    txn.id
                )));
            }
            if txn.id.is_temporary() {
                let parent = mapping.get(parent_id).unwrap_or(parent_id).clone();
                mapping.insert(txn.id.clone(), child_id(&parent, ids));
            }
        }

        let realized: Vec<Transaction> = batch
            .iter()
            .map(|txn| {
                let mut txn = txn.clone();
                if let Some(permanent) = mapping.get(&txn.id) {
                    txn.id = permanent.clone();
                }
                if let Some(parent_id) = txn.parent_id.as_mut() {
                    if let Some(permanent) = mapping.get(&*parent_id) {
                        *parent_id = permanent.clone();
                    }
                }
                txn
            })
            .collect();
        debug!(count = realized.len(), realized = mapping.len(), "realized temporary ids");
        Ok(realized)
    }

    /// Merges a diff produced elsewhere into `transactions`.
    ///
    /// New top-level records are prepended; new children land after the
    /// last member of their group. Touched groups are rebalanced.
    pub fn apply_diff(transactions: &[Transaction], diff: &TransactionDiff) -> Vec<Transaction> {
        let deleted: HashSet<&TransactionId> = diff.deleted.iter().collect();
        let mut data: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| !deleted.contains(&txn.id))
            .cloned()
            .collect();

        let mut touched: Vec<TransactionId> = Vec::new();
        for txn in transactions.iter().filter(|txn| deleted.contains(&txn.id)) {
            note_group(txn, &mut touched);
        }

        for updated in &diff.updated {
            if let Some(slot) = data.iter_mut().find(|txn| txn.id == updated.id) {
                *slot = updated.clone();
                note_group(updated, &mut touched);
            }
        }

        let (children, top_level): (Vec<&Transaction>, Vec<&Transaction>) =
            diff.added.iter().partition(|txn| txn.is_child);
        let mut merged: Vec<Transaction> = Vec::with_capacity(data.len() + diff.added.len());
        for txn in top_level {
            note_group(txn, &mut touched);
            merged.push(txn.clone());
        }
        merged.append(&mut data);
        let mut data = merged;

        for child in children {
            let anchor = child.parent_id.as_ref().and_then(|parent_id| {
                data.iter()
                    .rposition(|txn| &txn.id == parent_id || txn.is_child_of(parent_id))
            });
            match anchor {
                Some(idx) => data.insert(idx + 1, child.clone()),
                None => data.push(child.clone()),
            }
            note_group(child, &mut touched);
        }

        for group in &touched {
            recompute_group(&mut data, group);
        }
        debug!(
            added = diff.added.len(),
            updated = diff.updated.len(),
            deleted = diff.deleted.len(),
            "applied transaction diff"
        );
        data
    }

    /// Display order: top-level records by date and sort order (newest
    /// first, ties broken by id), each parent followed by its children.
    pub fn sort_for_display(transactions: &[Transaction]) -> Vec<Transaction> {
        let mut top_level: Vec<&Transaction> =
            transactions.iter().filter(|txn| !txn.is_child).collect();
        top_level.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.sort_order.cmp(&a.sort_order))
                .then(a.id.cmp(&b.id))
        });

        let mut children: HashMap<&TransactionId, Vec<&Transaction>> = HashMap::new();
        let mut orphans: Vec<&Transaction> = Vec::new();
        let parents: HashSet<&TransactionId> = top_level.iter().map(|txn| &txn.id).collect();
        for txn in transactions.iter().filter(|txn| txn.is_child) {
            match txn.parent_id.as_ref() {
                Some(parent) if parents.contains(parent) => {
                    children.entry(parent).or_default().push(txn)
                }
                _ => orphans.push(txn),
            }
        }

        let mut ordered = Vec::with_capacity(transactions.len());
        for txn in top_level {
            ordered.push(txn.clone());
            if let Some(mut group) = children.remove(&txn.id) {
                group.sort_by(|a, b| b.sort_order.cmp(&a.sort_order).then(a.id.cmp(&b.id)));
                ordered.extend(group.into_iter().cloned());
            }
        }
        ordered.extend(orphans.into_iter().cloned());
        ordered
    }
}

fn position(transactions: &[Transaction], id: &TransactionId) -> ServiceResult<usize> {
    transactions
        .iter()
        .position(|txn| &txn.id == id)
        .ok_or_else(|| {
            warn!(%id, "transaction lookup failed");
            ServiceError::NotFound(id.to_string())
        })
}

/// Rejects updates that would change a record's kind or leave a child
/// pointing at something other than an existing parent.
fn check_structure(
    transactions: &[Transaction],
    previous: &Transaction,
    next: &Transaction,
) -> ServiceResult<()> {
    let id = &next.id;
    if next.is_parent && next.is_child {
        warn!(%id, "update marks a record as both parent and child");
        return Err(ServiceError::InvalidState(format!(
            "transaction {id} cannot be both a split parent and a split child"
        )));
    }
    if next.is_child != next.parent_id.is_some() {
        warn!(%id, "update carries a parent id inconsistent with its child flag");
        return Err(ServiceError::InvalidState(format!(
            "transaction {id} must carry a parent id exactly when it is a split child"
        )));
    }
    if previous.kind() != next.kind() {
        warn!(%id, from = ?previous.kind(), to = ?next.kind(), "update changes record kind");
        return Err(ServiceError::InvalidState(format!(
            "transaction {id} cannot change from {:?} to {:?} through an update",
            previous.kind(),
            next.kind()
        )));
    }
    if let Some(parent_id) = next.parent_id.as_ref() {
        let parent = transactions
            .iter()
            .find(|txn| &txn.id == parent_id)
            .ok_or_else(|| {
                warn!(%id, %parent_id, "update points a child at a missing parent");
                ServiceError::NotFound(parent_id.to_string())
            })?;
        if !parent.is_parent {
            warn!(%id, %parent_id, "update points a child at a non-parent");
            return Err(ServiceError::InvalidState(format!(
                "transaction {parent_id} is not a split parent"
            )));
        }
    }
    Ok(())
}

fn note_group(txn: &Transaction, touched: &mut Vec<TransactionId>) {
    if let Some(group) = txn.group_id() {
        if !touched.contains(group) {
            touched.push(group.clone());
        }
    }
}

fn child_id<G>(parent_id: &TransactionId, ids: &mut G) -> TransactionId
where
    G: IdGenerator + ?Sized,
{
    TransactionId::new(format!("{}/{}", parent_id, ids.next_id()))
}

/// Sets or clears the split error on every member of the group rooted at
/// `parent_id`. Returns the outstanding difference, or `None` when the
/// group has no parent in `data`.
fn recompute_group(data: &mut [Transaction], parent_id: &TransactionId) -> Option<i64> {
    let expected = data
        .iter()
        .find(|txn| &txn.id == parent_id && txn.is_parent)
        .map(|txn| txn.amount)?;
    let actual: i64 = data
        .iter()
        .filter(|txn| txn.is_child_of(parent_id))
        .map(|txn| txn.amount)
        .sum();
    let difference = expected - actual;
    let error = (difference != 0).then(|| SplitError::new(difference));
    for txn in data
        .iter_mut()
        .filter(|txn| &txn.id == parent_id || txn.is_child_of(parent_id))
    {
        txn.error = error;
    }
    Some(difference)
}

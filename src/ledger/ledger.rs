use std::{cmp::Ordering, collections::HashSet, fmt};

use uuid::Uuid;

use crate::{
    errors::{LedgerError, Result},
    storage::{self, KeyValueStore, SAVINGS_GOAL_KEY, TRANSACTIONS_KEY},
};

use super::transaction::{Transaction, TransactionDraft};

/// Savings goal used until the user sets one.
pub const DEFAULT_SAVINGS_GOAL: f64 = 5000.0;

/// Authoritative collection of transactions plus the savings goal.
///
/// The ledger is the only writer of its two store keys. Each mutation
/// serializes the whole affected aggregate and writes it before touching the
/// in-memory state, so a failed write leaves the ledger exactly as it was.
pub struct Ledger {
    transactions: Vec<Transaction>,
    savings_goal: f64,
    store: Box<dyn KeyValueStore>,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions)
            .field("savings_goal", &self.savings_goal)
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Loads ledger state from `store`.
    ///
    /// A missing transaction document yields an empty ledger; a corrupt one is
    /// an error so that the next write cannot clobber it. The goal falls back
    /// to [`DEFAULT_SAVINGS_GOAL`] when missing or unusable.
    pub fn load(store: impl KeyValueStore + 'static) -> Result<Self> {
        let store: Box<dyn KeyValueStore> = Box::new(store);
        let stored: Vec<Transaction> =
            storage::load_json(store.as_ref(), TRANSACTIONS_KEY)?.unwrap_or_default();
        let transactions = dedupe_by_id(stored);
        let savings_goal = load_goal(store.as_ref())?;
        tracing::info!(
            transactions = transactions.len(),
            savings_goal,
            "ledger loaded"
        );
        Ok(Self {
            transactions,
            savings_goal,
            store,
        })
    }

    /// Validates `draft`, appends it under a fresh id, and persists the collection.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Uuid> {
        let id = self.fresh_id();
        let transaction = draft.into_transaction(id)?;
        let mut next = self.transactions.clone();
        next.push(transaction);
        self.commit_transactions(next)?;
        tracing::info!(%id, "transaction added");
        Ok(id)
    }

    /// Replaces every field of transaction `id` except the id itself.
    pub fn update(&mut self, id: Uuid, draft: TransactionDraft) -> Result<()> {
        let replacement = draft.into_transaction(id)?;
        let index = self
            .position(id)
            .ok_or(LedgerError::NotFound(id))?;
        let mut next = self.transactions.clone();
        next[index] = replacement;
        self.commit_transactions(next)?;
        tracing::info!(%id, "transaction updated");
        Ok(())
    }

    /// Removes transaction `id` if present. Absence is not an error; the
    /// collection is persisted either way.
    pub fn remove(&mut self, id: Uuid) -> Result<Option<Transaction>> {
        let mut next = self.transactions.clone();
        let removed = self.position(id).map(|index| next.remove(index));
        self.commit_transactions(next)?;
        match &removed {
            Some(_) => tracing::info!(%id, "transaction removed"),
            None => tracing::debug!(%id, "remove ignored unknown transaction"),
        }
        Ok(removed)
    }

    /// Transactions ordered by date, most recent first.
    ///
    /// Equal dates keep insertion order. Records whose stored date cannot be
    /// parsed are listed last. The stored order is left untouched.
    pub fn list(&self) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by(|a, b| match (a.date.parse(), b.date.parse()) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        sorted
    }

    pub fn set_goal(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(LedgerError::validation(format!(
                "savings goal must be a number greater than zero (got {value})"
            )));
        }
        storage::save_json(self.store.as_mut(), SAVINGS_GOAL_KEY, &value)?;
        self.savings_goal = value;
        tracing::info!(savings_goal = value, "savings goal updated");
        Ok(())
    }

    pub fn goal(&self) -> f64 {
        self.savings_goal
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Transactions in insertion order; the snapshot aggregation works from.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.transactions.iter().position(|txn| txn.id == id)
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let candidate = Uuid::new_v4();
            if self.position(candidate).is_none() {
                return candidate;
            }
        }
    }

    fn commit_transactions(&mut self, next: Vec<Transaction>) -> Result<()> {
        storage::save_json(self.store.as_mut(), TRANSACTIONS_KEY, &next)?;
        self.transactions = next;
        Ok(())
    }
}

fn dedupe_by_id(stored: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    let total = stored.len();
    let unique: Vec<Transaction> = stored
        .into_iter()
        .filter(|txn| seen.insert(txn.id))
        .collect();
    if unique.len() != total {
        tracing::warn!(
            dropped = total - unique.len(),
            "stored transactions contained duplicate ids; keeping first occurrences"
        );
    }
    unique
}

fn load_goal(store: &dyn KeyValueStore) -> Result<f64> {
    let Some(raw) = store.get(SAVINGS_GOAL_KEY)? else {
        return Ok(DEFAULT_SAVINGS_GOAL);
    };
    match serde_json::from_str::<f64>(&raw) {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => {
            tracing::warn!(raw = %raw, "ignoring unusable stored savings goal");
            Ok(DEFAULT_SAVINGS_GOAL)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use crate::storage::MemoryStore;

    fn empty_ledger() -> (Ledger, MemoryStore) {
        let store = MemoryStore::new();
        let ledger = Ledger::load(store.clone()).unwrap();
        (ledger, store)
    }

    #[test]
    fn fresh_ledger_is_empty_with_default_goal() {
        let (ledger, store) = empty_ledger();
        assert!(ledger.is_empty());
        assert_eq!(ledger.goal(), DEFAULT_SAVINGS_GOAL);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn add_persists_full_collection_once() {
        let (mut ledger, store) = empty_ledger();
        let id = ledger
            .add(TransactionDraft::expense("Groceries", 42.5, "Food", "2024-03-02"))
            .unwrap();

        assert_eq!(store.write_count(), 1);
        let raw = store.get(TRANSACTIONS_KEY).unwrap().unwrap();
        let saved: Vec<Transaction> = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, id);
        assert_eq!(saved[0].kind, TransactionKind::Expense);
    }

    #[test]
    fn invalid_add_writes_nothing() {
        let (mut ledger, store) = empty_ledger();
        let err = ledger
            .add(TransactionDraft::expense("", 5.0, "Food", "2024-03-02"))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn update_keeps_id_and_replaces_fields() {
        let (mut ledger, _store) = empty_ledger();
        let id = ledger
            .add(TransactionDraft::expense("Cinema", 12.0, "Entertainment", "2024-03-02"))
            .unwrap();
        ledger
            .update(id, TransactionDraft::income("Refund", 12.0, "2024-03-05"))
            .unwrap();

        let stored = ledger.get(id).unwrap();
        assert_eq!(stored.name, "Refund");
        assert_eq!(stored.kind, TransactionKind::Income);
        assert_eq!(stored.category, "Other");
        assert_eq!(stored.date.as_str(), "2024-03-05");
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (mut ledger, store) = empty_ledger();
        let missing = Uuid::new_v4();
        let err = ledger
            .update(missing, TransactionDraft::income("Bonus", 1.0, "2024-01-01"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(id) if id == missing));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn invalid_update_wins_over_not_found() {
        let (mut ledger, _store) = empty_ledger();
        let err = ledger
            .update(Uuid::new_v4(), TransactionDraft::income("Bonus", -1.0, "2024-01-01"))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn remove_is_idempotent() {
        let (mut ledger, store) = empty_ledger();
        let id = ledger
            .add(TransactionDraft::income("Salary", 2000.0, "2024-01-31"))
            .unwrap();

        let removed = ledger.remove(id).unwrap();
        assert_eq!(removed.map(|txn| txn.id), Some(id));
        assert!(ledger.remove(id).unwrap().is_none());
        assert!(ledger.is_empty());
        assert_eq!(store.write_count(), 3);
    }

    #[test]
    fn list_orders_by_date_descending_with_stable_ties() {
        let (mut ledger, _store) = empty_ledger();
        let first = ledger
            .add(TransactionDraft::expense("A", 1.0, "Food", "2024-01-10"))
            .unwrap();
        let newest = ledger
            .add(TransactionDraft::expense("B", 1.0, "Food", "2024-02-01"))
            .unwrap();
        let second = ledger
            .add(TransactionDraft::expense("C", 1.0, "Food", "2024-01-10"))
            .unwrap();

        let ids: Vec<Uuid> = ledger.list().iter().map(|txn| txn.id).collect();
        assert_eq!(ids, vec![newest, first, second]);

        let stored: Vec<Uuid> = ledger.transactions().iter().map(|txn| txn.id).collect();
        assert_eq!(stored, vec![first, newest, second]);
    }

    #[test]
    fn set_goal_rejects_non_positive_values() {
        let (mut ledger, store) = empty_ledger();
        ledger.set_goal(1200.0).unwrap();
        for bad in [-5.0, 0.0, f64::NAN, f64::INFINITY] {
            assert!(ledger.set_goal(bad).unwrap_err().is_validation());
        }
        assert_eq!(ledger.goal(), 1200.0);
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get(SAVINGS_GOAL_KEY).unwrap().as_deref(), Some("1200.0"));
    }

    #[test]
    fn unusable_stored_goal_falls_back_to_default() {
        for raw in ["-10", "0", "\"lots\"", "{"] {
            let store = MemoryStore::with_entries([(SAVINGS_GOAL_KEY, raw)]);
            let ledger = Ledger::load(store).unwrap();
            assert_eq!(ledger.goal(), DEFAULT_SAVINGS_GOAL, "stored goal {raw}");
        }
    }

    #[test]
    fn corrupt_transactions_fail_to_load() {
        let store = MemoryStore::with_entries([(TRANSACTIONS_KEY, "[{\"id\":")]);
        let err = Ledger::load(store).unwrap_err();
        assert!(matches!(err, LedgerError::Serde(_)), "{err:?}");
    }

    #[test]
    fn duplicate_stored_ids_keep_first_occurrence() {
        let id = Uuid::new_v4();
        let doc = format!(
            r#"[{{"id":"{id}","name":"One","amount":1,"kind":"income","category":"Other","date":"2024-01-01"}},
                {{"id":"{id}","name":"Two","amount":2,"kind":"income","category":"Other","date":"2024-01-02"}}]"#
        );
        let store = MemoryStore::with_entries([(TRANSACTIONS_KEY, doc)]);
        let ledger = Ledger::load(store).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(id).unwrap().name, "One");
    }
}

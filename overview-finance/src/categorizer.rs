//! First-match-wins partition of a transaction stream into categories.

use chrono::NaiveDate;
use overview_core::{Category, CategoryKey, Transaction, TransportCategory, earliest_date};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::category_rules::RuleSet;

/// Every transaction of the source stream, filed under exactly one category.
/// All categories of `K` are present, possibly with an empty collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedTransactions<K: CategoryKey> {
    groups: BTreeMap<K, Vec<Transaction>>,
}

impl<K: CategoryKey> CategorizedTransactions<K> {
    fn new() -> Self {
        Self {
            groups: K::ALL.iter().map(|k| (*k, Vec::new())).collect(),
        }
    }

    /// Transactions of `key`, in input order.
    pub fn get(&self, key: K) -> &[Transaction] {
        self.groups.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories in declaration order with their transactions.
    pub fn iter(&self) -> impl Iterator<Item = (K, &[Transaction])> {
        self.groups.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn total_len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Earliest date across all categories.
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        earliest_date(self.groups.values().flatten())
    }

    /// Transactions of `key` sorted by date (stable for equal dates).
    pub fn sorted_by_date(&self, key: K) -> Vec<Transaction> {
        let mut txns = self.get(key).to_vec();
        txns.sort_by_key(|t| t.date);
        txns
    }
}

/// Partition `txns` with `rules`. Unmatched transactions go to `K::catch_all()`.
pub fn categorize<K: CategoryKey>(txns: &[Transaction], rules: &RuleSet<K>) -> CategorizedTransactions<K> {
    let mut out = CategorizedTransactions::new();
    for txn in txns {
        let key = rules.classify(txn);
        out.groups.entry(key).or_default().push(txn.clone());
    }

    for (key, group) in out.iter() {
        debug!(category = key.name(), count = group.len(), "categorized");
    }
    out
}

/// Split the transport category into its sub-categories.
pub fn categorize_transport(
    categorized: &CategorizedTransactions<Category>,
    rules: &RuleSet<TransportCategory>,
) -> CategorizedTransactions<TransportCategory> {
    let transport = categorized.get(Category::Transport);
    info!(count = transport.len(), "organise transport into sub-categories");
    categorize(transport, rules)
}

use serde::Serialize;

use crate::ledger::{Category, Transaction};

/// Expense totals per recognized category, always holding all five buckets
/// in [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    buckets: Vec<(Category, f64)>,
}

impl Default for CategoryBreakdown {
    fn default() -> Self {
        Self {
            buckets: Category::ALL.iter().map(|category| (*category, 0.0)).collect(),
        }
    }
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> f64 {
        self.buckets
            .iter()
            .find(|(bucket, _)| *bucket == category)
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.buckets.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.buckets.iter().map(|(_, amount)| amount).sum()
    }

    fn add(&mut self, category: Category, amount: f64) {
        if let Some((_, total)) = self
            .buckets
            .iter_mut()
            .find(|(bucket, _)| *bucket == category)
        {
            *total += amount;
        }
    }
}

/// Sums expenses by category. Income is ignored and labels outside the
/// recognized set land in [`Category::Other`].
pub fn category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        breakdown.add(txn.category_label().bucket(), txn.amount);
    }
    breakdown
}

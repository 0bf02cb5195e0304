use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::{
    errors::LedgerError,
    ledger::{Transaction, TransactionKind},
};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar month bucket. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Display label such as `Jan 2024`.
    pub fn label(&self) -> String {
        let name = self
            .month
            .checked_sub(1)
            .and_then(|index| MONTH_ABBREVIATIONS.get(index as usize))
            .copied()
            .unwrap_or("???");
        format!("{name} {:04}", self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: MonthKey,
    pub label: String,
    pub income: f64,
    pub expense: f64,
}

/// Month-bucketed totals plus the records that could not be bucketed.
#[derive(Debug, Default)]
pub struct MonthlySeries {
    pub points: Vec<MonthlyPoint>,
    pub skipped: Vec<LedgerError>,
}

impl MonthlySeries {
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|point| point.label.as_str()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Groups transactions by calendar month, oldest month first.
///
/// A transaction whose date does not parse is left out of every bucket and
/// reported once in [`MonthlySeries::skipped`]; the remaining months are still
/// produced.
pub fn monthly_series(transactions: &[Transaction]) -> MonthlySeries {
    let mut buckets: BTreeMap<MonthKey, (f64, f64)> = BTreeMap::new();
    let mut skipped = Vec::new();

    for txn in transactions {
        let Some(date) = txn.date.parse() else {
            tracing::warn!(id = %txn.id, date = %txn.date, "skipping transaction with unparseable date");
            skipped.push(LedgerError::Aggregation {
                id: txn.id,
                date: txn.date.to_string(),
            });
            continue;
        };
        let key = MonthKey {
            year: date.year(),
            month: date.month(),
        };
        let (income, expense) = buckets.entry(key).or_insert((0.0, 0.0));
        match txn.kind {
            TransactionKind::Income => *income += txn.amount,
            TransactionKind::Expense => *expense += txn.amount,
        }
    }

    let points = buckets
        .into_iter()
        .map(|(month, (income, expense))| MonthlyPoint {
            month,
            label: month.label(),
            income,
            expense,
        })
        .collect();

    MonthlySeries { points, skipped }
}

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

use super::category::CategoryLabel;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of a transaction. Amounts are always stored as positive magnitudes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::validation(format!(
                "unknown transaction kind `{other}` (expected income or expense)"
            ))),
        }
    }
}

/// Calendar date of a transaction, kept as the text it was stored with.
///
/// Dates written through the ledger are always `YYYY-MM-DD`; documents written
/// by other tools may carry anything, which is why parsing is deferred.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EntryDate(String);

impl EntryDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date.format(DATE_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses `YYYY-MM-DD`, also accepting a full RFC 3339 timestamp.
    pub fn parse(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|stamp| stamp.date_naive())
            })
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NaiveDate> for EntryDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive(date)
    }
}

/// One recorded income or expense event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(alias = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: EntryDate,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by `kind`.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn category_label(&self) -> CategoryLabel<'_> {
        CategoryLabel::classify(&self.category)
    }
}

/// User-supplied fields for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: String,
}

impl TransactionDraft {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
            category: category.into(),
            date: date.into(),
        }
    }

    pub fn income(name: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self::new(name, amount, TransactionKind::Income, "Other", date)
    }

    pub fn expense(
        name: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self::new(name, amount, TransactionKind::Expense, category, date)
    }

    /// Checks the draft without consuming it.
    pub fn validate(&self) -> Result<()> {
        self.checked_fields().map(|_| ())
    }

    /// Validates the draft and stamps it with `id`.
    pub(crate) fn into_transaction(self, id: Uuid) -> Result<Transaction> {
        let (name, date) = self.checked_fields()?;
        Ok(Transaction {
            id,
            name,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: EntryDate::from_naive(date),
        })
    }

    fn checked_fields(&self) -> Result<(String, NaiveDate)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(LedgerError::validation("name must not be empty"));
        }
        if !self.amount.is_finite() {
            return Err(LedgerError::validation("amount must be a finite number"));
        }
        if self.amount <= 0.0 {
            return Err(LedgerError::validation(format!(
                "amount must be greater than zero (got {})",
                self.amount
            )));
        }
        let raw_date = self.date.trim();
        if raw_date.is_empty() {
            return Err(LedgerError::validation("date is required"));
        }
        let date = EntryDate::new(raw_date).parse().ok_or_else(|| {
            LedgerError::validation(format!("date `{raw_date}` is not a valid YYYY-MM-DD date"))
        })?;
        Ok((name.to_string(), date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_validation_rejects_bad_fields() {
        let cases = [
            TransactionDraft::expense("   ", 10.0, "Food", "2024-01-01"),
            TransactionDraft::expense("Lunch", f64::NAN, "Food", "2024-01-01"),
            TransactionDraft::expense("Lunch", f64::INFINITY, "Food", "2024-01-01"),
            TransactionDraft::expense("Lunch", 0.0, "Food", "2024-01-01"),
            TransactionDraft::expense("Lunch", -3.0, "Food", "2024-01-01"),
            TransactionDraft::expense("Lunch", 10.0, "Food", ""),
            TransactionDraft::expense("Lunch", 10.0, "Food", "someday"),
        ];
        for draft in cases {
            let err = draft.validate().unwrap_err();
            assert!(err.is_validation(), "{draft:?} -> {err:?}");
        }
    }

    #[test]
    fn into_transaction_trims_name_and_normalizes_date() {
        let draft = TransactionDraft::income("  Salary ", 1000.0, "2024-01-15T09:30:00Z");
        let txn = draft.into_transaction(Uuid::nil()).unwrap();
        assert_eq!(txn.name, "Salary");
        assert_eq!(txn.date.as_str(), "2024-01-15");
        assert!(txn.is_income());
        assert_eq!(txn.signed_amount(), 1000.0);
    }

    #[test]
    fn legacy_type_field_is_accepted() {
        let json = r#"{"id":"00000000-0000-0000-0000-000000000000","name":"Rent",
            "amount":900,"type":"expense","category":"Rent","date":"2024-02-01"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.signed_amount(), -900.0);

        let out = serde_json::to_string(&txn).unwrap();
        assert!(out.contains("\"kind\":\"expense\""), "{out}");
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert!("refund".parse::<TransactionKind>().unwrap_err().is_validation());
    }
}

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount};

pub type ExpenseId = i64;

/// A single recorded expense, owned by exactly one account. Expenses are
/// immutable once stored; corrections are made by deleting and re-adding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// Owning account. Must reference an existing account row.
    pub account_id: AccountId,
    /// Free-form date text supplied by the caller; no format is enforced.
    pub date: String,
    /// Human-readable description, may be empty.
    pub description: String,
    /// Signed amount. Negative values are accepted and included in totals.
    pub amount: Amount,
}

impl Expense {
    /// Create a new expense. The id is assigned by the repository on insert.
    pub fn new(
        account_id: AccountId,
        date: impl Into<String>,
        description: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            id: 0, // Will be set by repository
            account_id,
            date: date.into(),
            description: description.into(),
            amount,
        }
    }
}

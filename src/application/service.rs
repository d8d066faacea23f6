use crate::domain::{
    Account, AccountId, Amount, Expense, ExpenseId, Receipt, UNSELECTED_ACCOUNT,
};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations for the expense
/// ledger. This is the primary interface for any client (CLI, API, TUI,
/// etc.). The service holds no state of its own beyond the repository; the
/// "currently selected account" concept belongs to the caller, which passes
/// an explicit account id to every operation.
pub struct LedgerService {
    repo: Repository,
}

/// Expenses owned by one account, together with their total.
pub struct ExpenseListing {
    pub expenses: Vec<Expense>,
    pub total: Amount,
}

/// Name and aggregate spend for one account.
#[derive(Debug)]
pub struct AccountSummary {
    pub account: Account,
    pub total_expense: Amount,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Open the store at the given path, creating the database file and
    /// schema when absent. Never destructive: existing tables and rows are
    /// left untouched.
    pub async fn open(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Account operations
    // ========================

    /// Create a new account. The name must contain at least one
    /// non-whitespace character; duplicates are allowed.
    pub async fn create_account(&self, name: String) -> Result<Account, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidAccountName);
        }

        let mut account = Account::new(name);
        self.repo.insert_account(&mut account).await?;
        Ok(account)
    }

    /// List all accounts in storage order.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.repo.list_accounts().await?)
    }

    /// Delete an account and every expense it owns, atomically. Returns the
    /// removed account, or `None` when the id does not exist (a no-op, not
    /// an error). Confirmation is the caller's responsibility.
    pub async fn delete_account(&self, id: AccountId) -> Result<Option<Account>, AppError> {
        let Some(account) = self.repo.get_account(id).await? else {
            return Ok(None);
        };

        self.repo.delete_account_cascade(id).await?;
        Ok(Some(account))
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense against an account.
    pub async fn add_expense(
        &self,
        account_id: AccountId,
        date: String,
        description: String,
        amount: Amount,
    ) -> Result<Expense, AppError> {
        if account_id == UNSELECTED_ACCOUNT {
            return Err(AppError::NoAccountSelected);
        }
        if !amount.is_finite() {
            return Err(AppError::InvalidAmount(amount.to_string()));
        }
        if self.repo.get_account(account_id).await?.is_none() {
            return Err(AppError::AccountNotFound(account_id));
        }

        let mut expense = Expense::new(account_id, date, description, amount);
        self.repo.insert_expense(&mut expense).await?;
        Ok(expense)
    }

    /// List an account's expenses in storage order, together with their
    /// total. An account with no expenses (including an unknown or deleted
    /// id) yields an empty listing with total 0.0.
    pub async fn list_expenses(&self, account_id: AccountId) -> Result<ExpenseListing, AppError> {
        let expenses = self.repo.list_expenses_for_account(account_id).await?;
        let total = self.repo.sum_expenses_for_account(account_id).await?;
        Ok(ExpenseListing { expenses, total })
    }

    /// Delete a single expense by its id. Returns the number of rows removed
    /// (0 when the id does not exist; a no-op, not an error).
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<u64, AppError> {
        Ok(self.repo.delete_expense(id).await?)
    }

    /// Delete every expense of an account whose date, description and amount
    /// all match exactly. Identical rows are indistinguishable under this
    /// addressing, so a single call may remove more than one of them.
    /// Callers that captured an expense id should prefer `delete_expense`.
    pub async fn delete_expenses_matching(
        &self,
        account_id: AccountId,
        date: &str,
        description: &str,
        amount: Amount,
    ) -> Result<u64, AppError> {
        Ok(self
            .repo
            .delete_expenses_matching(account_id, date, description, amount)
            .await?)
    }

    // ========================
    // Reporting operations
    // ========================

    /// Get the name and total spend for an account. The total is 0.0 for an
    /// account with no expenses, never an error or a missing value.
    pub async fn account_summary(&self, account_id: AccountId) -> Result<AccountSummary, AppError> {
        let account = self
            .repo
            .get_account(account_id)
            .await?
            .ok_or(AppError::AccountNotFound(account_id))?;

        let total_expense = self.repo.sum_expenses_for_account(account_id).await?;
        Ok(AccountSummary {
            account,
            total_expense,
        })
    }

    /// Render the printable receipt for an account: every owned expense in
    /// storage order plus the trailing total.
    pub async fn generate_receipt(&self, account_id: AccountId) -> Result<String, AppError> {
        if account_id == UNSELECTED_ACCOUNT {
            return Err(AppError::NoAccountSelected);
        }

        let account = self
            .repo
            .get_account(account_id)
            .await?
            .ok_or(AppError::AccountNotFound(account_id))?;

        let expenses = self.repo.list_expenses_for_account(account_id).await?;
        Ok(Receipt::new(&account, &expenses).render())
    }
}

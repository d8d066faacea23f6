use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::{Account, AccountId, Amount, Expense, ExpenseId};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying accounts and expenses.
///
/// Every method checks a connection out of the pool for the duration of its
/// query and releases it on every exit path, including failure. No handle
/// outlives a single operation.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Every statement is `CREATE ... IF NOT
    /// EXISTS`, so this is safe to repeat on each startup and never touches
    /// existing data.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Account operations
    // ========================

    /// Save a new account to the database.
    /// Assigns the generated row id.
    pub async fn insert_account(&self, account: &mut Account) -> Result<()> {
        let row = sqlx::query("INSERT INTO accounts (name) VALUES (?) RETURNING id")
            .bind(&account.name)
            .fetch_one(&self.pool)
            .await
            .context("Failed to insert account")?;

        account.id = row.get("id");
        Ok(())
    }

    /// Get an account by id.
    pub async fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        let row = sqlx::query("SELECT id, name FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch account")?;

        Ok(row.map(|row| Self::row_to_account(&row)))
    }

    /// List all accounts in storage order.
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query("SELECT id, name FROM accounts ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list accounts")?;

        Ok(rows.iter().map(Self::row_to_account).collect())
    }

    /// Delete an account and every expense that references it, in one
    /// transaction. Returns the number of accounts removed (0 or 1).
    pub async fn delete_account_cascade(&self, id: AccountId) -> Result<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query("DELETE FROM expenses WHERE account_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete expenses for account")?;

        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete account")?;

        tx.commit()
            .await
            .context("Failed to commit account deletion")?;

        Ok(result.rows_affected())
    }

    // ========================
    // Expense operations
    // ========================

    /// Save a new expense to the database.
    /// Assigns the generated row id.
    pub async fn insert_expense(&self, expense: &mut Expense) -> Result<()> {
        let row = sqlx::query(
            r#"
            INSERT INTO expenses (account_id, date, description, amount)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(expense.account_id)
        .bind(&expense.date)
        .bind(&expense.description)
        .bind(expense.amount)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert expense")?;

        expense.id = row.get("id");
        Ok(())
    }

    /// List the expenses owned by an account in storage order.
    pub async fn list_expenses_for_account(&self, account_id: AccountId) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, date, description, amount
            FROM expenses
            WHERE account_id = ?
            ORDER BY id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        Ok(rows.iter().map(Self::row_to_expense).collect())
    }

    /// Sum the expense amounts for an account using SQL aggregation.
    /// Returns 0.0 for an account with no expenses.
    pub async fn sum_expenses_for_account(&self, account_id: AccountId) -> Result<Amount> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(amount), 0.0) as total FROM expenses WHERE account_id = ?",
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to sum expenses")?;

        Ok(row.get("total"))
    }

    /// Delete an expense by id. Returns the number of rows removed (0 or 1).
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;

        Ok(result.rows_affected())
    }

    /// Delete every expense of an account matching date, description and
    /// amount exactly. Returns the number of rows removed, which may exceed
    /// one when identical rows exist.
    pub async fn delete_expenses_matching(
        &self,
        account_id: AccountId,
        date: &str,
        description: &str,
        amount: Amount,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE account_id = ? AND date = ? AND description = ? AND amount = ?
            "#,
        )
        .bind(account_id)
        .bind(date)
        .bind(description)
        .bind(amount)
        .execute(&self.pool)
        .await
        .context("Failed to delete matching expenses")?;

        Ok(result.rows_affected())
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Account {
        Account {
            id: row.get("id"),
            name: row.get("name"),
        }
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Expense {
        Expense {
            id: row.get("id"),
            account_id: row.get("account_id"),
            date: row.get("date"),
            description: row.get("description"),
            amount: row.get("amount"),
        }
    }
}

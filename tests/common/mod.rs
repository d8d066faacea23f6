// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use expensa::application::LedgerService;
use expensa::domain::Account;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::open(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Test fixture: seeded accounts
pub struct SeededAccounts;

impl SeededAccounts {
    /// Create a "Groceries" account holding the Milk and Bread expenses
    /// (3.50 + 2.25 = 5.75).
    pub async fn groceries(service: &LedgerService) -> Result<Account> {
        let account = service.create_account("Groceries".into()).await?;
        service
            .add_expense(account.id, "2024-01-01".into(), "Milk".into(), 3.50)
            .await?;
        service
            .add_expense(account.id, "2024-01-02".into(), "Bread".into(), 2.25)
            .await?;
        Ok(account)
    }

    /// Create an unrelated account with one expense, for interleaving tests.
    pub async fn utilities(service: &LedgerService) -> Result<Account> {
        let account = service.create_account("Utilities".into()).await?;
        service
            .add_expense(account.id, "2024-01-15".into(), "Power".into(), 40.25)
            .await?;
        Ok(account)
    }
}

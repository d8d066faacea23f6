use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::{format_amount, Account, AccountId, Amount, Expense};

/// Database snapshot for full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub accounts: Vec<AccountRecords>,
}

/// One account together with everything it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecords {
    pub account: Account,
    pub expenses: Vec<Expense>,
    pub total: Amount,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export expenses to CSV format, optionally restricted to one account.
    pub async fn export_expenses_csv<W: Write>(
        &self,
        writer: W,
        account_id: Option<AccountId>,
    ) -> Result<usize> {
        let accounts = match account_id {
            Some(id) => vec![self.service.account_summary(id).await?.account],
            None => self.service.list_accounts().await?,
        };

        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["id", "account", "date", "description", "amount"])?;

        let mut count = 0;
        for account in &accounts {
            let listing = self.service.list_expenses(account.id).await?;
            for expense in &listing.expenses {
                csv_writer.write_record([
                    expense.id.to_string(),
                    account.name.clone(),
                    expense.date.clone(),
                    expense.description.clone(),
                    format_amount(expense.amount),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export per-account totals to CSV format
    pub async fn export_totals_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let accounts = self.service.list_accounts().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["id", "account", "total_expense"])?;

        let mut count = 0;
        for account in &accounts {
            let summary = self.service.account_summary(account.id).await?;
            csv_writer.write_record([
                account.id.to_string(),
                account.name.clone(),
                format_amount(summary.total_expense),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export full database as JSON snapshot
    pub async fn export_full_json<W: Write>(&self, mut writer: W) -> Result<DatabaseSnapshot> {
        let mut accounts = Vec::new();
        for account in self.service.list_accounts().await? {
            let listing = self.service.list_expenses(account.id).await?;
            accounts.push(AccountRecords {
                account,
                expenses: listing.expenses,
                total: listing.total,
            });
        }

        let snapshot = DatabaseSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            accounts,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

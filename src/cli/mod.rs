use std::io::Write as _;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::application::{AppError, LedgerService};
use crate::domain::{format_amount, parse_amount, AccountId, Amount, ExpenseId};

/// Expensa - Expense Tracker
#[derive(Parser)]
#[command(name = "expensa")]
#[command(about = "A local-first expense tracker backed by a SQLite ledger")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "expensa.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show an account's name and total spend
    Summary {
        /// Account id
        account: AccountId,
    },

    /// Print the receipt for an account
    Receipt {
        /// Account id
        account: AccountId,
    },

    /// Export data to CSV or JSON
    Export {
        /// What to export: expenses, totals, full
        export_type: String,

        /// Restrict expense export to one account id
        #[arg(long)]
        account: Option<AccountId>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Add {
        /// Account name
        name: String,
    },

    /// List all accounts
    List,

    /// Delete an account and every expense it owns
    Delete {
        /// Account id
        id: AccountId,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "3.50" or "3")
        amount: String,

        /// Account id the expense belongs to
        #[arg(long)]
        account: AccountId,

        /// Expense date (free-form text, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Description of the expense
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List an account's expenses and their total
    List {
        /// Account id
        account: AccountId,
    },

    /// Delete an expense by id, or every exact match by field
    Delete {
        /// Expense id (as shown by `expense list`)
        id: Option<ExpenseId>,

        /// Account id, for match-based deletion
        #[arg(long)]
        account: Option<AccountId>,

        /// Date to match exactly
        #[arg(long)]
        date: Option<String>,

        /// Description to match exactly
        #[arg(long)]
        description: Option<String>,

        /// Amount to match exactly (e.g., "3.50")
        #[arg(long)]
        amount: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if self.verbose {
            eprintln!("Using database: {}", self.database);
        }

        match self.command {
            Commands::Init => {
                LedgerService::open(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Account(account_cmd) => {
                let service = LedgerService::open(&self.database).await?;
                run_account_command(&service, account_cmd).await?;
            }

            Commands::Expense(expense_cmd) => {
                let service = LedgerService::open(&self.database).await?;
                run_expense_command(&service, expense_cmd).await?;
            }

            Commands::Summary { account } => {
                let service = LedgerService::open(&self.database).await?;
                let summary = service.account_summary(account).await?;
                println!("Account: {}", summary.account.name);
                println!("  Total expense: {}", format_amount(summary.total_expense));
            }

            Commands::Receipt { account } => {
                let service = LedgerService::open(&self.database).await?;
                let receipt = service.generate_receipt(account).await?;
                println!("{}", receipt);
            }

            Commands::Export {
                export_type,
                account,
                output,
            } => {
                let service = LedgerService::open(&self.database).await?;
                run_export_command(&service, &export_type, account, output.as_deref()).await?;
            }
        }

        Ok(())
    }
}

async fn run_account_command(service: &LedgerService, cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::Add { name } => {
            let account = service.create_account(name).await?;
            println!("Created account: {} ({})", account.name, account.id);
        }

        AccountCommands::List => {
            let accounts = service.list_accounts().await?;
            if accounts.is_empty() {
                println!("No accounts found.");
            } else {
                println!("{:<6} {:<25}", "ID", "NAME");
                println!("{}", "-".repeat(32));
                for account in accounts {
                    println!("{:<6} {:<25}", account.id, account.name);
                }
            }
        }

        AccountCommands::Delete { id, yes } => {
            if !yes {
                let prompt = format!("Delete account {} and all of its expenses?", id);
                if !confirm(&prompt)? {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            match service.delete_account(id).await? {
                Some(account) => println!("Deleted account: {} ({})", account.name, account.id),
                None => println!("No account with id {}.", id),
            }
        }
    }
    Ok(())
}

async fn run_expense_command(service: &LedgerService, cmd: ExpenseCommands) -> Result<()> {
    match cmd {
        ExpenseCommands::Add {
            amount,
            account,
            date,
            description,
        } => {
            let amount = parse_expense_amount(&amount)?;
            let date = date.unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

            let expense = service
                .add_expense(account, date, description, amount)
                .await?;

            println!(
                "Recorded expense {}: {} {} {}",
                expense.id,
                expense.date,
                format_amount(expense.amount),
                expense.description
            );
        }

        ExpenseCommands::List { account } => {
            let listing = service.list_expenses(account).await?;
            if listing.expenses.is_empty() {
                println!("No expenses found.");
            } else {
                println!(
                    "{:<6} {:<12} {:<25} {:>10}",
                    "ID", "DATE", "DESCRIPTION", "AMOUNT"
                );
                println!("{}", "-".repeat(56));
                for expense in &listing.expenses {
                    println!(
                        "{:<6} {:<12} {:<25} {:>10}",
                        expense.id,
                        expense.date,
                        expense.description,
                        format_amount(expense.amount)
                    );
                }
            }
            println!("Total: {}", format_amount(listing.total));
        }

        ExpenseCommands::Delete {
            id,
            account,
            date,
            description,
            amount,
        } => match (id, account, date, description, amount) {
            (Some(id), None, None, None, None) => {
                let removed = service.delete_expense(id).await?;
                if removed == 0 {
                    println!("No expense with id {}.", id);
                } else {
                    println!("Deleted expense {}.", id);
                }
            }
            (None, Some(account), Some(date), Some(description), Some(amount)) => {
                let amount = parse_expense_amount(&amount)?;
                let removed = service
                    .delete_expenses_matching(account, &date, &description, amount)
                    .await?;
                println!("Deleted {} expense(s).", removed);
            }
            _ => anyhow::bail!(
                "Provide an expense id, or all of --account, --date, --description and --amount"
            ),
        },
    }
    Ok(())
}

async fn run_export_command(
    service: &LedgerService,
    export_type: &str,
    account: Option<AccountId>,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match export_type {
        "expenses" => {
            let count = exporter.export_expenses_csv(writer, account).await?;
            if output.is_some() {
                eprintln!("Exported {} expenses", count);
            }
        }
        "totals" => {
            let count = exporter.export_totals_csv(writer).await?;
            if output.is_some() {
                eprintln!("Exported {} account totals", count);
            }
        }
        "full" => {
            let snapshot = exporter.export_full_json(writer).await?;
            if output.is_some() {
                let expense_count: usize =
                    snapshot.accounts.iter().map(|a| a.expenses.len()).sum();
                eprintln!(
                    "Exported full database: {} accounts, {} expenses",
                    snapshot.accounts.len(),
                    expense_count
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: expenses, totals, full",
                export_type
            );
        }
    }

    Ok(())
}

/// Parse amount text at the presentation boundary; the ledger itself only
/// accepts already-parsed numbers.
fn parse_expense_amount(input: &str) -> Result<Amount> {
    parse_amount(input)
        .map_err(|e| AppError::InvalidAmount(format!("'{}' ({})", input, e)).into())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read confirmation")?;

    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes"))
}

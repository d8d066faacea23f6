use thiserror::Error;

use crate::domain::AccountId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account name cannot be empty")]
    InvalidAccountName,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("No account selected")]
    NoAccountSelected,

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

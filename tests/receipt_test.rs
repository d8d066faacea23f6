mod common;

use anyhow::Result;
use common::{test_service, SeededAccounts};
use expensa::application::AppError;

#[tokio::test]
async fn test_summary_of_fresh_account_is_zero() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = service.create_account("Groceries".into()).await?;
    let summary = service.account_summary(account.id).await?;

    // No expenses yet: total 0.0, not an error and not a missing value.
    assert_eq!(summary.account.name, "Groceries");
    assert_eq!(summary.total_expense, 0.0);

    Ok(())
}

#[tokio::test]
async fn test_groceries_end_to_end() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = SeededAccounts::groceries(&service).await?;

    let summary = service.account_summary(account.id).await?;
    assert_eq!(summary.account.name, "Groceries");
    assert_eq!(summary.total_expense, 5.75);

    let receipt = service.generate_receipt(account.id).await?;
    assert!(receipt.contains("Account: Groceries"));
    assert!(receipt.contains("Milk"));
    assert!(receipt.contains("Bread"));
    assert!(receipt.ends_with("Total: 5.75"));

    Ok(())
}

#[tokio::test]
async fn test_receipt_lists_expenses_in_storage_order() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = SeededAccounts::groceries(&service).await?;
    let receipt = service.generate_receipt(account.id).await?;

    let milk = receipt.find("Milk").unwrap();
    let bread = receipt.find("Bread").unwrap();
    assert!(milk < bread);

    Ok(())
}

#[tokio::test]
async fn test_receipt_of_empty_account_has_zero_total() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = service.create_account("Empty".into()).await?;
    let receipt = service.generate_receipt(account.id).await?;

    assert!(receipt.contains("Account: Empty"));
    assert!(receipt.ends_with("Total: 0.00"));

    Ok(())
}

#[tokio::test]
async fn test_receipt_requires_a_selected_account() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.generate_receipt(0).await.unwrap_err();
    assert!(matches!(err, AppError::NoAccountSelected));

    Ok(())
}

#[tokio::test]
async fn test_receipt_for_unknown_account_fails() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.generate_receipt(42).await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(42)));

    Ok(())
}

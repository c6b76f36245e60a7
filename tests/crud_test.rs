mod common;

use anyhow::Result;
use common::{parse_date, test_service};
use expensa::application::AppError;
use expensa::domain::Category;

#[tokio::test]
async fn test_add_and_list_expense() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let expense = service
        .add_expense(parse_date("2024-01-05"), Category::Food, 42.50, "lunch")
        .await?;

    assert_eq!(expense.id, 1);
    assert_eq!(expense.date, parse_date("2024-01-05"));
    assert_eq!(expense.category, Category::Food);
    assert_eq!(expense.amount, 42.50);
    assert_eq!(expense.description, "lunch");

    let expenses = service.list_expenses().await?;
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0], expense);

    Ok(())
}

#[tokio::test]
async fn test_list_orders_most_recent_first() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .add_expense(parse_date("2024-03-01"), Category::Food, 1.0, "first")
        .await?;
    service
        .add_expense(parse_date("2024-01-01"), Category::Health, 2.0, "second")
        .await?;
    service
        .add_expense(parse_date("2024-02-01"), Category::Other, 3.0, "third")
        .await?;

    // Ordered by id descending, not by date
    let expenses = service.list_expenses().await?;
    let ids: Vec<i64> = expenses.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    Ok(())
}

#[tokio::test]
async fn test_add_rejects_non_positive_amount() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let zero = service
        .add_expense(parse_date("2024-01-05"), Category::Food, 0.0, "free?")
        .await;
    assert!(matches!(zero, Err(AppError::InvalidAmount(_))));

    let negative = service
        .add_expense(parse_date("2024-01-05"), Category::Food, -5.0, "refund")
        .await;
    assert!(matches!(negative, Err(AppError::InvalidAmount(_))));

    // Nothing was written
    let expenses = service.list_expenses().await?;
    assert!(expenses.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_replaces_all_fields_but_keeps_id() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let expense = service
        .add_expense(parse_date("2024-01-05"), Category::Food, 42.50, "lunch")
        .await?;

    let updated = service
        .update_expense(
            expense.id,
            parse_date("2024-01-06"),
            Category::Transport,
            10.0,
            "bus",
        )
        .await?;
    assert!(updated);

    let fetched = service.get_expense(expense.id).await?;
    assert_eq!(fetched.id, expense.id);
    assert_eq!(fetched.date, parse_date("2024-01-06"));
    assert_eq!(fetched.category, Category::Transport);
    assert_eq!(fetched.amount, 10.0);
    assert_eq!(fetched.description, "bus");

    Ok(())
}

#[tokio::test]
async fn test_update_rejects_non_positive_amount() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let expense = service
        .add_expense(parse_date("2024-01-05"), Category::Food, 42.50, "lunch")
        .await?;

    let result = service
        .update_expense(
            expense.id,
            parse_date("2024-01-06"),
            Category::Food,
            0.0,
            "lunch",
        )
        .await;
    assert!(matches!(result, Err(AppError::InvalidAmount(_))));

    // The stored record is untouched
    let fetched = service.get_expense(expense.id).await?;
    assert_eq!(fetched.amount, 42.50);

    Ok(())
}

#[tokio::test]
async fn test_update_missing_id_is_a_noop() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let updated = service
        .update_expense(99, parse_date("2024-01-06"), Category::Food, 10.0, "ghost")
        .await?;
    assert!(!updated);

    // No record was created by the attempt
    let expenses = service.list_expenses().await?;
    assert!(expenses.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_delete_expense() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let expense = service
        .add_expense(parse_date("2024-01-05"), Category::Food, 42.50, "lunch")
        .await?;

    let deleted = service.delete_expense(expense.id).await?;
    assert!(deleted);

    let lookup = service.get_expense(expense.id).await;
    assert!(matches!(lookup, Err(AppError::ExpenseNotFound(_))));
    assert!(service.list_expenses().await?.is_empty());

    // Deleting again reports not-found without erroring
    let deleted_again = service.delete_expense(expense.id).await?;
    assert!(!deleted_again);

    Ok(())
}

#[tokio::test]
async fn test_ids_are_never_reused_after_delete() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let first = service
        .add_expense(parse_date("2024-01-05"), Category::Food, 10.0, "a")
        .await?;
    let second = service
        .add_expense(parse_date("2024-01-06"), Category::Food, 20.0, "b")
        .await?;
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);

    service.delete_expense(second.id).await?;

    let third = service
        .add_expense(parse_date("2024-01-07"), Category::Food, 30.0, "c")
        .await?;
    assert_eq!(third.id, 3);

    Ok(())
}

#[tokio::test]
async fn test_empty_description_is_allowed() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let expense = service
        .add_expense(parse_date("2024-01-05"), Category::Water, 18.30, "")
        .await?;

    let fetched = service.get_expense(expense.id).await?;
    assert_eq!(fetched.description, "");

    Ok(())
}

#[tokio::test]
async fn test_full_lifecycle() -> Result<()> {
    let (service, _temp) = test_service().await?;

    // Add
    let expense = service
        .add_expense(parse_date("2024-01-05"), Category::Food, 42.50, "lunch")
        .await?;
    let expenses = service.list_expenses().await?;
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, 1);
    assert_eq!(expenses[0].amount, 42.50);

    // Update
    service
        .update_expense(
            expense.id,
            parse_date("2024-01-06"),
            Category::Transport,
            10.0,
            "bus",
        )
        .await?;
    let fetched = service.get_expense(expense.id).await?;
    assert_eq!(
        (fetched.date, fetched.category, fetched.amount, fetched.description.as_str()),
        (parse_date("2024-01-06"), Category::Transport, 10.0, "bus")
    );

    // Delete
    service.delete_expense(expense.id).await?;
    assert!(matches!(
        service.get_expense(expense.id).await,
        Err(AppError::ExpenseNotFound(1))
    ));
    assert!(service.list_expenses().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_init_is_idempotent() -> Result<()> {
    let (service, temp) = test_service().await?;

    service
        .add_expense(parse_date("2024-01-05"), Category::Food, 42.50, "lunch")
        .await?;

    // Re-initializing the same database keeps existing data intact
    let db_path = temp.path().join("test.db");
    let reopened = expensa::application::ExpenseService::init(db_path.to_str().unwrap()).await?;
    let expenses = reopened.list_expenses().await?;
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].description, "lunch");

    Ok(())
}

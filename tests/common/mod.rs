// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use expensa::application::ExpenseService;
use expensa::domain::Category;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = ExpenseService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse an ISO date string
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: a small ledger spread over January 2024
pub struct JanuaryLedger;

impl JanuaryLedger {
    /// Two Food expenses (10.00 + 5.00) and one Transport expense (20.00),
    /// dated the 5th, 12th and 20th.
    pub async fn seed(service: &ExpenseService) -> Result<()> {
        service
            .add_expense(parse_date("2024-01-05"), Category::Food, 10.0, "groceries")
            .await?;
        service
            .add_expense(parse_date("2024-01-12"), Category::Food, 5.0, "lunch")
            .await?;
        service
            .add_expense(parse_date("2024-01-20"), Category::Transport, 20.0, "fuel")
            .await?;
        Ok(())
    }
}

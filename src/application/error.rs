use thiserror::Error;

use crate::domain::Category;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown category: {0} (valid categories: {valid})", valid = Category::label_list())]
    InvalidCategory(String),

    #[error("Invalid amount: {0} (amount must be greater than zero)")]
    InvalidAmount(f64),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// A single spending record.
///
/// `id` is assigned by the database on insert and is never reused, even
/// after the row is deleted. `date` is the day the money was spent, not
/// the day the record was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub category: Category,
    pub amount: f64,
    pub description: String,
}

/// An expense about to be recorded, before the database has assigned it
/// an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: f64,
    pub description: String,
}

impl NewExpense {
    pub fn new(date: NaiveDate, category: Category, amount: f64, description: &str) -> Self {
        Self {
            date,
            category,
            amount,
            description: description.to_string(),
        }
    }
}

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{self, Category, Expense};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingReport {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub categories: Vec<CategorySummary>,
    pub total: f64,
    pub top_category: Option<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: f64,
    pub count: i64,
    pub percentage: f64,
}

/// Assemble a spending report from a list of expenses.
/// Category rows come out in display order; percentages are shares of
/// the grand total.
pub fn build_spending_report(
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    expenses: &[Expense],
) -> SpendingReport {
    let total = domain::total_spent(expenses);
    let top_category = domain::top_category(expenses).map(|(category, _)| category);

    let mut counts: BTreeMap<Category, i64> = BTreeMap::new();
    for expense in expenses {
        *counts.entry(expense.category).or_insert(0) += 1;
    }

    let categories = domain::totals_by_category(expenses)
        .into_iter()
        .map(|(category, spent)| CategorySummary {
            category,
            total: spent,
            count: counts.get(&category).copied().unwrap_or(0),
            percentage: if total > 0.0 {
                spent / total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    SpendingReport {
        from_date,
        to_date,
        categories,
        total,
        top_category,
    }
}

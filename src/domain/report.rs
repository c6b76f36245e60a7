use std::collections::BTreeMap;

use super::{Category, Expense};

/// Sum the amounts of a list of expenses.
/// An empty list totals 0.0.
pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum expense amounts per category.
/// Returns a map of category -> total, keyed in display order. Categories
/// with no expenses are absent from the map.
pub fn totals_by_category(expenses: &[Expense]) -> BTreeMap<Category, f64> {
    let mut totals: BTreeMap<Category, f64> = BTreeMap::new();

    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    totals
}

/// Find the category with the highest total spend.
/// Returns None for an empty list. Ties go to whichever category comes
/// first in display order.
pub fn top_category(expenses: &[Expense]) -> Option<(Category, f64)> {
    let mut top: Option<(Category, f64)> = None;

    for (category, spent) in totals_by_category(expenses) {
        let is_new_top = match top {
            Some((_, best)) => spent > best,
            None => true,
        };
        if is_new_top {
            top = Some((category, spent));
        }
    }

    top
}

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{Category, Expense, NewExpense};
use crate::storage::Repository;

use super::reporting::{build_spending_report, SpendingReport};
use super::AppError;

/// Application service providing high-level operations for the expense
/// ledger. This is the primary interface for any client (CLI, API, TUI,
/// etc.).
pub struct ExpenseService {
    repo: Repository,
}

impl ExpenseService {
    /// Create a new expense service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Record a new expense and return it with its assigned id.
    /// Validation happens before the database is touched; a rejected
    /// expense leaves the ledger unchanged.
    pub async fn add_expense(
        &self,
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: &str,
    ) -> Result<Expense, AppError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::InvalidAmount(amount));
        }

        let record = NewExpense::new(date, category, amount, description);
        let id = self.repo.save_expense(&record).await?;
        debug!(id, "recorded expense");

        Ok(Expense {
            id,
            date: record.date,
            category: record.category,
            amount: record.amount,
            description: record.description,
        })
    }

    /// Get an expense by id.
    pub async fn get_expense(&self, id: i64) -> Result<Expense, AppError> {
        self.repo
            .get_expense(id)
            .await?
            .ok_or(AppError::ExpenseNotFound(id))
    }

    /// List all expenses, most recently created first.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_expenses().await?)
    }

    /// List expenses within an inclusive date range.
    /// The filter applies only when both bounds are given; otherwise the
    /// whole ledger comes back, in insertion order.
    pub async fn expenses_in_range(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_expenses_in_range(from, to).await?)
    }

    /// Overwrite an expense with new values, keeping its id.
    /// Returns false when the id does not exist.
    pub async fn update_expense(
        &self,
        id: i64,
        date: NaiveDate,
        category: Category,
        amount: f64,
        description: &str,
    ) -> Result<bool, AppError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::InvalidAmount(amount));
        }

        let record = NewExpense::new(date, category, amount, description);
        let updated = self.repo.update_expense(id, &record).await?;
        if updated {
            debug!(id, "updated expense");
        }

        Ok(updated)
    }

    /// Delete an expense. Returns false when the id does not exist.
    pub async fn delete_expense(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self.repo.delete_expense(id).await?;
        if deleted {
            debug!(id, "deleted expense");
        }

        Ok(deleted)
    }

    /// Build a spending report over an inclusive date range.
    /// Both bounds absent means the whole ledger.
    pub async fn spending_report(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<SpendingReport, AppError> {
        let expenses = self.repo.list_expenses_in_range(from, to).await?;
        Ok(build_spending_report(from, to, &expenses))
    }
}

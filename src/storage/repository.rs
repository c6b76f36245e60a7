use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::domain::{Expense, NewExpense};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying expenses.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Idempotent: existing data is never
    /// altered or dropped.
    pub async fn migrate(&self) -> Result<()> {
        debug!("applying schema migrations");

        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Save a new expense and return the id the database assigned.
    /// Ids are monotonically increasing and never reused after a delete.
    pub async fn save_expense(&self, expense: &NewExpense) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO expenses (date, category, amount, description)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(expense.date.format("%Y-%m-%d").to_string())
        .bind(expense.category.as_str())
        .bind(expense.amount)
        .bind(&expense.description)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save expense")?;

        Ok(row.get("id"))
    }

    /// Get an expense by id.
    pub async fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, category, amount, description
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch expense")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_expense(&row)?)),
            None => Ok(None),
        }
    }

    /// List all expenses, most recently created first.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, category, amount, description
            FROM expenses
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// List expenses with dates between the two bounds, inclusive.
    /// The filter only applies when both bounds are present; with an
    /// incomplete range the whole ledger is returned. Callers pass both
    /// bounds or neither. Rows come back in insertion order.
    pub async fn list_expenses_in_range(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>> {
        let rows = match (from, to) {
            (Some(from), Some(to)) => {
                sqlx::query(
                    r#"
                    SELECT id, date, category, amount, description
                    FROM expenses
                    WHERE date BETWEEN ? AND ?
                    ORDER BY id
                    "#,
                )
                .bind(from.format("%Y-%m-%d").to_string())
                .bind(to.format("%Y-%m-%d").to_string())
                .fetch_all(&self.pool)
                .await
                .context("Failed to list expenses in range")?
            }
            _ => {
                sqlx::query("SELECT id, date, category, amount, description FROM expenses ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
                    .context("Failed to list expenses")?
            }
        };

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Overwrite every field of an expense except its id.
    /// Returns false when no row has the given id; never creates a row.
    pub async fn update_expense(&self, id: i64, expense: &NewExpense) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET date = ?, category = ?, amount = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.date.format("%Y-%m-%d").to_string())
        .bind(expense.category.as_str())
        .bind(expense.amount)
        .bind(&expense.description)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update expense")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an expense. Returns false when no row had the given id.
    /// The id is not reused by later inserts.
    pub async fn delete_expense(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        let date_str: String = row.get("date");
        let category_str: String = row.get("category");

        Ok(Expense {
            id: row.get("id"),
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .with_context(|| format!("Invalid expense date: {}", date_str))?,
            category: category_str
                .parse()
                .with_context(|| format!("Invalid expense category: {}", category_str))?,
            amount: row.get("amount"),
            description: row.get("description"),
        })
    }
}

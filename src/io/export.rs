use anyhow::Result;
use std::io::Write;

use crate::application::ExpenseService;

/// Exporter for writing ledger data to open formats
pub struct Exporter<'a> {
    service: &'a ExpenseService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a ExpenseService) -> Self {
        Self { service }
    }

    /// Export all expenses to CSV, in insertion order.
    /// Amounts are written with full round-trip precision; two-decimal
    /// rounding is display-only.
    pub async fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let expenses = self.service.expenses_in_range(None, None).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["id", "date", "category", "amount", "description"])?;

        let mut count = 0;
        for expense in &expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.date.format("%Y-%m-%d").to_string(),
                expense.category.as_str().to_string(),
                expense.amount.to_string(),
                expense.description.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}

use anyhow::Result;
use chrono::NaiveDate;
use std::io::Read;

use crate::application::ExpenseService;
use crate::domain::{parse_amount, Category};

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Importer for loading expenses into the ledger
pub struct Importer<'a> {
    service: &'a ExpenseService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a ExpenseService) -> Self {
        Self { service }
    }

    /// Import expenses from CSV in the layout the exporter writes.
    /// The id column is informational only; imported rows get fresh ids.
    /// Rows that fail validation are reported per line and skipped
    /// without aborting the batch. With `dry_run` set, rows are
    /// validated but nothing is written.
    pub async fn import_expenses_csv<R: Read>(
        &self,
        reader: R,
        dry_run: bool,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut imported = 0;
        let mut skipped = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    skipped += 1;
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let date_str = record.get(1).unwrap_or("");
            let category_str = record.get(2).unwrap_or("");
            let amount_str = record.get(3).unwrap_or("");
            let description = record.get(4).unwrap_or("");

            let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    skipped += 1;
                    errors.push(ImportError {
                        line,
                        field: Some("date".to_string()),
                        error: format!("Invalid date: {}", date_str),
                    });
                    continue;
                }
            };

            let category = match category_str.parse::<Category>() {
                Ok(c) => c,
                Err(_) => {
                    skipped += 1;
                    errors.push(ImportError {
                        line,
                        field: Some("category".to_string()),
                        error: format!("Unknown category: {}", category_str),
                    });
                    continue;
                }
            };

            let amount = match parse_amount(amount_str) {
                Ok(a) if a > 0.0 => a,
                Ok(a) => {
                    skipped += 1;
                    errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: format!("Amount must be greater than zero: {}", a),
                    });
                    continue;
                }
                Err(_) => {
                    skipped += 1;
                    errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: format!("Invalid amount: {}", amount_str),
                    });
                    continue;
                }
            };

            // Skip actual insertion on a dry run
            if dry_run {
                imported += 1;
                continue;
            }

            match self
                .service
                .add_expense(date, category, amount, description)
                .await
            {
                Ok(_) => imported += 1,
                Err(e) => {
                    skipped += 1;
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("Insert failed: {}", e),
                    });
                }
            }
        }

        Ok(ImportResult {
            imported,
            skipped,
            errors,
        })
    }
}

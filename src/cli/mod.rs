use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::application::{AppError, ExpenseService};
use crate::domain::{format_amount, parse_amount, Category, Expense};

/// Expensa - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "expensa")]
#[command(about = "A local-first personal expense tracker backed by a SQLite ledger")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "expenses.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record a new expense
    Add {
        /// Date of the expense (ISO 8601 format: YYYY-MM-DD)
        date: String,

        /// Expense category (run `categories` for the valid set)
        category: String,

        /// Amount spent (e.g., "42.50" or "42")
        amount: String,

        /// Description of the expense
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List expenses, most recent first
    List {
        /// Only show expenses on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only show expenses on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show a single expense
    Show {
        /// Expense id
        id: i64,
    },

    /// Edit an expense; omitted fields keep their current values
    Edit {
        /// Expense id
        id: i64,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New category
        #[arg(long)]
        category: Option<String>,

        /// New amount
        #[arg(long)]
        amount: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense id
        id: i64,
    },

    /// Spending report: total, per-category breakdown, top category
    Report {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export expenses to CSV
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import expenses from CSV
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Validate without importing
        #[arg(long)]
        dry_run: bool,
    },

    /// List the valid expense categories
    Categories,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                ExpenseService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                date,
                category,
                amount,
                description,
            } => {
                let service = ExpenseService::connect(&self.database).await?;
                run_add(&service, &date, &category, &amount, &description).await?;
            }

            Commands::List { from, to } => {
                let service = ExpenseService::connect(&self.database).await?;
                run_list(&service, from.as_deref(), to.as_deref()).await?;
            }

            Commands::Show { id } => {
                let service = ExpenseService::connect(&self.database).await?;
                run_show(&service, id).await?;
            }

            Commands::Edit {
                id,
                date,
                category,
                amount,
                description,
            } => {
                let service = ExpenseService::connect(&self.database).await?;
                run_edit(
                    &service,
                    id,
                    date.as_deref(),
                    category.as_deref(),
                    amount.as_deref(),
                    description.as_deref(),
                )
                .await?;
            }

            Commands::Delete { id } => {
                let service = ExpenseService::connect(&self.database).await?;
                run_delete(&service, id).await?;
            }

            Commands::Report { from, to, format } => {
                let service = ExpenseService::connect(&self.database).await?;
                run_report(&service, from.as_deref(), to.as_deref(), &format).await?;
            }

            Commands::Export { output } => {
                let service = ExpenseService::connect(&self.database).await?;
                run_export(&service, output.as_deref()).await?;
            }

            Commands::Import { input, dry_run } => {
                let service = ExpenseService::connect(&self.database).await?;
                run_import(&service, input.as_deref(), dry_run).await?;
            }

            Commands::Categories => {
                for category in Category::ALL {
                    println!("{}", category);
                }
            }
        }

        Ok(())
    }
}

async fn run_add(
    service: &ExpenseService,
    date: &str,
    category: &str,
    amount: &str,
    description: &str,
) -> Result<()> {
    let date = parse_date(date)?;
    let category = parse_category(category)?;
    let amount = parse_amount(amount).context("Invalid amount format. Use '42.50' or '42'")?;

    let expense = service
        .add_expense(date, category, amount, description)
        .await?;

    println!(
        "Recorded expense #{}: {} on {} ({})",
        expense.id,
        format_amount(expense.amount),
        expense.date.format("%Y-%m-%d"),
        expense.category
    );
    Ok(())
}

async fn run_list(service: &ExpenseService, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let from_date = from.map(parse_date).transpose()?;
    let to_date = to.map(parse_date).transpose()?;

    let expenses = if from_date.is_none() && to_date.is_none() {
        service.list_expenses().await?
    } else {
        if from_date.is_some() != to_date.is_some() {
            eprintln!("Note: date filtering needs both --from and --to; showing all expenses.");
        }
        service.expenses_in_range(from_date, to_date).await?
    };

    print_expense_table(&expenses);
    Ok(())
}

async fn run_show(service: &ExpenseService, id: i64) -> Result<()> {
    let expense = service.get_expense(id).await?;

    println!("Expense #{}", expense.id);
    println!("  Date:        {}", expense.date.format("%Y-%m-%d"));
    println!("  Category:    {}", expense.category);
    println!("  Amount:      {}", format_amount(expense.amount));
    if !expense.description.is_empty() {
        println!("  Description: {}", expense.description);
    }
    Ok(())
}

async fn run_edit(
    service: &ExpenseService,
    id: i64,
    date: Option<&str>,
    category: Option<&str>,
    amount: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    // Load the current record first so omitted fields keep their values;
    // the update itself always overwrites the whole row.
    let current = match service.get_expense(id).await {
        Ok(expense) => expense,
        Err(AppError::ExpenseNotFound(_)) => {
            println!("No expense found with id {}.", id);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let new_date = match date {
        Some(s) => parse_date(s)?,
        None => current.date,
    };
    let new_category = match category {
        Some(s) => parse_category(s)?,
        None => current.category,
    };
    let new_amount = match amount {
        Some(s) => parse_amount(s).context("Invalid amount format. Use '42.50' or '42'")?,
        None => current.amount,
    };
    let new_description = description.unwrap_or(&current.description);

    let updated = service
        .update_expense(id, new_date, new_category, new_amount, new_description)
        .await?;

    if updated {
        println!("Updated expense #{}.", id);
    } else {
        println!("No expense found with id {}.", id);
    }
    Ok(())
}

async fn run_delete(service: &ExpenseService, id: i64) -> Result<()> {
    if service.delete_expense(id).await? {
        println!("Deleted expense #{}.", id);
    } else {
        println!("No expense found with id {}.", id);
    }
    Ok(())
}

async fn run_report(
    service: &ExpenseService,
    from: Option<&str>,
    to: Option<&str>,
    format: &str,
) -> Result<()> {
    let from_date = from.map(parse_date).transpose()?;
    let to_date = to.map(parse_date).transpose()?;

    if from_date.is_some() != to_date.is_some() {
        eprintln!("Note: date filtering needs both --from and --to; reporting on all expenses.");
    }

    let report = service.spending_report(from_date, to_date).await?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "csv" => {
            println!("category,total,count,percentage");
            for cat in &report.categories {
                println!(
                    "{},{},{},{:.2}",
                    cat.category, cat.total, cat.count, cat.percentage
                );
            }
        }
        _ => {
            // Table format
            println!("Spending Report");
            match (report.from_date, report.to_date) {
                (Some(from), Some(to)) => println!(
                    "Period: {} to {}",
                    from.format("%Y-%m-%d"),
                    to.format("%Y-%m-%d")
                ),
                _ => println!("Period: all expenses"),
            }
            println!();
            println!(
                "{:<14} {:>12} {:>8} {:>8}",
                "CATEGORY", "TOTAL", "COUNT", "PERCENT"
            );
            println!("{}", "-".repeat(46));

            for cat in &report.categories {
                println!(
                    "{:<14} {:>12} {:>8} {:>7.1}%",
                    cat.category.as_str(),
                    format_amount(cat.total),
                    cat.count,
                    cat.percentage
                );
            }

            println!("{}", "-".repeat(46));
            println!("{:<14} {:>12}", "TOTAL", format_amount(report.total));

            if let Some(top) = report.top_category {
                println!();
                println!("Top category: {}", top);
            }
        }
    }

    Ok(())
}

async fn run_export(service: &ExpenseService, output: Option<&str>) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = exporter.export_expenses_csv(writer).await?;
    if output.is_some() {
        eprintln!("Exported {} expenses", count);
    }

    Ok(())
}

async fn run_import(service: &ExpenseService, input: Option<&str>, dry_run: bool) -> Result<()> {
    use crate::io::Importer;
    use std::fs::File;
    use std::io::{stdin, Read};

    let importer = Importer::new(service);

    // Determine input reader
    let reader: Box<dyn Read> = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdin()),
    };

    let result = importer.import_expenses_csv(reader, dry_run).await?;

    // Display results
    if dry_run {
        println!("Dry run complete");
    } else {
        println!("Import complete");
    }
    println!("  Imported: {}", result.imported);
    println!("  Skipped:  {}", result.skipped);
    println!("  Errors:   {}", result.errors.len());

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in result.errors.iter().take(10) {
            println!(
                "  Line {}: {}",
                error.line,
                error
                    .field
                    .as_ref()
                    .map(|f| format!("{}: ", f))
                    .unwrap_or_default()
                    + &error.error
            );
        }
        if result.errors.len() > 10 {
            println!("  ... and {} more errors", result.errors.len() - 10);
        }
    }

    Ok(())
}

fn print_expense_table(expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("No expenses found.");
        return;
    }

    println!(
        "{:>6} {:<12} {:<14} {:>10} DESCRIPTION",
        "ID", "DATE", "CATEGORY", "AMOUNT"
    );
    println!("{}", "-".repeat(75));

    for expense in expenses {
        println!(
            "{:>6} {:<12} {:<14} {:>10} {}",
            expense.id,
            expense.date.format("%Y-%m-%d"),
            expense.category.as_str(),
            format_amount(expense.amount),
            truncate(&expense.description, 30)
        );
    }
}

fn parse_category(input: &str) -> Result<Category> {
    let category = input
        .parse()
        .map_err(|_| AppError::InvalidCategory(input.to_string()))?;
    Ok(category)
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

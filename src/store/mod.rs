use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::models::*;

pub(crate) const COLUMNS: [&str; 4] = ["date", "amount", "category", "description"];

/// The append-only CSV file holding every transaction.
pub(crate) struct Store {
    path: PathBuf,
}

impl Store {
    /// Open the store at `path`, creating it with a header row if it is
    /// missing or empty.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let store = Self {
            path: path.to_path_buf(),
        };
        store.ensure_exists()?;
        Ok(store)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_exists(&self) -> Result<()> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to inspect store: {}", self.path.display())
                })
            }
        };
        if !needs_header {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let mut wtr = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create store: {}", self.path.display()))?;
        wtr.write_record(COLUMNS)?;
        wtr.flush()?;
        log::info!("created store {}", self.path.display());
        Ok(())
    }

    pub(crate) fn append(&self, txn: &Transaction) -> Result<()> {
        self.ensure_exists()?;
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open store: {}", self.path.display()))?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.write_record([
            txn.formatted_date(),
            txn.amount.to_string(),
            txn.category.as_str().to_string(),
            txn.description.clone(),
        ])
        .context("Failed to write transaction")?;
        wtr.flush()?;
        log::debug!("appended {} {} on {}", txn.category, txn.amount, txn.formatted_date());
        Ok(())
    }

    /// Every transaction in file order.
    pub(crate) fn load(&self) -> Result<Vec<Transaction>> {
        self.ensure_exists()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open store: {}", self.path.display()))?;

        let headers = rdr.headers().context("Failed to read store header")?;
        let found: Vec<&str> = headers.iter().map(str::trim).collect();
        if found != COLUMNS {
            anyhow::bail!(
                "Unexpected header in {}: expected '{}', found '{}'",
                self.path.display(),
                COLUMNS.join(","),
                found.join(",")
            );
        }

        let mut transactions = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            // Row 1 is the header.
            let row_no = i + 2;
            let record =
                result.with_context(|| format!("Row {row_no}: failed to read CSV record"))?;
            let fields: Vec<&str> = record.iter().collect();
            let txn = parse_row(&fields).with_context(|| format!("Row {row_no}"))?;
            transactions.push(txn);
        }
        log::debug!(
            "loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }
}

fn parse_row(fields: &[&str]) -> Result<Transaction> {
    let date_str = field(fields, 0)?;
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .with_context(|| format!("failed to parse date '{date_str}'"))?;

    let amount_str = field(fields, 1)?;
    let amount = Decimal::from_str(amount_str)
        .with_context(|| format!("failed to parse amount '{amount_str}'"))?;
    if amount <= Decimal::ZERO {
        anyhow::bail!("amount must be positive, found '{amount_str}'");
    }

    let category_str = field(fields, 2)?;
    let category = Category::parse(category_str)
        .ok_or_else(|| anyhow::anyhow!("unknown category '{category_str}'"))?;

    // The description is free text; a short row just has none.
    let description = fields.get(3).copied().unwrap_or_default().to_string();

    Ok(Transaction {
        date,
        amount,
        category,
        description,
    })
}

fn field<'a>(fields: &[&'a str], idx: usize) -> Result<&'a str> {
    fields
        .get(idx)
        .copied()
        .map(str::trim)
        .ok_or_else(|| anyhow::anyhow!("missing '{}' column", COLUMNS[idx]))
}

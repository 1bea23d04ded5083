use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::Write;

use crate::models::{Category, Transaction, DATE_FORMAT};
use crate::util::truncate;

const DESCRIPTION_WIDTH: usize = 40;

/// Transactions dated within `start..=end`, in store order.
pub(crate) fn filter_range(
    txns: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Transaction> {
    txns.iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
}

impl Summary {
    /// Fails rather than wrapping when a total exceeds what `Decimal` holds.
    pub(crate) fn from_transactions(txns: &[Transaction]) -> Result<Self> {
        let mut acc = Self::default();
        for t in txns {
            if t.is_income() {
                acc.income = checked_total(acc.income, t)?;
            } else if t.is_expense() {
                acc.expense = checked_total(acc.expense, t)?;
            }
        }
        Ok(acc)
    }

    pub(crate) fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

pub(crate) fn render_transactions(txns: &[Transaction]) -> String {
    let mut out = format!(
        "{:<10}  {:>12}  {:<8}  {}\n",
        "date", "amount", "category", "description"
    );
    for t in txns {
        out.push_str(&format!(
            "{:<10}  {:>12}  {:<8}  {}\n",
            t.formatted_date(),
            format!("{:.2}", t.amount),
            t.category.as_str(),
            truncate(&t.description, DESCRIPTION_WIDTH),
        ));
    }
    out
}

pub(crate) fn render_summary(summary: &Summary) -> String {
    format!(
        "Summary:\nTotal Income: ${:.2}\nTotal Expense: ${:.2}\nNet Savings: ${:.2}\n",
        summary.income,
        summary.expense,
        summary.net()
    )
}

/// Run a range query and print its rows and totals to `out`.
/// Returns the filtered rows so the caller can plot them.
pub(crate) fn view_range<W: Write>(
    out: &mut W,
    txns: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Transaction>> {
    let filtered = filter_range(txns, start, end);
    log::debug!(
        "range {start}..={end}: {} of {} transactions",
        filtered.len(),
        txns.len()
    );

    if filtered.is_empty() {
        writeln!(out, "No transactions found in the given date range")?;
        return Ok(filtered);
    }
    let summary = Summary::from_transactions(&filtered).with_context(|| {
        format!(
            "Cannot total transactions from {} to {}",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        )
    })?;

    writeln!(
        out,
        "Transactions from {} to {}",
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT)
    )?;
    write!(out, "{}", render_transactions(&filtered))?;
    writeln!(out)?;
    write!(out, "{}", render_summary(&summary))?;
    Ok(filtered)
}

// ── Daily resampling ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DailyPoint {
    pub(crate) date: NaiveDate,
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
}

/// Per-day income and expense sums covering every calendar day between the
/// earliest and latest transaction, zero where nothing happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DailySeries {
    pub(crate) points: Vec<DailyPoint>,
}

impl DailySeries {
    pub(crate) fn from_transactions(txns: &[Transaction]) -> Result<Self> {
        let mut by_day: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
        for t in txns {
            let entry = by_day.entry(t.date).or_default();
            match t.category {
                Category::Income => entry.0 = checked_total(entry.0, t)?,
                Category::Expense => entry.1 = checked_total(entry.1, t)?,
            }
        }

        let (Some(&first), Some(&last)) = (by_day.keys().next(), by_day.keys().next_back())
        else {
            return Ok(Self::default());
        };

        let points = first
            .iter_days()
            .take_while(|d| *d <= last)
            .map(|date| {
                let (income, expense) = by_day.get(&date).copied().unwrap_or_default();
                DailyPoint {
                    date,
                    income,
                    expense,
                }
            })
            .collect();
        Ok(Self { points })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    pub(crate) fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub(crate) fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

fn checked_total(total: Decimal, txn: &Transaction) -> Result<Decimal> {
    total.checked_add(txn.amount).ok_or_else(|| {
        anyhow::anyhow!(
            "{} total overflows at {} on {}",
            txn.category,
            txn.amount,
            txn.formatted_date()
        )
    })
}

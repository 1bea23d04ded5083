#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, Transaction};

fn date(d: u32, m: u32, y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn series() -> DailySeries {
    DailySeries::from_transactions(&[
        Transaction::new(date(1, 3, 2024), dec!(200), Category::Income, "a"),
        Transaction::new(date(3, 3, 2024), dec!(40.5), Category::Expense, "b"),
        Transaction::new(date(5, 3, 2024), dec!(10), Category::Expense, "c"),
    ])
    .unwrap()
}

#[test]
fn test_chart_points_one_per_day() {
    let (income, expense) = chart_points(&series());
    assert_eq!(income.len(), 5);
    assert_eq!(expense.len(), 5);
    assert_eq!(income[0], (0.0, 200.0));
    assert_eq!(income[1], (1.0, 0.0));
    assert_eq!(expense[2], (2.0, 40.5));
    assert_eq!(expense[4], (4.0, 10.0));
}

#[test]
fn test_chart_points_empty() {
    let (income, expense) = chart_points(&DailySeries::default());
    assert!(income.is_empty());
    assert!(expense.is_empty());
}

#[test]
fn test_max_amount() {
    assert_eq!(max_amount(&series()), dec!(200));
    assert_eq!(max_amount(&DailySeries::default()), Decimal::ZERO);
}

#[test]
fn test_x_labels_first_middle_last() {
    assert_eq!(
        x_labels(&series()),
        vec!["01-03-2024", "03-03-2024", "05-03-2024"]
    );
}

#[test]
fn test_x_labels_single_day() {
    let single = DailySeries::from_transactions(&[Transaction::new(
        date(9, 9, 2024),
        dec!(1),
        Category::Income,
        "",
    )])
    .unwrap();
    assert_eq!(x_labels(&single), vec!["09-09-2024"]);
}

#[test]
fn test_y_labels() {
    assert_eq!(y_labels(dec!(200)), vec!["$0.00", "$100.00", "$200.00"]);
    assert_eq!(y_labels(dec!(2500.5)), vec!["$0.00", "$1,250.25", "$2,500.50"]);
}

// ── in_terminal_session ───────────────────────────────────────

#[test]
fn test_session_restores_when_enter_fails() {
    let body_ran = std::cell::Cell::new(false);
    let left = std::cell::Cell::new(false);
    let result = in_terminal_session(
        || anyhow::bail!("alternate screen unavailable"),
        || {
            body_ran.set(true);
            Ok(())
        },
        || {
            left.set(true);
            Ok(())
        },
    );
    assert!(result.unwrap_err().to_string().contains("alternate screen"));
    assert!(!body_ran.get());
    assert!(left.get());
}

#[test]
fn test_session_restores_when_body_fails() {
    let left = std::cell::Cell::new(false);
    let result = in_terminal_session(
        || Ok(()),
        || anyhow::bail!("draw failed"),
        || {
            left.set(true);
            Ok(())
        },
    );
    assert!(result.is_err());
    assert!(left.get());
}

#[test]
fn test_session_reports_restore_failure() {
    let result = in_terminal_session(|| Ok(()), || Ok(()), || anyhow::bail!("stuck in raw mode"));
    assert!(result.unwrap_err().to_string().contains("raw mode"));
}

#[test]
fn test_session_keeps_first_error() {
    let result = in_terminal_session(
        || Ok(()),
        || anyhow::bail!("draw failed"),
        || anyhow::bail!("restore failed"),
    );
    assert_eq!(result.unwrap_err().to_string(), "draw failed");
}

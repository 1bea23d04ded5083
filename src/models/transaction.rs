use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Category;

/// Day-month-year, used both on disk and at the prompt.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Always positive; the sign lives in `category`.
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category,
            description: description.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.category == Category::Income
    }

    pub fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }

    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::models::{Category, DATE_FORMAT};

/// Collects field values from a console, re-asking until each answer is valid.
///
/// Generic over the reader and writer so the menu can be driven from byte
/// buffers in tests; production uses locked stdin/stdout.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            today,
        }
    }

    pub(crate) fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `message` and read one line, without the trailing newline.
    /// Closed input is an error: there is nobody left to re-prompt.
    fn ask(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if n == 0 {
            anyhow::bail!("Input closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub(crate) fn date(&mut self, message: &str, allow_default: bool) -> Result<NaiveDate> {
        loop {
            let raw = self.ask(message)?;
            match parse_date(&raw, allow_default.then_some(self.today)) {
                Ok(d) => return Ok(d),
                Err(e) => self.say(&e)?,
            }
        }
    }

    pub(crate) fn amount(&mut self) -> Result<Decimal> {
        loop {
            let raw = self.ask("Enter the amount: ")?;
            match parse_amount(&raw) {
                Ok(a) => return Ok(a),
                Err(e) => self.say(&e)?,
            }
        }
    }

    pub(crate) fn category(&mut self) -> Result<Category> {
        loop {
            let raw = self.ask("Enter the category ('I' for Income or 'E' for Expense): ")?;
            match Category::parse(&raw) {
                Some(c) => return Ok(c),
                None => self.say(
                    "Invalid category. Please enter 'I' for Income or 'E' for Expense.",
                )?,
            }
        }
    }

    pub(crate) fn description(&mut self) -> Result<String> {
        let raw = self.ask("Enter a description (optional): ")?;
        Ok(raw.trim().to_string())
    }

    pub(crate) fn choice(&mut self, message: &str) -> Result<String> {
        Ok(self.ask(message)?.trim().to_string())
    }

    /// Anything but `y`/`Y` counts as no.
    pub(crate) fn confirm(&mut self, message: &str) -> Result<bool> {
        Ok(self.ask(message)?.trim().eq_ignore_ascii_case("y"))
    }
}

/// Parse a `dd-mm-yyyy` date. An empty answer falls back to `default` when
/// one is given.
pub(crate) fn parse_date(s: &str, default: Option<NaiveDate>) -> Result<NaiveDate, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        if let Some(d) = default {
            return Ok(d);
        }
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| "Invalid date format. Please enter the date in dd-mm-yyyy format".to_string())
}

/// Parse a positive amount. Currency symbols and thousands separators are ignored.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal, String> {
    let cleaned = s.trim().replace(['$', ','], "");
    let amount = Decimal::from_str(cleaned.trim())
        .map_err(|_| format!("Invalid amount '{}'. Please enter a number.", s.trim()))?;
    if amount <= Decimal::ZERO {
        return Err("Amount must be a non-negative non-zero value.".to_string());
    }
    Ok(amount)
}

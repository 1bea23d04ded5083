use anyhow::Result;
use std::io::{BufRead, Write};

use crate::input::Prompter;
use crate::models::Transaction;
use crate::report::{self, DailySeries};
use crate::store::Store;

/// Renders a daily series; the terminal chart in production.
pub(crate) type PlotFn<'a> = dyn FnMut(&DailySeries) -> Result<()> + 'a;

/// The numbered menu loop. Returns when the user picks "Exit"; prompt I/O
/// failures end the loop, store and plot failures are reported and the
/// menu is shown again.
pub(crate) fn as_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &Store,
    plot: &mut PlotFn<'_>,
) -> Result<()> {
    loop {
        print_menu(prompter.output())?;
        let choice = prompter.choice("Enter your choice (1-3): ")?;
        match choice.as_str() {
            "1" => add(prompter, store)?,
            "2" => view(prompter, store, plot)?,
            "3" => {
                writeln!(prompter.output(), "Exiting....")?;
                return Ok(());
            }
            _ => writeln!(prompter.output(), "Invalid choice, Enter 1, 2 or 3")?,
        }
    }
}

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "1. Add a new transaction")?;
    writeln!(out, "2. View transactions and summary within a date range")?;
    writeln!(out, "3. Exit")?;
    Ok(())
}

fn add<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, store: &Store) -> Result<()> {
    let date = prompter.date(
        "Enter the date of the transaction (dd-mm-yyyy) or press 'Enter' key to use today's date: ",
        true,
    )?;
    let amount = prompter.amount()?;
    let category = prompter.category()?;
    let description = prompter.description()?;

    let txn = Transaction::new(date, amount, category, description);
    match store.append(&txn) {
        Ok(()) => writeln!(prompter.output(), "Entry added successfully")?,
        Err(e) => report_error(prompter.output(), &e)?,
    }
    Ok(())
}

fn view<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &Store,
    plot: &mut PlotFn<'_>,
) -> Result<()> {
    let start = prompter.date("Enter the start date (dd-mm-yyyy): ", false)?;
    let end = prompter.date("Enter the end date (dd-mm-yyyy): ", false)?;

    let all = match store.load() {
        Ok(all) => all,
        Err(e) => return report_error(prompter.output(), &e),
    };
    let filtered = match report::view_range(prompter.output(), &all, start, end) {
        Ok(filtered) => filtered,
        Err(e) => return report_error(prompter.output(), &e),
    };

    if !prompter.confirm("Do you want to see a plot? (y/n): ")? {
        return Ok(());
    }
    let series = match DailySeries::from_transactions(&filtered) {
        Ok(series) => series,
        Err(e) => return report_error(prompter.output(), &e),
    };
    if series.is_empty() {
        writeln!(prompter.output(), "No transactions to plot")?;
        return Ok(());
    }
    if let Err(e) = plot(&series) {
        report_error(prompter.output(), &e)?;
    }
    Ok(())
}

fn report_error<W: Write>(out: &mut W, err: &anyhow::Error) -> Result<()> {
    log::error!("{err:#}");
    writeln!(out, "Error: {err:#}")?;
    Ok(())
}

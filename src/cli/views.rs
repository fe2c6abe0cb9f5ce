//! Text renderings of ledger data. Nothing here touches the terminal.

use crate::{
    cli::ui::{Formatter, Table, TableColumn},
    currency::{CurrencyFormat, Money},
    ledger::{EntryType, Transaction},
    report::{LedgerTotals, PivotReport},
};

const DAY_FORMAT: &str = "%Y-%m-%d";
const EMPTY_CELL: &str = "-";

/// Table of transactions in the order given.
pub fn transaction_table<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    is_orphaned: impl Fn(&Transaction) -> bool,
    currency: &CurrencyFormat,
    formatter: &Formatter,
) -> String {
    let mut table = Table::new(
        vec![
            TableColumn::right("ID"),
            TableColumn::left("Date"),
            TableColumn::left("Type"),
            TableColumn::left("Category").max_width(32),
            TableColumn::right("Amount"),
        ],
        formatter.is_plain(),
    );

    for txn in transactions {
        let category = if is_orphaned(txn) {
            format!("{} {}", txn.category, formatter.dimmed("(removed)"))
        } else {
            txn.category.clone()
        };
        let amount = currency.format(txn.amount);
        let amount = match txn.entry_type {
            EntryType::Expense => formatter.expense(amount),
            EntryType::Profit => formatter.income(amount),
        };
        table.push_row(vec![
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d %H:%M").to_string(),
            txn.entry_type.to_string(),
            category,
            amount,
        ]);
    }

    table.render()
}

/// One-line income / expense / net summary.
pub fn totals_line(totals: &LedgerTotals, currency: &CurrencyFormat, formatter: &Formatter) -> String {
    format!(
        "Income {}  Expense {}  Net {}",
        formatter.income(currency.format(totals.income)),
        formatter.expense(currency.format(totals.expense)),
        formatter.margin(totals.net, currency.format(totals.net)),
    )
}

/// Day-by-category matrix with a TOTAL footer. Zero cells render as a dash.
pub fn pivot_table(report: &PivotReport, formatter: &Formatter) -> String {
    let mut columns = vec![TableColumn::left("Date")];
    columns.extend(
        report
            .expense_columns
            .iter()
            .map(|name| TableColumn::right(formatter.expense(name)).max_width(20)),
    );
    columns.push(TableColumn::right(formatter.expense("Total Expense")));
    columns.extend(
        report
            .profit_columns
            .iter()
            .map(|name| TableColumn::right(formatter.income(name)).max_width(20)),
    );
    columns.push(TableColumn::right(formatter.income("Total Income")));
    columns.push(TableColumn::right(formatter.bold("Net Margin")));

    let mut table = Table::new(columns, formatter.is_plain());
    for row in &report.rows {
        let mut cells = vec![row.day.format(DAY_FORMAT).to_string()];
        cells.extend(row.expense.iter().map(|amount| cell(*amount)));
        cells.push(cell(row.total_expense));
        cells.extend(row.profit.iter().map(|amount| cell(*amount)));
        cells.push(cell(row.total_income));
        cells.push(formatter.margin(row.net_margin, cell(row.net_margin)));
        table.push_row(cells);
    }

    let totals = &report.totals;
    let mut footer = vec![formatter.bold("TOTAL")];
    footer.extend(totals.expense.iter().map(|amount| formatter.expense(cell(*amount))));
    footer.push(formatter.expense(cell(totals.total_expense)));
    footer.extend(totals.profit.iter().map(|amount| formatter.income(cell(*amount))));
    footer.push(formatter.income(cell(totals.total_income)));
    footer.push(formatter.margin(totals.net_margin, cell(totals.net_margin)));
    table.set_footer(footer);

    table.render()
}

fn cell(amount: Money) -> String {
    if amount.is_zero() {
        EMPTY_CELL.to_string()
    } else {
        amount.to_grouped_string()
    }
}

/// Numbered category list followed by names only history still uses.
pub fn category_listing(
    entry_type: EntryType,
    names: &[String],
    orphaned: &[String],
    formatter: &Formatter,
) -> String {
    let mut lines = vec![formatter.header_text(format!("{entry_type} categories"))];
    if names.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| format!("  {:>2}. {}", idx + 1, name)),
    );
    if !orphaned.is_empty() {
        lines.push(formatter.dimmed("Removed but still used by past entries:"));
        lines.extend(orphaned.iter().map(|name| format!("      {}", name)));
    }
    lines.join("\n")
}

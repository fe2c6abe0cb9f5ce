use chrono::NaiveDate;

use crate::cli::{views, CliContext, CommandResult};
use crate::errors::CliError;

use super::{parse_entry_type, usage, CommandDefinition};

const ADD_USAGE: &str = "add <amount> <expense|profit> <category> [--date YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("add", "Record an expense or profit entry", ADD_USAGE, cmd_add),
        CommandDefinition::new("list", "Show all entries, newest first", "list", cmd_list),
        CommandDefinition::new("delete", "Remove one entry by id", "delete <id> [--yes]", cmd_delete),
        CommandDefinition::new("clear", "Remove every entry", "clear [--yes]", cmd_clear),
        CommandDefinition::new(
            "search",
            "Find entries by category or amount text",
            "search [text] [--date YYYY-MM-DD]",
            cmd_search,
        ),
    ]
}

fn cmd_add(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let [amount, entry_type, category @ ..] = args else {
        return Err(usage(ADD_USAGE));
    };
    if category.is_empty() {
        return Err(usage(ADD_USAGE));
    }
    let entry_type = parse_entry_type(entry_type)?;
    let category = category.join(" ");
    let date = match &context.options.date {
        Some(date) => date.clone(),
        None => context.clock.today().format("%Y-%m-%d").to_string(),
    };

    if !context.manager.categories(entry_type).iter().any(|c| c == category.trim()) {
        context.formatter.print_warning(format!(
            "`{}` is not in the {} category list",
            category.trim(),
            entry_type
        ));
    }

    let result = context
        .manager
        .add_transaction(amount, entry_type, &category, &date);
    let txn = context.report_outcome(result)?;
    context.formatter.print_success(format!(
        "Recorded {} {} under {} (id {})",
        entry_type,
        context.currency.format(txn.amount),
        txn.category,
        txn.id
    ));
    Ok(())
}

fn cmd_list(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let formatter = &context.formatter;
    formatter.print_header(context.manager.business_name());
    let transactions = context.manager.list_transactions();
    if transactions.is_empty() {
        formatter.print_info("No transactions recorded yet.");
        return Ok(());
    }
    let table = views::transaction_table(
        transactions.iter().rev(),
        |txn| context.manager.is_orphaned(txn),
        &context.currency,
        formatter,
    );
    formatter.print_info(table);
    formatter.print_info(views::totals_line(
        &context.manager.totals(),
        &context.currency,
        formatter,
    ));
    Ok(())
}

fn cmd_delete(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage("delete <id> [--yes]"));
    };
    let id: i64 = id
        .parse()
        .map_err(|_| CliError::Input(format!("`{id}` is not a transaction id")))?;

    let Some(txn) = context.manager.transaction_store().get(id) else {
        context
            .formatter
            .print_warning(format!("No transaction with id {id}."));
        return Ok(());
    };
    let prompt = format!(
        "Delete {} {} under {}?",
        txn.entry_type,
        context.currency.format(txn.amount),
        txn.category
    );
    if !context.confirm(&prompt)? {
        context.formatter.print_info("Nothing deleted.");
        return Ok(());
    }

    let result = context.manager.delete_transaction(id);
    context.report_outcome(result)?;
    context
        .formatter
        .print_success(format!("Deleted transaction {id}."));
    Ok(())
}

fn cmd_clear(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let count = context.manager.list_transactions().len();
    if count == 0 {
        context.formatter.print_info("There are no transactions to clear.");
        return Ok(());
    }
    if !context.confirm(&format!("Delete all {count} transactions?"))? {
        context.formatter.print_info("Nothing deleted.");
        return Ok(());
    }
    let result = context.manager.clear_transactions();
    let removed = context.report_outcome(result)?;
    context
        .formatter
        .print_success(format!("Cleared {removed} transactions."));
    Ok(())
}

fn cmd_search(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let day = context
        .options
        .date
        .as_deref()
        .map(parse_day)
        .transpose()?;

    let matches = context.manager.filter(&query, day);
    if matches.is_empty() {
        context.formatter.print_info("No matching transactions.");
        return Ok(());
    }
    let table = views::transaction_table(
        matches.iter().rev().copied(),
        |txn| context.manager.is_orphaned(txn),
        &context.currency,
        &context.formatter,
    );
    context.formatter.print_info(table);
    context
        .formatter
        .print_info(format!("{} matching transactions", matches.len()));
    Ok(())
}

fn parse_day(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("`{value}` is not a YYYY-MM-DD date")))
}

use crate::cli::{views, CliContext, CommandResult};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "report",
        "Show the day-by-category pivot with totals and net margin",
        "report",
        cmd_report,
    )]
}

fn cmd_report(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let report = context.manager.pivot();
    context
        .formatter
        .print_header(format!("{} daily report", context.manager.business_name()));
    if report.is_empty() {
        context.formatter.print_info("No transactions recorded yet.");
        return Ok(());
    }
    context
        .formatter
        .print_info(views::pivot_table(&report, &context.formatter));
    Ok(())
}

use crate::cli::{CliContext, CommandResult};
use crate::utils::build_info;

use super::{all_definitions, CommandDefinition, CommandRegistry};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "name",
            "Show or change the business name",
            "name [new name]",
            cmd_name,
        ),
        CommandDefinition::new("version", "Show build information", "version", cmd_version),
        CommandDefinition::new("help", "List available commands", "help", cmd_help),
    ]
}

fn cmd_name(context: &mut CliContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        context.formatter.print_info(context.manager.business_name());
        return Ok(());
    }
    let result = context.manager.set_business_name(&args.join(" "));
    if context.report_outcome(result)? {
        context.formatter.print_success(format!(
            "Business name set to `{}`.",
            context.manager.business_name()
        ));
    } else {
        context.formatter.print_info("Business name unchanged.");
    }
    Ok(())
}

fn cmd_version(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    context.formatter.print_info(build_info::current());
    Ok(())
}

fn cmd_help(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    print_help(context, &CommandRegistry::new(all_definitions()));
    Ok(())
}

pub(crate) fn print_help(context: &CliContext, registry: &CommandRegistry) {
    let formatter = &context.formatter;
    formatter.print_header("bizledger");
    let entries: Vec<(&str, &str)> = registry
        .iter()
        .map(|definition| (definition.usage, definition.description))
        .collect();
    formatter.print_two_column(&entries);
    formatter.print_info("\nFlags: --plain (no colors), --yes/-y (skip confirmations)");
}

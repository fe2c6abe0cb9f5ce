use crate::cli::{views, CliContext, CommandResult};
use crate::core::RenameOutcome;
use crate::ledger::EntryType;

use super::{parse_entry_type, usage, CommandDefinition};

const CATEGORY_USAGE: &str =
    "category <add|rename|delete> <expense|profit> <name> [new name]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "categories",
            "List categories for one or both entry types",
            "categories [expense|profit]",
            cmd_categories,
        ),
        CommandDefinition::new(
            "category",
            "Add, rename or delete a category",
            CATEGORY_USAGE,
            cmd_category,
        ),
    ]
}

fn cmd_categories(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let types = match args {
        [] => EntryType::ALL.to_vec(),
        [entry_type] => vec![parse_entry_type(entry_type)?],
        _ => return Err(usage("categories [expense|profit]")),
    };
    for entry_type in types {
        let listing = views::category_listing(
            entry_type,
            context.manager.categories(entry_type),
            &context.manager.orphaned_categories(entry_type),
            &context.formatter,
        );
        context.formatter.print_info(listing);
    }
    Ok(())
}

fn cmd_category(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let [action, entry_type, rest @ ..] = args else {
        return Err(usage(CATEGORY_USAGE));
    };
    let entry_type = parse_entry_type(entry_type)?;

    match action.to_lowercase().as_str() {
        "add" if !rest.is_empty() => add_category(context, entry_type, &rest.join(" ")),
        "rename" => match rest {
            [old, new @ ..] if !new.is_empty() => {
                rename_category(context, entry_type, old, &new.join(" "))
            }
            _ => Err(usage(
                "category rename <expense|profit> <old name> <new name> (quote names with spaces)",
            )),
        },
        "delete" if !rest.is_empty() => delete_category(context, entry_type, &rest.join(" ")),
        _ => Err(usage(CATEGORY_USAGE)),
    }
}

fn add_category(context: &mut CliContext, entry_type: EntryType, name: &str) -> CommandResult {
    let result = context.manager.add_category(entry_type, name);
    if context.report_outcome(result)? {
        context
            .formatter
            .print_success(format!("Added {entry_type} category `{}`.", name.trim()));
    } else {
        context.formatter.print_warning(format!(
            "`{}` already exists or is blank; nothing added.",
            name.trim()
        ));
    }
    Ok(())
}

fn rename_category(
    context: &mut CliContext,
    entry_type: EntryType,
    old: &str,
    new: &str,
) -> CommandResult {
    let result = context.manager.rename_category(entry_type, old, new);
    match context.report_outcome(result)? {
        RenameOutcome::Renamed { relabeled } => context.formatter.print_success(format!(
            "Renamed `{old}` to `{}`; {relabeled} past entries updated.",
            new.trim()
        )),
        RenameOutcome::Unchanged => context
            .formatter
            .print_warning(format!("No {entry_type} category was renamed.")),
    }
    Ok(())
}

fn delete_category(context: &mut CliContext, entry_type: EntryType, name: &str) -> CommandResult {
    if !context.manager.categories(entry_type).iter().any(|c| c == name) {
        context
            .formatter
            .print_warning(format!("No {entry_type} category named `{name}`."));
        return Ok(());
    }
    if !context.confirm(&format!(
        "Delete {entry_type} category `{name}`? Past entries keep their label."
    ))? {
        context.formatter.print_info("Nothing deleted.");
        return Ok(());
    }
    let result = context.manager.delete_category(entry_type, name);
    context.report_outcome(result)?;
    context
        .formatter
        .print_success(format!("Deleted {entry_type} category `{name}`."));
    Ok(())
}

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::errors::CliError;

/// Asks a yes/no question before a destructive command.
///
/// `assume_yes` skips the prompt. Without a terminal on stdin there is nobody
/// to answer, so the command is refused instead of silently proceeding.
pub fn confirm_action(prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Input(format!(
            "{prompt} (pass --yes to confirm without a terminal)"
        )));
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|err| CliError::Command(err.to_string()))
}

pub mod commands;
pub mod ui;
pub mod views;

use std::{env, sync::Arc};

use tracing::debug;

use crate::{
    config::ConfigManager,
    core::{Clock, LedgerManager, SystemClock},
    currency::CurrencyFormat,
    errors::CliError,
    storage::JsonStorage,
};

use self::{
    commands::CommandRegistry,
    ui::{prompts, Formatter},
};

pub type CommandResult = Result<(), CliError>;

/// Interactive use only surfaces warnings unless configured otherwise.
const CLI_LOG_FILTER: &str = "bizledger=warn";

/// Flags accepted anywhere on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub plain: bool,
    pub assume_yes: bool,
    pub date: Option<String>,
}

impl GlobalOptions {
    /// Splits `args` into recognised flags and positional words.
    pub fn parse(args: Vec<String>) -> Result<(Self, Vec<String>), CliError> {
        let mut options = Self::default();
        let mut positional = Vec::new();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--plain" => options.plain = true,
                "--yes" | "-y" => options.assume_yes = true,
                "--date" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| CliError::Input("--date needs a YYYY-MM-DD value".into()))?;
                    options.date = Some(value);
                }
                other => match other.strip_prefix("--date=") {
                    Some(value) => options.date = Some(value.to_string()),
                    None => positional.push(other.to_string()),
                },
            }
        }

        Ok((options, positional))
    }
}

/// State shared by every command handler for one invocation.
pub struct CliContext {
    pub manager: LedgerManager,
    pub formatter: Formatter,
    pub currency: CurrencyFormat,
    pub clock: Arc<dyn Clock>,
    pub options: GlobalOptions,
}

impl CliContext {
    pub fn new(
        manager: LedgerManager,
        currency: CurrencyFormat,
        clock: Arc<dyn Clock>,
        options: GlobalOptions,
    ) -> Self {
        Self {
            manager,
            formatter: Formatter::new(options.plain),
            currency,
            clock,
            options,
        }
    }

    pub fn confirm(&self, prompt: &str) -> Result<bool, CliError> {
        prompts::confirm_action(prompt, self.options.assume_yes)
    }

    /// Reports a persistence failure without discarding the in-memory change.
    pub fn report_outcome<T>(&self, result: crate::Result<T>) -> Result<T, CliError> {
        result.map_err(|err| {
            if err.is_persistence() {
                self.formatter
                    .print_warning("the change applies to this session but was not saved");
            }
            CliError::from(err)
        })
    }
}

/// Entry point used by the `bizledger` binary.
pub fn run_cli() -> CommandResult {
    run_with_args(env::args().skip(1).collect())
}

pub fn run_with_args(args: Vec<String>) -> CommandResult {
    let (options, positional) = GlobalOptions::parse(args)?;

    let config_manager = ConfigManager::new()?;
    let config = config_manager.load()?;
    crate::init_with_filter(Some(config.log_filter.as_deref().unwrap_or(CLI_LOG_FILTER)));
    debug!(config = %config_manager.path().display(), "configuration loaded");

    let storage = JsonStorage::new(Some(config_manager.data_dir(&config)))?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let manager = LedgerManager::load(Arc::new(storage), clock.clone())?;

    let mut context = CliContext::new(manager, config.currency_format(), clock, options);
    dispatch(&mut context, &positional)
}

/// Runs the command named by the first positional word.
pub fn dispatch(context: &mut CliContext, positional: &[String]) -> CommandResult {
    let registry = CommandRegistry::new(commands::all_definitions());
    let words: Vec<&str> = positional.iter().map(String::as_str).collect();

    let Some((name, args)) = words.split_first() else {
        commands::system::print_help(context, &registry);
        return Ok(());
    };

    match registry.get(name) {
        Some(definition) => {
            debug!(command = definition.name, "dispatching");
            (definition.handler)(context, args)
        }
        None => Err(CliError::Input(format!(
            "unknown command `{name}`; run `bizledger help`"
        ))),
    }
}

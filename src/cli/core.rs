//! Core CLI loop, dispatch, and shell context helpers.

use std::io::{self, BufRead, BufReader};

use chrono::{NaiveDate, NaiveTime};
use dialoguer::{theme::ColorfulTheme, Input};
use rust_decimal::Decimal;
use strsim::levenshtein;

use crate::{
    config::ConfigManager,
    errors::LedgerError,
    ledger::{Transaction, DATE_FORMAT, TIME_FORMAT},
    storage::TextStorage,
};

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
use super::system_clock::SystemClock;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        if !config_manager.exists() {
            config_manager.save(&config)?;
        }
        cli_io::apply_config(&config, mode);
        tracing::debug!("config file at `{}`", config_manager.path().display());

        let storage = match &config.ledger_file {
            Some(path) => TextStorage::new(path.clone()),
            None => TextStorage::new_default()?,
        };
        tracing::debug!("transaction file at `{}`", storage.path().display());

        let script_input: Option<Box<dyn BufRead>> = match mode {
            CliMode::Script => Some(Box::new(BufReader::new(io::stdin()))),
            CliMode::Interactive => None,
        };

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            storage,
            config,
            clock: Box::new(SystemClock),
            script_input,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "pocketlog> ".to_string()
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.resolve(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit PocketLog?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::Cancelled => {
                cli_io::print_info("Operation cancelled.");
                Ok(())
            }
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_info("Use `help` to list the menu options.");
                Ok(())
            }
            CommandError::Core(LedgerError::DataCorrupted(value)) => {
                self.print_error(&format!(
                    "Data file corrupted: cannot read transaction date `{}`.",
                    value
                ));
                cli_io::print_info(format!(
                    "Fix or remove the bad line in `{}`.",
                    self.storage.path().display()
                ));
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    /// Loads the transaction set, surfacing per-line skip warnings to the
    /// user before handing back the records in file order.
    pub(crate) fn load_transactions(&self) -> Result<Vec<Transaction>, CommandError> {
        let outcome = self.storage.load()?;
        for warning in &outcome.warnings {
            cli_io::print_warning(warning);
        }
        Ok(outcome.transactions)
    }

    /// Reads one line of user input. `None` means the script source ran
    /// dry; interactive Ctrl-C surfaces as [`CommandError::Cancelled`].
    pub(crate) fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CommandError> {
        match self.mode {
            CliMode::Interactive => {
                let result = Input::<String>::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .interact_text();
                match result {
                    Ok(line) => Ok(Some(line)),
                    Err(dialoguer::Error::IO(err))
                        if err.kind() == io::ErrorKind::Interrupted =>
                    {
                        Err(CommandError::Cancelled)
                    }
                    Err(err) => Err(err.into()),
                }
            }
            CliMode::Script => self.next_script_line(),
        }
    }

    pub(crate) fn next_script_line(&mut self) -> Result<Option<String>, CommandError> {
        let Some(source) = self.script_input.as_mut() else {
            return Ok(None);
        };
        let mut buffer = String::new();
        if source.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        while buffer.ends_with('\n') || buffer.ends_with('\r') {
            buffer.pop();
        }
        Ok(Some(buffer))
    }

    fn require_line(&mut self, prompt: &str) -> Result<String, CommandError> {
        self.read_line(prompt)?.ok_or(CommandError::Cancelled)
    }

    /// Invalid entry re-prompts interactively and aborts the command in
    /// script mode, where there is nobody to ask again.
    fn invalid_input(&self, message: String) -> Option<CommandError> {
        if self.mode == CliMode::Interactive {
            cli_io::print_warning(message);
            None
        } else {
            Some(CommandError::InvalidArguments(message))
        }
    }

    pub(crate) fn prompt_date_or_today(&mut self) -> Result<String, CommandError> {
        loop {
            let input = self.require_line("Date (YYYY-MM-DD, blank = today)")?;
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Ok(self.clock.today().format(DATE_FORMAT).to_string());
            }
            match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
                Ok(date) => return Ok(date.format(DATE_FORMAT).to_string()),
                Err(_) => {
                    if let Some(err) =
                        self.invalid_input(format!("Invalid date `{}` (use YYYY-MM-DD).", trimmed))
                    {
                        return Err(err);
                    }
                }
            }
        }
    }

    pub(crate) fn prompt_time_or_now(&mut self) -> Result<String, CommandError> {
        loop {
            let input = self.require_line("Time (HH:MM, blank = now)")?;
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Ok(self.clock.now().format(TIME_FORMAT).to_string());
            }
            match NaiveTime::parse_from_str(trimmed, TIME_FORMAT) {
                Ok(time) => return Ok(time.format(TIME_FORMAT).to_string()),
                Err(_) => {
                    if let Some(err) =
                        self.invalid_input(format!("Invalid time `{}` (use HH:MM).", trimmed))
                    {
                        return Err(err);
                    }
                }
            }
        }
    }

    /// Free text destined for the record file, which reserves `|` as the
    /// field separator.
    pub(crate) fn prompt_text_field(&mut self, label: &str) -> Result<String, CommandError> {
        loop {
            let input = self.require_line(label)?;
            if input.contains('|') {
                if let Some(err) =
                    self.invalid_input(format!("{} must not contain `|`.", label))
                {
                    return Err(err);
                }
                continue;
            }
            return Ok(input);
        }
    }

    pub(crate) fn prompt_amount(&mut self, label: &str) -> Result<Decimal, CommandError> {
        loop {
            let input = self.require_line(label)?;
            let trimmed = input.trim();
            match trimmed.parse::<Decimal>() {
                Ok(amount) => return Ok(amount),
                Err(_) => {
                    if let Some(err) = self.invalid_input(format!(
                        "Invalid amount `{}`. Use a number such as 50.00.",
                        trimmed
                    )) {
                        return Err(err);
                    }
                }
            }
        }
    }

    pub(crate) fn prompt_optional_text(
        &mut self,
        label: &str,
    ) -> Result<Option<String>, CommandError> {
        let input = self.require_line(label)?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    pub(crate) fn prompt_optional_amount(
        &mut self,
        label: &str,
    ) -> Result<Option<Decimal>, CommandError> {
        loop {
            let input = self.require_line(label)?;
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<Decimal>() {
                Ok(amount) => return Ok(Some(amount)),
                Err(_) => {
                    if let Some(err) = self.invalid_input(format!(
                        "Invalid amount `{}`. Use a number such as 50.00.",
                        trimmed
                    )) {
                        return Err(err);
                    }
                }
            }
        }
    }

    pub(crate) fn prompt_optional_date(
        &mut self,
        label: &str,
    ) -> Result<Option<NaiveDate>, CommandError> {
        loop {
            let input = self.require_line(label)?;
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
                Ok(date) => return Ok(Some(date)),
                Err(_) => {
                    if let Some(err) =
                        self.invalid_input(format!("Invalid date `{}` (use YYYY-MM-DD).", trimmed))
                    {
                        return Err(err);
                    }
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("operation cancelled")]
    Cancelled,
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
impl ShellContext {
    pub(crate) fn with_script_input(
        storage: TextStorage,
        clock: Box<dyn crate::time::Clock>,
        input: &str,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        ShellContext {
            mode: CliMode::Script,
            registry,
            theme: ColorfulTheme::default(),
            storage,
            config: crate::config::Config::default(),
            clock,
            script_input: Some(Box::new(io::Cursor::new(input.to_string()))),
            last_command: None,
            running: true,
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        super::shell::handle_line(self, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn context_with(input: &str) -> (ShellContext, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = TextStorage::new(temp.path().join("transactions.csv"));
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let context = ShellContext::with_script_input(storage, Box::new(clock), input);
        (context, temp)
    }

    #[test]
    fn deposit_flow_appends_one_record() {
        let (mut context, _guard) =
            context_with("2024-01-15\n10:30\nweekly salary\nAcme Corp\n1500.00\n");
        context.process_line("deposit").expect("deposit flow");

        let outcome = context.storage.load().expect("load");
        assert_eq!(outcome.transactions.len(), 1);
        let txn = &outcome.transactions[0];
        assert_eq!(txn.date(), "2024-01-15");
        assert_eq!(txn.time(), "10:30");
        assert_eq!(txn.description(), "weekly salary");
        assert_eq!(txn.vendor(), "Acme Corp");
        assert_eq!(txn.amount(), dec!(1500.00));
    }

    #[test]
    fn payment_flow_negates_a_positive_amount() {
        let (mut context, _guard) = context_with("2024-01-16\n12:00\nlunch\nCafe\n25.00\n");
        context.process_line("payment").expect("payment flow");

        let outcome = context.storage.load().expect("load");
        assert_eq!(outcome.transactions[0].amount(), dec!(-25.00));
        assert!(outcome.transactions[0].is_payment());
    }

    #[test]
    fn payment_flow_keeps_an_already_negative_amount() {
        let (mut context, _guard) = context_with("2024-01-16\n12:00\nrefund fix\nCafe\n-9.50\n");
        context.process_line("payment").expect("payment flow");

        let outcome = context.storage.load().expect("load");
        assert_eq!(outcome.transactions[0].amount(), dec!(-9.50));
    }

    #[test]
    fn blank_date_falls_back_to_the_clock() {
        let (mut context, _guard) = context_with("\n10:30\ntop-up\nBank\n40\n");
        context.process_line("deposit").expect("deposit flow");

        let outcome = context.storage.load().expect("load");
        assert_eq!(outcome.transactions[0].date(), "2024-03-15");
    }

    #[test]
    fn blank_time_fills_in_a_clock_time() {
        let (mut context, _guard) = context_with("2024-01-15\n\ntop-up\nBank\n40\n");
        context.process_line("deposit").expect("deposit flow");

        let outcome = context.storage.load().expect("load");
        let time = outcome.transactions[0].time();
        assert_eq!(time.len(), 5);
        assert_eq!(time.as_bytes()[2], b':');
    }

    #[test]
    fn pipe_in_a_text_field_aborts_a_scripted_record() {
        let (mut context, _guard) = context_with("2024-01-15\n10:30\nlunch|dinner\nCafe\n10\n");
        let err = context.process_line("deposit").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert!(context.storage.load().expect("load").transactions.is_empty());
    }

    #[test]
    fn bad_scripted_amount_aborts_without_writing() {
        let (mut context, _guard) = context_with("2024-01-15\n10:30\nlunch\nCafe\nfifty\n");
        let err = context.process_line("deposit").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert!(context.storage.load().expect("load").transactions.is_empty());
    }

    #[test]
    fn exhausted_script_input_cancels_the_flow() {
        let (mut context, _guard) = context_with("2024-01-15\n");
        let err = context.process_line("deposit").unwrap_err();
        assert!(matches!(err, CommandError::Cancelled));
        assert!(context.storage.load().expect("load").transactions.is_empty());
    }

    #[test]
    fn ledger_home_choice_returns_to_the_main_loop() {
        let (mut context, _guard) = context_with("h\n");
        let control = context.process_line("ledger").expect("ledger menu");
        assert_eq!(control, LoopControl::Continue);
    }

    #[test]
    fn exit_command_requests_loop_exit() {
        let (mut context, _guard) = context_with("");
        let control = context.process_line("exit").expect("exit");
        assert_eq!(control, LoopControl::Exit);
    }

    #[test]
    fn shortcut_letters_resolve_to_commands() {
        let (context, _guard) = context_with("");
        assert!(context.command("d").is_some());
        assert_eq!(context.command("d").map(|entry| entry.name), Some("deposit"));
        assert_eq!(context.command("x").map(|entry| entry.name), Some("exit"));
        assert!(context.command("z").is_none());
    }
}

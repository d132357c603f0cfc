use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::core::{CliMode, CommandError};
use crate::cli::output::{self, OutputPreferences};
use crate::config::Config;

/// Apply persisted output settings. Script runs force plain text so
/// captured output stays stable.
pub fn apply_config(config: &Config, mode: CliMode) {
    output::set_preferences(OutputPreferences {
        plain_output: config.plain_output || mode == CliMode::Script,
    });
}

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Print a raw content line, such as a table row.
pub fn print_detail(message: impl fmt::Display) {
    output::detail(message);
}

/// Print a section heading.
pub fn print_section(title: impl fmt::Display) {
    output::section(title);
}

/// Print a horizontal separator line.
pub fn print_separator() {
    output::separator();
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

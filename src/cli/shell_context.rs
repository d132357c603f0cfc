use std::io::BufRead;

use dialoguer::theme::ColorfulTheme;

use crate::{config::Config, storage::TextStorage, time::Clock};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Shared state threaded through every command handler.
///
/// In script mode the context also owns the line source, so menu choices
/// and prompt answers are consumed from the same stream in order.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub storage: TextStorage,
    pub config: Config,
    pub clock: Box<dyn Clock>,
    pub(crate) script_input: Option<Box<dyn BufRead>>,
    pub last_command: Option<String>,
    pub running: bool,
}

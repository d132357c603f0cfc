use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.list() {
        let shortcut = if entry.shortcut.is_empty() {
            String::new()
        } else {
            format!("({})", entry.shortcut)
        };
        io::print_info(format!(
            "  {:<10} {:<4} {}",
            entry.name, shortcut, entry.description
        ));
    }
    io::print_info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    if !entry.shortcut.is_empty() {
        io::print_info(format!("  Shortcut: {}", entry.shortcut));
    }
}

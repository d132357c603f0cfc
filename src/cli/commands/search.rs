//! Multi-criteria custom search over the transaction set.

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::ledger::{search_transactions, SearchCriteria};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "search",
        "s",
        "Custom search across dates, text and amounts",
        "search",
        cmd_search,
    )]
}

fn cmd_search(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    io::print_section("Custom search");
    io::print_info("Leave any field blank to skip it.");

    let criteria = SearchCriteria {
        start_date: context.prompt_optional_date("Start date (YYYY-MM-DD)")?,
        end_date: context.prompt_optional_date("End date (YYYY-MM-DD)")?,
        description: context.prompt_optional_text("Description contains")?,
        vendor: context.prompt_optional_text("Vendor contains")?,
        min_amount: context.prompt_optional_amount("Minimum amount")?,
        max_amount: context.prompt_optional_amount("Maximum amount")?,
    };

    let transactions = context.load_transactions()?;
    let rows = search_transactions(&transactions, &criteria)?;
    super::ledger::print_transaction_table(&rows);
    Ok(())
}

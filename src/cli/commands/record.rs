//! Deposit and payment entry flows.

use rust_decimal::Decimal;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::ledger::Transaction;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("deposit", "d", "Add a deposit", "deposit", cmd_deposit),
        CommandEntry::new(
            "payment",
            "p",
            "Make a payment (debit)",
            "payment",
            cmd_payment,
        ),
    ]
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Deposit,
    Payment,
}

fn cmd_deposit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    record_transaction(context, RecordKind::Deposit)
}

fn cmd_payment(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    record_transaction(context, RecordKind::Payment)
}

fn record_transaction(context: &mut ShellContext, kind: RecordKind) -> CommandResult {
    match kind {
        RecordKind::Deposit => io::print_section("Add deposit"),
        RecordKind::Payment => io::print_section("Make payment"),
    }

    let date = context.prompt_date_or_today()?;
    let time = context.prompt_time_or_now()?;
    let description = context.prompt_text_field("Description")?;
    let vendor = context.prompt_text_field("Vendor")?;
    let mut amount = context.prompt_amount("Amount")?;

    // Payments are stored negative; an amount entered with its own minus
    // sign passes through unchanged.
    if kind == RecordKind::Payment && amount > Decimal::ZERO {
        amount = -amount;
    }

    let transaction = Transaction::new(date, time, description, vendor, amount);
    context.storage.append(&transaction)?;
    io::print_success(format!("Recorded: {}", transaction));
    Ok(())
}

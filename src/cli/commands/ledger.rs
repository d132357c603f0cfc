//! Ledger submenu and the fixed report views.

use chrono::Datelike;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::ledger::{filter_transactions, LedgerView, Transaction};

const TABLE_HEADER: &str = "DATE|TIME|DESCRIPTION|VENDOR|AMOUNT";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "ledger",
        "l",
        "Show ledger views (all, deposits, payments, vendor, month to date)",
        "ledger [all|deposits|payments|vendor <name>|mtd]",
        cmd_ledger,
    )]
}

fn cmd_ledger(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some((subcommand, rest)) = args.split_first() {
        return dispatch_view(context, subcommand, rest);
    }
    run_ledger_menu(context)
}

fn dispatch_view(context: &mut ShellContext, subcommand: &str, args: &[&str]) -> CommandResult {
    match subcommand.to_ascii_lowercase().as_str() {
        "all" | "a" => run_view(context, LedgerView::All),
        "deposits" | "d" => run_view(context, LedgerView::Deposits),
        "payments" | "p" => run_view(context, LedgerView::Payments),
        "vendor" | "v" => {
            let vendor = if args.is_empty() {
                context.prompt_text_field("Vendor")?
            } else {
                args.join(" ")
            };
            run_view(context, LedgerView::Vendor(vendor))
        }
        "mtd" | "month" | "m" => run_view(context, LedgerView::MonthToDate),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown ledger view `{}`; usage: ledger [all|deposits|payments|vendor <name>|mtd]",
            other
        ))),
    }
}

fn run_ledger_menu(context: &mut ShellContext) -> CommandResult {
    loop {
        print_menu();
        let Some(choice) = context.read_line("Ledger option")? else {
            return Ok(());
        };
        match choice.trim().to_ascii_lowercase().as_str() {
            "" => {}
            "a" | "all" => run_view(context, LedgerView::All)?,
            "d" | "deposits" => run_view(context, LedgerView::Deposits)?,
            "p" | "payments" => run_view(context, LedgerView::Payments)?,
            "v" | "vendor" => {
                let vendor = context.prompt_text_field("Vendor")?;
                run_view(context, LedgerView::Vendor(vendor))?;
            }
            "m" | "mtd" | "month" => run_view(context, LedgerView::MonthToDate)?,
            "h" | "home" => return Ok(()),
            other => context.print_warning(&format!(
                "Unknown option `{}`. Choose A, D, P, V, M or H.",
                other
            )),
        }
    }
}

fn print_menu() {
    io::print_section("Ledger");
    io::print_info("  A) All transactions");
    io::print_info("  D) Deposits only");
    io::print_info("  P) Payments only");
    io::print_info("  V) By vendor");
    io::print_info("  M) Month to date");
    io::print_info("  H) Home");
}

fn run_view(context: &mut ShellContext, view: LedgerView) -> CommandResult {
    let transactions = context.load_transactions()?;
    if transactions.is_empty() {
        io::print_info("No transactions recorded yet.");
        return Ok(());
    }

    let today = context.clock.today();
    let rows = filter_transactions(&transactions, &view, today)?;

    match &view {
        LedgerView::All => io::print_section("All transactions"),
        LedgerView::Deposits => io::print_section("Deposits"),
        LedgerView::Payments => io::print_section("Payments"),
        LedgerView::Vendor(name) => io::print_section(format!("Vendor: {}", name)),
        LedgerView::MonthToDate => {
            io::print_section("Month to date");
            let start = today.with_day(1).unwrap_or(today);
            io::print_info(format!("{} through {}", start, today));
        }
    }

    print_transaction_table(&rows);
    Ok(())
}

pub(crate) fn print_transaction_table(rows: &[&Transaction]) {
    io::print_separator();
    io::print_detail(TABLE_HEADER);
    for row in rows {
        io::print_detail(row);
    }
    io::print_separator();
    io::print_info(format!("{} transaction(s) shown.", rows.len()));
}

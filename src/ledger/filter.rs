//! Read-side views over a loaded transaction set.
//!
//! Every view takes the transactions in load order (oldest first, the way
//! the file stores them) and returns matches newest-first. Views never
//! mutate the input; each query is a fresh scan.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::errors::Result;

use super::transaction::Transaction;

/// The ledger submenu's filter kinds, each reducible to a predicate over a
/// single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerView {
    All,
    Deposits,
    Payments,
    /// Case-insensitive vendor equality against the supplied name.
    Vendor(String),
    /// Records dated within the current calendar month, up to today.
    MonthToDate,
}

/// Multi-criteria custom search. Present criteria are ANDed together; a
/// criterion left unset is skipped.
///
/// Amount bounds are the exception: they always apply, defaulting to `0`
/// and [`Decimal::MAX`]. A search that sets no amount bounds therefore
/// still excludes every negative (payment) amount. This is long-standing
/// behavior preserved as-is; it is called out here and in the tests rather
/// than silently changed.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    /// Case-insensitive substring matched against the vendor field.
    pub vendor: Option<String>,
    /// Case-insensitive substring matched against the description field.
    pub description: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SearchCriteria {
    fn vendor_needle(&self) -> Option<String> {
        normalized(self.vendor.as_deref())
    }

    fn description_needle(&self) -> Option<String> {
        normalized(self.description.as_deref())
    }

    fn amount_bounds(&self) -> (Decimal, Decimal) {
        (
            self.min_amount.unwrap_or(Decimal::ZERO),
            self.max_amount.unwrap_or(Decimal::MAX),
        )
    }

    fn is_date_bounded(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

fn normalized(input: Option<&str>) -> Option<String> {
    let trimmed = input?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Applies one ledger view, newest-first.
///
/// `today` is resolved by the caller at invocation time and only consulted
/// by [`LedgerView::MonthToDate`]. A month-to-date scan interprets every
/// record's stored date; the first unreadable one aborts the whole view
/// with [`crate::errors::LedgerError::DataCorrupted`] instead of skipping
/// that record.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    view: &LedgerView,
    today: NaiveDate,
) -> Result<Vec<&'a Transaction>> {
    let vendor_needle = match view {
        LedgerView::Vendor(name) => Some(name.to_lowercase()),
        _ => None,
    };
    let month_start = today.with_day(1).unwrap_or(today);

    let mut matches = Vec::new();
    for txn in transactions.iter().rev() {
        let keep = match view {
            LedgerView::All => true,
            LedgerView::Deposits => txn.is_deposit(),
            LedgerView::Payments => txn.is_payment(),
            LedgerView::Vendor(_) => {
                let needle = vendor_needle.as_deref().unwrap_or_default();
                txn.vendor().to_lowercase() == needle
            }
            LedgerView::MonthToDate => {
                let date = txn.parsed_date()?;
                month_start <= date && date <= today
            }
        };
        if keep {
            matches.push(txn);
        }
    }
    Ok(matches)
}

/// Runs the custom multi-criteria search, newest-first.
///
/// When either date bound is set, every record's stored date is
/// interpreted; the first unreadable one aborts the whole search with
/// [`crate::errors::LedgerError::DataCorrupted`]. With no date bounds the
/// stored dates are never touched, so the same corrupt record that breaks
/// a dated search passes an undated one.
pub fn search_transactions<'a>(
    transactions: &'a [Transaction],
    criteria: &SearchCriteria,
) -> Result<Vec<&'a Transaction>> {
    let vendor_needle = criteria.vendor_needle();
    let description_needle = criteria.description_needle();
    let (min_amount, max_amount) = criteria.amount_bounds();
    let date_bounded = criteria.is_date_bounded();

    let mut matches = Vec::new();
    for txn in transactions.iter().rev() {
        if date_bounded {
            let date = txn.parsed_date()?;
            if criteria.start_date.is_some_and(|start| date < start) {
                continue;
            }
            if criteria.end_date.is_some_and(|end| date > end) {
                continue;
            }
        }

        if txn.amount() < min_amount || txn.amount() > max_amount {
            continue;
        }
        if let Some(needle) = vendor_needle.as_deref() {
            if !txn.vendor().to_lowercase().contains(needle) {
                continue;
            }
        }
        if let Some(needle) = description_needle.as_deref() {
            if !txn.description().to_lowercase().contains(needle) {
                continue;
            }
        }

        matches.push(txn);
    }
    Ok(matches)
}

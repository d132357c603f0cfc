//! Ledger domain models, the record codec, and read-side views.

pub mod filter;
pub mod transaction;

pub use filter::{filter_transactions, search_transactions, LedgerView, SearchCriteria};
pub use transaction::{RecordParseError, Transaction, DATE_FORMAT, TIME_FORMAT};

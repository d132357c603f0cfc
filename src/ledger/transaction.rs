use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::errors::LedgerError;

/// Number of pipe-separated fields in a well-formed record line.
const FIELD_COUNT: usize = 5;

/// Date layout used on disk and everywhere a date is interpreted.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time layout used on disk. Times are display-only text to the core; the
/// prompt layer uses this to validate entry and to fill in "now".
pub const TIME_FORMAT: &str = "%H:%M";

/// A single financial record: one deposit or payment, immutable once
/// constructed.
///
/// `date` and `time` are stored as plain text and are not validated on
/// construction; a record with an unreadable date loads fine and only fails
/// once a date-based view tries to interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: String,
    time: String,
    description: String,
    vendor: String,
    amount: Decimal,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            description: description.into(),
            vendor: vendor.into(),
            amount,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// A deposit is any record with a positive amount.
    pub fn is_deposit(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// A payment is any record with a negative amount. A zero amount is
    /// neither a deposit nor a payment.
    pub fn is_payment(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Interprets the stored date text as a calendar date.
    ///
    /// Failure is reported as [`LedgerError::DataCorrupted`]: date-based
    /// views treat an unreadable date as fatal rather than skipping the
    /// record the way load skips malformed lines.
    pub fn parsed_date(&self) -> Result<NaiveDate, LedgerError> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|_| LedgerError::DataCorrupted(self.date.clone()))
    }
}

/// Canonical line form: `date|time|description|vendor|amount`.
///
/// Fields must not contain the pipe separator; the codec does not enforce
/// this, callers building records from free text are expected to.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.date, self.time, self.description, self.vendor, self.amount
        )
    }
}

/// Reason a persisted line could not be decoded into a [`Transaction`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordParseError {
    #[error("expected {FIELD_COUNT} fields, found {0}")]
    FieldCount(usize),
    #[error("amount `{0}` is not a number")]
    Amount(String),
}

impl FromStr for Transaction {
    type Err = RecordParseError;

    /// Decodes one pipe-delimited line. Text fields are taken verbatim; only
    /// the amount is interpreted. Anything other than exactly five fields,
    /// or a non-numeric amount, marks the record malformed.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() != FIELD_COUNT {
            return Err(RecordParseError::FieldCount(parts.len()));
        }

        let amount = parts[4]
            .trim()
            .parse::<Decimal>()
            .map_err(|_| RecordParseError::Amount(parts[4].to_string()))?;

        Ok(Self::new(parts[0], parts[1], parts[2], parts[3], amount))
    }
}

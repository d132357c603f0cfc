use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    errors::Result,
    ledger::Transaction,
    utils::{ensure_dir, ledger_file},
};

/// What a read of the transaction file produced: the decoded records in
/// file order (oldest first) plus one warning per line that was dropped.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<String>,
}

/// Append-only pipe-delimited text file backend.
///
/// One record per line, `date|time|description|vendor|amount`, no header
/// line. Existing content is never rewritten or reordered; the only write
/// this backend performs is appending whole lines at the end.
#[derive(Debug, Clone)]
pub struct TextStorage {
    path: PathBuf,
}

impl TextStorage {
    /// Storage over an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default location inside the app data directory,
    /// creating the directory when missing.
    pub fn new_default() -> Result<Self> {
        let path = ledger_file();
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record, oldest first.
    ///
    /// Blank and whitespace-only lines are skipped silently. A line that
    /// fails to decode is skipped with a warning in the outcome; it never
    /// fails the load. A missing file yields an empty outcome, not an
    /// error. No side effects on the file.
    pub fn load(&self) -> Result<LoadOutcome> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "transaction file `{}` absent, starting empty",
                    self.path.display()
                );
                return Ok(LoadOutcome::default());
            }
            Err(err) => return Err(err.into()),
        };

        let mut outcome = LoadOutcome::default();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Transaction>() {
                Ok(txn) => outcome.transactions.push(txn),
                Err(err) => {
                    warn!(
                        "skipping malformed record at `{}` line {}: {}",
                        self.path.display(),
                        index + 1,
                        err
                    );
                    outcome
                        .warnings
                        .push(format!("skipped line {}: {}", index + 1, err));
                }
            }
        }
        Ok(outcome)
    }

    /// Appends one record as a new line at the end of the file, creating
    /// the file on first write. Prior content is never read or touched.
    ///
    /// The whole line goes down in a single `write_all` so a failed append
    /// cannot leave a truncated record for the next load to trip over.
    pub fn append(&self, transaction: &Transaction) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = format!("{}\n", transaction);
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

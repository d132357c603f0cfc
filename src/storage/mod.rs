//! Persistence for the transaction ledger.
//!
//! A single backend: an append-only pipe-delimited text file. Loads
//! tolerate malformed lines (skip with warning); appends write whole
//! lines only.

pub mod text_backend;

pub use text_backend::{LoadOutcome, TextStorage};

#![doc(test(attr(deny(warnings))))]

//! PocketLog keeps a personal transaction ledger in a plain text file and
//! offers menu driven entry, fixed reports, and custom search over it.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("PocketLog tracing initialized.");
    });
}

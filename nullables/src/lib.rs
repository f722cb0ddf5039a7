//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (clock, storage, ballot/transfer/account
//! services) are abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (advance time, reject a call, fail a commit)
//! - Record every external call for assertions
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod ledger;
pub mod store;

pub use clock::NullClock;
pub use ledger::{LedgerCall, NullLedger};
pub use store::NullStore;

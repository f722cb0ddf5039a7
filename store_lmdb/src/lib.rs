//! LMDB storage backend for the OIG election orchestrator.
//!
//! Implements the storage traits from `oig-store` using the `heed` LMDB
//! bindings. Each record kind maps to one named database within a single
//! environment; a [`oig_store::WriteBatch`] commits in one write transaction.

pub mod election;
pub mod environment;
pub mod error;
pub mod meta;
pub mod migration;
pub mod write_batch;

pub use election::LmdbElectionStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use migration::{Migrator, CURRENT_SCHEMA_VERSION};

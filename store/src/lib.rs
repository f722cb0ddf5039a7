//! Abstract storage traits for the OIG election orchestrator.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.
//!
//! Reads go through one trait per record kind. Writes are never applied
//! piecemeal: an operation collects its changes in a [`WriteBatch`] and hands
//! it to [`WriteStore::commit`], which applies the whole batch atomically.

pub mod batch;
pub mod election;
pub mod error;
pub mod meta;
pub mod nomination;
pub mod profile;
pub mod voter;

pub use batch::{WriteBatch, WriteOp};
pub use election::{ElectionRecord, ElectionStore, Schedule};
pub use error::StoreError;
pub use meta::MetaStore;
pub use nomination::{NominationRecord, NominationStore};
pub use profile::{NomineeProfile, ProfileStore};
pub use voter::{VoterFlagStore, VoterRegistrationFlag};

/// Applies a [`WriteBatch`] as a single atomic unit.
pub trait WriteStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}

/// Everything the election engine needs from a backend.
pub trait ElectionStateStore:
    ElectionStore + NominationStore + ProfileStore + VoterFlagStore + WriteStore + Send + Sync
{
}

impl<T> ElectionStateStore for T where
    T: ElectionStore + NominationStore + ProfileStore + VoterFlagStore + WriteStore + Send + Sync
{
}

//! Write batching: groups every change made by one operation so the backend
//! can apply them in a single transaction.
//!
//! ```ignore
//! let mut batch = WriteBatch::new();
//! batch.put_nomination(NominationRecord { nominee, accepted: true });
//! batch.put_election(record);
//! store.commit(batch)?;
//! ```
//!
//! Operations are applied in insertion order, so a `ClearNominations`
//! followed by a `PutNomination` leaves exactly that one nomination.

use oig_types::AccountName;

use crate::{ElectionRecord, NominationRecord, NomineeProfile, VoterRegistrationFlag};

/// A single storage mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    PutElection(ElectionRecord),
    PutNomination(NominationRecord),
    DeleteNomination(AccountName),
    ClearNominations,
    PutProfile(NomineeProfile),
    DeleteProfile(AccountName),
    ClearProfiles,
    PutVoterFlag(VoterRegistrationFlag),
}

/// An ordered set of mutations applied atomically by [`crate::WriteStore::commit`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_election(&mut self, record: ElectionRecord) {
        self.ops.push(WriteOp::PutElection(record));
    }

    pub fn put_nomination(&mut self, nomination: NominationRecord) {
        self.ops.push(WriteOp::PutNomination(nomination));
    }

    pub fn delete_nomination(&mut self, nominee: AccountName) {
        self.ops.push(WriteOp::DeleteNomination(nominee));
    }

    pub fn clear_nominations(&mut self) {
        self.ops.push(WriteOp::ClearNominations);
    }

    pub fn put_profile(&mut self, profile: NomineeProfile) {
        self.ops.push(WriteOp::PutProfile(profile));
    }

    pub fn delete_profile(&mut self, owner: AccountName) {
        self.ops.push(WriteOp::DeleteProfile(owner));
    }

    pub fn clear_profiles(&mut self) {
        self.ops.push(WriteOp::ClearProfiles);
    }

    pub fn put_voter_flag(&mut self, flag: VoterRegistrationFlag) {
        self.ops.push(WriteOp::PutVoterFlag(flag));
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// The last election record written by this batch, if any.
    pub fn election(&self) -> Option<&ElectionRecord> {
        self.ops.iter().rev().find_map(|op| match op {
            WriteOp::PutElection(record) => Some(record),
            _ => None,
        })
    }
}

impl IntoIterator for WriteBatch {
    type Item = WriteOp;
    type IntoIter = std::vec::IntoIter<WriteOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

//! Nullable store: thread-safe in-memory storage for testing.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use oig_store::{
    ElectionRecord, ElectionStore, NominationRecord, NominationStore, NomineeProfile,
    ProfileStore, StoreError, VoterFlagStore, VoterRegistrationFlag, WriteBatch, WriteOp,
    WriteStore,
};
use oig_types::AccountName;

#[derive(Clone, Default)]
struct Tables {
    election: Option<ElectionRecord>,
    nominations: BTreeMap<AccountName, NominationRecord>,
    profiles: BTreeMap<AccountName, NomineeProfile>,
    voter_flags: HashMap<AccountName, VoterRegistrationFlag>,
}

impl Tables {
    fn apply(&mut self, op: WriteOp) {
        match op {
            WriteOp::PutElection(record) => self.election = Some(record),
            WriteOp::PutNomination(n) => {
                self.nominations.insert(n.nominee.clone(), n);
            }
            WriteOp::DeleteNomination(nominee) => {
                self.nominations.remove(&nominee);
            }
            WriteOp::ClearNominations => self.nominations.clear(),
            WriteOp::PutProfile(p) => {
                self.profiles.insert(p.owner.clone(), p);
            }
            WriteOp::DeleteProfile(owner) => {
                self.profiles.remove(&owner);
            }
            WriteOp::ClearProfiles => self.profiles.clear(),
            WriteOp::PutVoterFlag(flag) => {
                self.voter_flags.insert(flag.voter.clone(), flag);
            }
        }
    }
}

/// An in-memory election store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
///
/// Each commit is applied to a copy of the tables and swapped in whole, so a
/// failed commit leaves nothing behind.
#[derive(Default)]
pub struct NullStore {
    tables: Mutex<Tables>,
    fail_next_commit: Mutex<bool>,
    commits: Mutex<usize>,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `commit` fail with a backend error.
    pub fn fail_next_commit(&self) {
        *lock(&self.fail_next_commit) = true;
    }

    /// Number of successful commits so far.
    pub fn commit_count(&self) -> usize {
        *lock(&self.commits)
    }

    /// Overwrite the election record directly, bypassing the engine.
    pub fn seed_election(&self, record: ElectionRecord) {
        lock(&self.tables).election = Some(record);
    }

    /// Insert a nomination directly, bypassing the engine.
    pub fn seed_nomination(&self, nomination: NominationRecord) {
        lock(&self.tables)
            .nominations
            .insert(nomination.nominee.clone(), nomination);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ElectionStore for NullStore {
    fn get_election(&self) -> Result<Option<ElectionRecord>, StoreError> {
        Ok(lock(&self.tables).election.clone())
    }
}

impl NominationStore for NullStore {
    fn get_nomination(
        &self,
        nominee: &AccountName,
    ) -> Result<Option<NominationRecord>, StoreError> {
        Ok(lock(&self.tables).nominations.get(nominee).cloned())
    }

    fn iter_nominations(&self) -> Result<Vec<NominationRecord>, StoreError> {
        Ok(lock(&self.tables).nominations.values().cloned().collect())
    }
}

impl ProfileStore for NullStore {
    fn get_profile(&self, owner: &AccountName) -> Result<Option<NomineeProfile>, StoreError> {
        Ok(lock(&self.tables).profiles.get(owner).cloned())
    }

    fn iter_profiles(&self) -> Result<Vec<NomineeProfile>, StoreError> {
        Ok(lock(&self.tables).profiles.values().cloned().collect())
    }
}

impl VoterFlagStore for NullStore {
    fn get_voter_flag(
        &self,
        voter: &AccountName,
    ) -> Result<Option<VoterRegistrationFlag>, StoreError> {
        Ok(lock(&self.tables).voter_flags.get(voter).cloned())
    }
}

impl WriteStore for NullStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        {
            let mut fail = lock(&self.fail_next_commit);
            if *fail {
                *fail = false;
                return Err(StoreError::Backend("injected commit failure".to_string()));
            }
        }
        let mut tables = lock(&self.tables);
        let mut staged = tables.clone();
        for op in batch {
            staged.apply(op);
        }
        *tables = staged;
        *lock(&self.commits) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oig_types::ElectionState;

    fn name(raw: &str) -> AccountName {
        AccountName::parse(raw).unwrap()
    }

    fn nomination(raw: &str, accepted: bool) -> NominationRecord {
        NominationRecord {
            nominee: name(raw),
            accepted,
        }
    }

    #[test]
    fn commit_applies_ops_in_order() {
        let store = NullStore::new();
        let mut batch = WriteBatch::new();
        batch.put_nomination(nomination("alice", false));
        batch.put_nomination(nomination("bob", true));
        batch.clear_nominations();
        batch.put_nomination(nomination("carol", true));
        store.commit(batch).unwrap();

        let all = store.iter_nominations().unwrap();
        assert_eq!(all, vec![nomination("carol", true)]);
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn nominations_iterate_in_name_order() {
        let store = NullStore::new();
        let mut batch = WriteBatch::new();
        for raw in ["zed", "amy", "max"] {
            batch.put_nomination(nomination(raw, true));
        }
        store.commit(batch).unwrap();
        assert_eq!(
            store.accepted_nominees().unwrap(),
            vec![name("amy"), name("max"), name("zed")]
        );
    }

    #[test]
    fn failed_commit_leaves_no_trace() {
        let store = NullStore::new();
        store.fail_next_commit();

        let mut batch = WriteBatch::new();
        batch.put_election(ElectionRecord {
            state: ElectionState::Clean,
            ..Default::default()
        });
        assert!(store.commit(batch.clone()).is_err());
        assert!(store.get_election().unwrap().is_none());

        store.commit(batch).unwrap();
        assert_eq!(
            store.get_election().unwrap().unwrap().state,
            ElectionState::Clean
        );
    }
}

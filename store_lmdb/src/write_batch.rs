//! Applies a [`WriteBatch`] inside a single LMDB write transaction.
//!
//! Either every op in the batch lands or none does: an error aborts the
//! transaction when it is dropped without `commit`.

use heed::RwTxn;
use serde::Serialize;

use oig_store::{StoreError, WriteBatch, WriteOp, WriteStore};

use crate::election::{account_key, LmdbElectionStore, ELECTION_KEY};
use crate::LmdbError;

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LmdbError> {
    Ok(bincode::serialize(value)?)
}

impl LmdbElectionStore {
    fn apply(&self, wtxn: &mut RwTxn, op: &WriteOp) -> Result<(), LmdbError> {
        match op {
            WriteOp::PutElection(record) => {
                self.election_db.put(wtxn, ELECTION_KEY, &encode(record)?)?;
            }
            WriteOp::PutNomination(n) => {
                self.nominations_db
                    .put(wtxn, account_key(&n.nominee), &encode(n)?)?;
            }
            WriteOp::DeleteNomination(nominee) => {
                self.nominations_db.delete(wtxn, account_key(nominee))?;
            }
            WriteOp::ClearNominations => self.nominations_db.clear(wtxn)?,
            WriteOp::PutProfile(p) => {
                self.profiles_db.put(wtxn, account_key(&p.owner), &encode(p)?)?;
            }
            WriteOp::DeleteProfile(owner) => {
                self.profiles_db.delete(wtxn, account_key(owner))?;
            }
            WriteOp::ClearProfiles => self.profiles_db.clear(wtxn)?,
            WriteOp::PutVoterFlag(flag) => {
                self.voter_flags_db
                    .put(wtxn, account_key(&flag.voter), &encode(flag)?)?;
            }
        }
        Ok(())
    }
}

impl WriteStore for LmdbElectionStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let ops = batch.len();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        for op in batch.ops() {
            self.apply(&mut wtxn, op)?;
        }
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::trace!(ops, "write batch committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use oig_store::{
        ElectionRecord, ElectionStore, NominationRecord, NominationStore, NomineeProfile,
        ProfileStore, VoterFlagStore, VoterRegistrationFlag,
    };
    use oig_types::{AccountName, BallotId, ElectionState};

    use super::*;
    use crate::LmdbEnvironment;

    fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).expect("open env");
        (dir, env)
    }

    fn name(raw: &str) -> AccountName {
        AccountName::parse(raw).expect("valid name")
    }

    fn nomination(raw: &str, accepted: bool) -> NominationRecord {
        NominationRecord {
            nominee: name(raw),
            accepted,
        }
    }

    fn profile(raw: &str) -> NomineeProfile {
        NomineeProfile {
            owner: name(raw),
            name: raw.to_uppercase(),
            descriptor: String::new(),
            picture: String::new(),
            telegram: String::new(),
            twitter: String::new(),
            wechat: String::new(),
        }
    }

    #[test]
    fn fresh_store_is_empty() {
        let (_dir, env) = temp_env();
        let store = env.election_store();
        assert!(store.get_election().unwrap().is_none());
        assert!(store.iter_nominations().unwrap().is_empty());
        assert!(store.get_voter_flag(&name("alice")).unwrap().is_none());
    }

    #[test]
    fn batch_persists_every_table() {
        let (_dir, env) = temp_env();
        let store = env.election_store();

        let record = ElectionRecord {
            state: ElectionState::NominationOpen,
            ballot_id: BallotId::new(3),
            pending_voters: vec![name("carol")],
            ..ElectionRecord::default()
        };
        let mut batch = WriteBatch::new();
        batch.put_election(record.clone());
        batch.put_nomination(nomination("bob", false));
        batch.put_nomination(nomination("alice", true));
        batch.put_profile(profile("alice"));
        batch.put_voter_flag(VoterRegistrationFlag {
            voter: name("carol"),
            referrer: name("oig"),
            treasury: "8,VOTE".parse().unwrap(),
        });
        store.commit(batch).unwrap();

        assert_eq!(store.get_election().unwrap(), Some(record));
        let names: Vec<_> = store
            .iter_nominations()
            .unwrap()
            .into_iter()
            .map(|n| n.nominee)
            .collect();
        assert_eq!(names, vec![name("alice"), name("bob")]);
        assert_eq!(store.accepted_nominees().unwrap(), vec![name("alice")]);
        assert_eq!(store.get_profile(&name("alice")).unwrap(), Some(profile("alice")));
        assert!(store.get_voter_flag(&name("carol")).unwrap().is_some());
    }

    #[test]
    fn deletes_and_clears() {
        let (_dir, env) = temp_env();
        let store = env.election_store();

        let mut batch = WriteBatch::new();
        for raw in ["alice", "bob", "carol"] {
            batch.put_nomination(nomination(raw, true));
            batch.put_profile(profile(raw));
        }
        store.commit(batch).unwrap();

        let mut batch = WriteBatch::new();
        batch.delete_nomination(name("bob"));
        batch.delete_profile(name("bob"));
        store.commit(batch).unwrap();
        assert_eq!(store.iter_nominations().unwrap().len(), 2);
        assert!(store.get_profile(&name("bob")).unwrap().is_none());

        let mut batch = WriteBatch::new();
        batch.clear_nominations();
        batch.clear_profiles();
        store.commit(batch).unwrap();
        assert!(store.iter_nominations().unwrap().is_empty());
        assert!(store.iter_profiles().unwrap().is_empty());
    }

    #[test]
    fn clear_then_put_in_one_batch() {
        let (_dir, env) = temp_env();
        let store = env.election_store();

        let mut batch = WriteBatch::new();
        batch.put_nomination(nomination("alice", false));
        store.commit(batch).unwrap();

        let mut batch = WriteBatch::new();
        batch.clear_nominations();
        batch.put_nomination(nomination("bob", true));
        store.commit(batch).unwrap();

        let all = store.iter_nominations().unwrap();
        assert_eq!(all, vec![nomination("bob", true)]);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().expect("temp dir");
        {
            let env = LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).expect("open env");
            let mut batch = WriteBatch::new();
            batch.put_election(ElectionRecord {
                state: ElectionState::Clean,
                ..ElectionRecord::default()
            });
            env.election_store().commit(batch).unwrap();
        }
        let env = LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).expect("reopen env");
        let record = env.election_store().get_election().unwrap().unwrap();
        assert_eq!(record.state, ElectionState::Clean);
    }
}

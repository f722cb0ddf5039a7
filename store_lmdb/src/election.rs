//! LMDB implementation of the election read stores.
//!
//! Layout:
//! - `election`: one entry under [`ELECTION_KEY`].
//! - `nominations`, `profiles`, `voter_flags`: keyed by account name bytes,
//!   so iteration follows account name order.
//!
//! Values are bincode-encoded.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, RoTxn};
use serde::de::DeserializeOwned;

use oig_store::{
    ElectionRecord, ElectionStore, NominationRecord, NominationStore, NomineeProfile,
    ProfileStore, StoreError, VoterFlagStore, VoterRegistrationFlag,
};
use oig_types::AccountName;

use crate::LmdbError;

pub(crate) const ELECTION_KEY: &[u8] = b"election";

/// Every table the election engine reads and writes.
pub struct LmdbElectionStore {
    pub(crate) env: Arc<Env>,
    pub(crate) election_db: Database<Bytes, Bytes>,
    pub(crate) nominations_db: Database<Bytes, Bytes>,
    pub(crate) profiles_db: Database<Bytes, Bytes>,
    pub(crate) voter_flags_db: Database<Bytes, Bytes>,
}

impl LmdbElectionStore {
    fn get<T: DeserializeOwned>(
        &self,
        db: Database<Bytes, Bytes>,
        key: &[u8],
    ) -> Result<Option<T>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        read(&rtxn, db, key)
    }

    fn scan<T: DeserializeOwned>(&self, db: Database<Bytes, Bytes>) -> Result<Vec<T>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            results.push(bincode::deserialize(val).map_err(LmdbError::from)?);
        }
        Ok(results)
    }
}

fn read<T: DeserializeOwned>(
    rtxn: &RoTxn,
    db: Database<Bytes, Bytes>,
    key: &[u8],
) -> Result<Option<T>, StoreError> {
    match db.get(rtxn, key).map_err(LmdbError::from)? {
        Some(bytes) => Ok(Some(bincode::deserialize(bytes).map_err(LmdbError::from)?)),
        None => Ok(None),
    }
}

pub(crate) fn account_key(account: &AccountName) -> &[u8] {
    account.as_str().as_bytes()
}

impl ElectionStore for LmdbElectionStore {
    fn get_election(&self) -> Result<Option<ElectionRecord>, StoreError> {
        self.get(self.election_db, ELECTION_KEY)
    }
}

impl NominationStore for LmdbElectionStore {
    fn get_nomination(
        &self,
        nominee: &AccountName,
    ) -> Result<Option<NominationRecord>, StoreError> {
        self.get(self.nominations_db, account_key(nominee))
    }

    fn iter_nominations(&self) -> Result<Vec<NominationRecord>, StoreError> {
        self.scan(self.nominations_db)
    }
}

impl ProfileStore for LmdbElectionStore {
    fn get_profile(&self, owner: &AccountName) -> Result<Option<NomineeProfile>, StoreError> {
        self.get(self.profiles_db, account_key(owner))
    }

    fn iter_profiles(&self) -> Result<Vec<NomineeProfile>, StoreError> {
        self.scan(self.profiles_db)
    }
}

impl VoterFlagStore for LmdbElectionStore {
    fn get_voter_flag(
        &self,
        voter: &AccountName,
    ) -> Result<Option<VoterRegistrationFlag>, StoreError> {
        self.get(self.voter_flags_db, account_key(voter))
    }
}

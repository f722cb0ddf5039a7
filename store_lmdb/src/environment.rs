//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::election::LmdbElectionStore;
use crate::meta::LmdbMetaStore;
use crate::migration::Migrator;
use crate::LmdbError;

/// Named databases inside the environment.
const MAX_DBS: u32 = 8;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
    pub(crate) election_db: Database<Bytes, Bytes>,
    pub(crate) nominations_db: Database<Bytes, Bytes>,
    pub(crate) profiles_db: Database<Bytes, Bytes>,
    pub(crate) voter_flags_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path and bring its
    /// schema up to date.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        let mut options = EnvOpenOptions::new();
        options.map_size(map_size).max_dbs(MAX_DBS);
        // SAFETY: the environment is opened once per process and per path;
        // nothing else maps the same files.
        let env = unsafe { options.open(path) }?;

        let mut wtxn = env.write_txn()?;
        let meta_db = env.create_database(&mut wtxn, Some("meta"))?;
        let election_db = env.create_database(&mut wtxn, Some("election"))?;
        let nominations_db = env.create_database(&mut wtxn, Some("nominations"))?;
        let profiles_db = env.create_database(&mut wtxn, Some("profiles"))?;
        let voter_flags_db = env.create_database(&mut wtxn, Some("voter_flags"))?;
        wtxn.commit()?;

        let this = Self {
            env: Arc::new(env),
            meta_db,
            election_db,
            nominations_db,
            profiles_db,
            voter_flags_db,
        };
        Migrator::run(&this.meta_store())?;
        tracing::info!(path = %path.display(), map_size, "LMDB environment opened");
        Ok(this)
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn meta_store(&self) -> LmdbMetaStore {
        LmdbMetaStore {
            env: Arc::clone(&self.env),
            meta_db: self.meta_db,
        }
    }

    /// The store the election engine runs against.
    pub fn election_store(&self) -> LmdbElectionStore {
        LmdbElectionStore {
            env: Arc::clone(&self.env),
            election_db: self.election_db,
            nominations_db: self.nominations_db,
            profiles_db: self.profiles_db,
            voter_flags_db: self.voter_flags_db,
        }
    }
}

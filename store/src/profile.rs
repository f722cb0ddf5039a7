//! Nominee profile storage trait.

use oig_types::AccountName;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Public profile of an accepted nominee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomineeProfile {
    pub owner: AccountName,
    /// Display name.
    pub name: String,
    /// Candidate statement.
    pub descriptor: String,
    /// Picture URL; empty or starting with `http`.
    pub picture: String,
    pub telegram: String,
    pub twitter: String,
    pub wechat: String,
}

/// Trait for reading nominee profiles.
pub trait ProfileStore {
    fn get_profile(&self, owner: &AccountName) -> Result<Option<NomineeProfile>, StoreError>;

    /// All profiles, ordered by owner.
    fn iter_profiles(&self) -> Result<Vec<NomineeProfile>, StoreError>;
}

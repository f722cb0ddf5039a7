//! Nomination storage trait.

use oig_types::AccountName;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// A candidacy for the current cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationRecord {
    pub nominee: AccountName,
    /// Whether the nominee has accepted (self-nominations may be auto-accepted).
    pub accepted: bool,
}

/// Trait for reading nominations.
pub trait NominationStore {
    fn get_nomination(&self, nominee: &AccountName)
        -> Result<Option<NominationRecord>, StoreError>;

    /// All nominations, ordered by nominee name.
    fn iter_nominations(&self) -> Result<Vec<NominationRecord>, StoreError>;

    /// Accepted nominees, ordered by name.
    fn accepted_nominees(&self) -> Result<Vec<AccountName>, StoreError> {
        Ok(self
            .iter_nominations()?
            .into_iter()
            .filter(|n| n.accepted)
            .map(|n| n.nominee)
            .collect())
    }
}

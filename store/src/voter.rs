//! Voter registration flag storage trait.

use oig_types::{AccountName, Symbol};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Marks a voter as registered with the stake ledger under the operator's
/// referral. Written once, never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRegistrationFlag {
    pub voter: AccountName,
    pub referrer: AccountName,
    pub treasury: Symbol,
}

pub trait VoterFlagStore {
    fn get_voter_flag(
        &self,
        voter: &AccountName,
    ) -> Result<Option<VoterRegistrationFlag>, StoreError>;
}

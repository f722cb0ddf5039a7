//! The explicit context every election operation runs against.

use oig_client::{AccountDirectory, BallotService, TransferService};
use oig_store::{ElectionRecord, ElectionStateStore, ElectionStore, WriteBatch};
use oig_types::{AccountName, ElectionParams, ElectionState, Timestamp};

use crate::error::ElectionError;

/// Borrowed dependencies plus the single time snapshot of one invocation.
pub struct ElectionContext<'a> {
    pub operator: &'a AccountName,
    pub params: &'a ElectionParams,
    pub store: &'a dyn ElectionStateStore,
    pub ballots: &'a dyn BallotService,
    pub transfers: &'a dyn TransferService,
    pub accounts: &'a dyn AccountDirectory,
    pub now: Timestamp,
}

impl ElectionContext<'_> {
    /// Load the election record of an initialized operator.
    pub fn load(&self) -> Result<ElectionRecord, ElectionError> {
        match self.store.get_election()? {
            Some(record) if record.state != ElectionState::Uninitialized => Ok(record),
            _ => Err(ElectionError::NotInitialized),
        }
    }

    /// Fail unless `caller` is the operator.
    pub fn require_operator(&self, caller: &AccountName) -> Result<(), ElectionError> {
        require_signer(caller, self.operator)
    }

    /// Fail with `UnknownAccount` unless `account` exists on the host ledger.
    pub fn require_account(&self, account: &AccountName) -> Result<(), ElectionError> {
        if self.accounts.account_exists(account)? {
            Ok(())
        } else {
            Err(ElectionError::UnknownAccount(account.clone()))
        }
    }
}

/// Fail unless the action was signed by `required`.
pub fn require_signer(caller: &AccountName, required: &AccountName) -> Result<(), ElectionError> {
    if caller == required {
        Ok(())
    } else {
        Err(ElectionError::Unauthorized {
            required: required.clone(),
            caller: caller.clone(),
        })
    }
}

/// Whether the step function should run once the writes are committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Advance {
    #[default]
    None,
    Requested,
}

/// The result of an operation: writes to commit, then an optional advance.
#[derive(Debug, Default)]
pub struct Transition {
    pub writes: WriteBatch,
    pub advance: Advance,
}

impl Transition {
    pub fn commit(writes: WriteBatch) -> Self {
        Self {
            writes,
            advance: Advance::None,
        }
    }

    pub fn commit_and_advance(writes: WriteBatch) -> Self {
        Self {
            writes,
            advance: Advance::Requested,
        }
    }
}

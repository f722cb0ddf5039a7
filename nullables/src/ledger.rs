//! Nullable ledger: record external service calls without sending them.
//!
//! One [`NullLedger`] stands in for the ballot service, the token contract and
//! the account directory at once, so tests can assert on the exact sequence
//! of external effects an operation produced.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use oig_client::{
    AccountDirectory, BallotDetails, BallotService, ClientError, NewBallot, Transfer,
    TransferService, VoterRegistration,
};
use oig_types::{AccountName, BallotId, Timestamp};

/// An external call as observed by the null ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerCall {
    CreateBallot(NewBallot),
    SetDetails(BallotDetails),
    SetVoteWeighting {
        ballot: BallotId,
        mode: String,
    },
    OpenVoting {
        ballot: BallotId,
        end_time: Timestamp,
    },
    CloseVoting {
        ballot: BallotId,
        broadcast: bool,
    },
    RegisterVoter(VoterRegistration),
    SyncStake(AccountName),
    RebalanceWeight {
        voter: AccountName,
        ballot: BallotId,
        worker: AccountName,
    },
    Transfer(Transfer),
}

impl LedgerCall {
    /// Action name on the remote service.
    pub fn action(&self) -> &'static str {
        match self {
            Self::CreateBallot(_) => "newballot",
            Self::SetDetails(_) => "editdetails",
            Self::SetVoteWeighting { .. } => "togglebal",
            Self::OpenVoting { .. } => "openvoting",
            Self::CloseVoting { .. } => "closevoting",
            Self::RegisterVoter(_) => "regvoter",
            Self::SyncStake(_) => "sync",
            Self::RebalanceWeight { .. } => "rebalance",
            Self::Transfer(_) => "transfer",
        }
    }
}

/// A test ledger that records calls instead of sending them.
#[derive(Default)]
pub struct NullLedger {
    calls: Mutex<Vec<LedgerCall>>,
    accounts: Mutex<HashSet<AccountName>>,
    rejected: Mutex<HashSet<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger on which the given accounts exist.
    pub fn with_accounts<I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = AccountName>,
    {
        let ledger = Self::new();
        lock(&ledger.accounts).extend(accounts);
        ledger
    }

    pub fn add_account(&self, account: AccountName) {
        lock(&self.accounts).insert(account);
    }

    /// Reject every future call to `action` (e.g. `"newballot"`).
    pub fn reject(&self, action: &str) {
        lock(&self.rejected).insert(action.to_string());
    }

    /// Stop rejecting `action`.
    pub fn allow(&self, action: &str) {
        lock(&self.rejected).remove(action);
    }

    /// All calls accepted so far, in order.
    pub fn calls(&self) -> Vec<LedgerCall> {
        lock(&self.calls).clone()
    }

    /// Calls to a single action, in order.
    pub fn calls_to(&self, action: &str) -> Vec<LedgerCall> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.action() == action)
            .cloned()
            .collect()
    }

    pub fn count(&self, action: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.action() == action)
            .count()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn record(&self, call: LedgerCall) -> Result<(), ClientError> {
        if lock(&self.rejected).contains(call.action()) {
            return Err(ClientError::Rejected {
                action: call.action().to_string(),
                reason: "rejected by null ledger".to_string(),
            });
        }
        lock(&self.calls).push(call);
        Ok(())
    }
}

impl BallotService for NullLedger {
    fn create_ballot(&self, ballot: &NewBallot) -> Result<(), ClientError> {
        self.record(LedgerCall::CreateBallot(ballot.clone()))
    }

    fn set_details(&self, details: &BallotDetails) -> Result<(), ClientError> {
        self.record(LedgerCall::SetDetails(details.clone()))
    }

    fn set_vote_weighting(&self, ballot: BallotId, mode: &str) -> Result<(), ClientError> {
        self.record(LedgerCall::SetVoteWeighting {
            ballot,
            mode: mode.to_string(),
        })
    }

    fn open_voting(&self, ballot: BallotId, end_time: Timestamp) -> Result<(), ClientError> {
        self.record(LedgerCall::OpenVoting { ballot, end_time })
    }

    fn close_voting(&self, ballot: BallotId, broadcast: bool) -> Result<(), ClientError> {
        self.record(LedgerCall::CloseVoting { ballot, broadcast })
    }

    fn register_voter(&self, registration: &VoterRegistration) -> Result<(), ClientError> {
        self.record(LedgerCall::RegisterVoter(registration.clone()))
    }

    fn sync_stake(&self, voter: &AccountName) -> Result<(), ClientError> {
        self.record(LedgerCall::SyncStake(voter.clone()))
    }

    fn rebalance_weight(
        &self,
        voter: &AccountName,
        ballot: BallotId,
        worker: &AccountName,
    ) -> Result<(), ClientError> {
        self.record(LedgerCall::RebalanceWeight {
            voter: voter.clone(),
            ballot,
            worker: worker.clone(),
        })
    }
}

impl TransferService for NullLedger {
    fn transfer(&self, transfer: &Transfer) -> Result<(), ClientError> {
        self.record(LedgerCall::Transfer(transfer.clone()))
    }
}

impl AccountDirectory for NullLedger {
    fn account_exists(&self, account: &AccountName) -> Result<bool, ClientError> {
        Ok(lock(&self.accounts).contains(account))
    }
}

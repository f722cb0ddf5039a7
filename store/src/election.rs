//! The election record: the single persisted state that drives everything.

use std::collections::HashSet;

use oig_types::{AccountName, BallotId, ElectionState, Timestamp};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// The four deadlines of an election cycle: two ordered, disjoint windows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Nominations open.
    pub nomination_open: Timestamp,
    /// Nominations close; the ballot is created once this passes.
    pub nomination_close: Timestamp,
    /// Voting can be opened.
    pub voting_open: Timestamp,
    /// Voting closes; stake sync starts once this passes.
    pub voting_close: Timestamp,
}

impl Schedule {
    /// `nomination_open < nomination_close < voting_open < voting_close`.
    pub fn is_ordered(&self) -> bool {
        self.nomination_open < self.nomination_close
            && self.nomination_close < self.voting_open
            && self.voting_open < self.voting_close
    }

    /// The deadline the given state is waiting on, if any.
    pub fn deadline_for(&self, state: ElectionState) -> Option<Timestamp> {
        match state {
            ElectionState::Created => Some(self.nomination_open),
            ElectionState::NominationOpen => Some(self.nomination_close),
            ElectionState::NominationClosed => Some(self.voting_open),
            ElectionState::VotingOpen => Some(self.voting_close),
            _ => None,
        }
    }
}

/// The persisted election state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRecord {
    /// Identifier of the current (or most recent) ballot.
    pub ballot_id: BallotId,
    pub state: ElectionState,
    pub title: String,
    pub description: String,
    /// Link to further details (IPFS or URL).
    pub content: String,
    /// Mirrors the number of nomination records.
    pub nomination_count: u32,
    /// Registered voters still to be synchronized with the stake ledger.
    pub pending_voters: Vec<AccountName>,
    /// Registered voters already synchronized this cycle.
    pub synced_voters: Vec<AccountName>,
    pub schedule: Schedule,
}

impl ElectionRecord {
    /// Whether the two voter lists share no entry.
    pub fn voters_disjoint(&self) -> bool {
        let pending: HashSet<&AccountName> = self.pending_voters.iter().collect();
        self.synced_voters.iter().all(|v| !pending.contains(v))
    }

    /// Total number of tracked voters.
    pub fn voter_count(&self) -> usize {
        self.pending_voters.len() + self.synced_voters.len()
    }

    /// The deadline the current state is waiting on, if any.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.schedule.deadline_for(self.state)
    }
}

/// Trait for reading the election record.
pub trait ElectionStore {
    /// Load the record, or `None` if the operator was never initialized.
    fn get_election(&self) -> Result<Option<ElectionRecord>, StoreError>;
}

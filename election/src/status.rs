//! Read-only summary of the election for operators and tools.

use oig_store::{ElectionRecord, Schedule};
use oig_types::{AccountName, BallotId, ElectionState, Timestamp};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElectionStatus {
    pub operator: AccountName,
    pub state: ElectionState,
    /// Numeric state code: 0 clean through 6 cleanup, 10 uninitialized.
    pub state_code: u8,
    pub ballot_id: BallotId,
    pub title: String,
    pub nomination_count: u32,
    pub accepted_nominees: usize,
    pub pending_voters: usize,
    pub synced_voters: usize,
    pub schedule: Schedule,
    /// Deadline the current state waits on, if any.
    pub next_deadline: Option<Timestamp>,
}

impl ElectionStatus {
    pub fn new(operator: AccountName, record: &ElectionRecord, accepted_nominees: usize) -> Self {
        Self {
            operator,
            state: record.state,
            state_code: record.state.code(),
            ballot_id: record.ballot_id,
            title: record.title.clone(),
            nomination_count: record.nomination_count,
            accepted_nominees,
            pending_voters: record.pending_voters.len(),
            synced_voters: record.synced_voters.len(),
            schedule: record.schedule,
            next_deadline: record.next_deadline(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_record() {
        let record = ElectionRecord {
            state: ElectionState::NominationOpen,
            ballot_id: BallotId::new(3),
            nomination_count: 4,
            pending_voters: vec![AccountName::parse("alice").unwrap()],
            schedule: Schedule {
                nomination_open: Timestamp::new(1),
                nomination_close: Timestamp::new(2),
                voting_open: Timestamp::new(3),
                voting_close: Timestamp::new(4),
            },
            ..ElectionRecord::default()
        };
        let status = ElectionStatus::new(AccountName::parse("oig").unwrap(), &record, 2);
        assert_eq!(status.state_code, 2);
        assert_eq!(status.pending_voters, 1);
        assert_eq!(status.next_deadline, Some(Timestamp::new(2)));

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["operator"], "oig");
        assert_eq!(json["ballot_id"], 3);
    }
}

//! Record-level invariants checked before every commit.

use std::collections::HashSet;

use oig_store::ElectionRecord;
use oig_types::ElectionState;

use crate::error::ElectionError;

/// Check `after` on its own and as the successor of `before`.
pub fn check(before: &ElectionRecord, after: &ElectionRecord) -> Result<(), ElectionError> {
    check_voters(after)?;
    check_schedule(after)?;
    check_transition(before, after)
}

fn violation(msg: String) -> Result<(), ElectionError> {
    Err(ElectionError::InvariantViolation(msg))
}

/// Each voter appears once across both lists.
fn check_voters(record: &ElectionRecord) -> Result<(), ElectionError> {
    let mut seen = HashSet::with_capacity(record.voter_count());
    for voter in record.pending_voters.iter().chain(&record.synced_voters) {
        if !seen.insert(voter) {
            return violation(format!("voter {voter} tracked twice"));
        }
    }
    Ok(())
}

fn check_schedule(record: &ElectionRecord) -> Result<(), ElectionError> {
    use ElectionState::*;
    let scheduled = matches!(
        record.state,
        Created | NominationOpen | NominationClosed | VotingOpen | VotingConcluded
    );
    if scheduled && !record.schedule.is_ordered() {
        return violation(format!("schedule out of order in state {}", record.state));
    }
    Ok(())
}

fn check_transition(before: &ElectionRecord, after: &ElectionRecord) -> Result<(), ElectionError> {
    if before.state != after.state && !before.state.may_transition_to(after.state) {
        return violation(format!(
            "illegal transition {} -> {}",
            before.state, after.state
        ));
    }

    let expected = match (before.state, after.state) {
        (ElectionState::Clean, ElectionState::Created) => before.ballot_id.next(),
        (ElectionState::Created | ElectionState::NominationOpen, ElectionState::Cleanup) => {
            before.ballot_id.prev()
        }
        // Maintenance override between cycles.
        (ElectionState::Clean, ElectionState::Clean) => Some(after.ballot_id),
        _ => Some(before.ballot_id),
    };
    if expected != Some(after.ballot_id) {
        return violation(format!(
            "ballot id moved from {} to {} on {} -> {}",
            before.ballot_id, after.ballot_id, before.state, after.state
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oig_store::Schedule;
    use oig_types::{AccountName, BallotId, Timestamp};

    fn name(raw: &str) -> AccountName {
        AccountName::parse(raw).unwrap()
    }

    fn scheduled(state: ElectionState, ballot: u64) -> ElectionRecord {
        ElectionRecord {
            state,
            ballot_id: BallotId::new(ballot),
            schedule: Schedule {
                nomination_open: Timestamp::new(10),
                nomination_close: Timestamp::new(20),
                voting_open: Timestamp::new(30),
                voting_close: Timestamp::new(40),
            },
            ..ElectionRecord::default()
        }
    }

    #[test]
    fn legal_cycle_passes() {
        use ElectionState::*;
        let path = [
            (Clean, 0),
            (Created, 1),
            (NominationOpen, 1),
            (NominationClosed, 1),
            (VotingOpen, 1),
            (VotingConcluded, 1),
            (Cleanup, 1),
            (Clean, 1),
        ];
        for pair in path.windows(2) {
            let before = scheduled(pair[0].0, pair[0].1);
            let after = scheduled(pair[1].0, pair[1].1);
            check(&before, &after).unwrap();
        }
    }

    #[test]
    fn cancel_rolls_ballot_back() {
        let before = scheduled(ElectionState::NominationOpen, 3);
        check(&before, &scheduled(ElectionState::Cleanup, 2)).unwrap();
        assert!(check(&before, &scheduled(ElectionState::Cleanup, 3)).is_err());
    }

    #[test]
    fn skipping_a_phase_is_rejected() {
        let before = scheduled(ElectionState::NominationOpen, 1);
        let after = scheduled(ElectionState::VotingOpen, 1);
        assert!(matches!(
            check(&before, &after),
            Err(ElectionError::InvariantViolation(_))
        ));
    }

    #[test]
    fn duplicate_voter_is_rejected() {
        let mut after = scheduled(ElectionState::VotingOpen, 1);
        after.pending_voters = vec![name("alice")];
        after.synced_voters = vec![name("bob"), name("alice")];
        let before = scheduled(ElectionState::VotingOpen, 1);
        assert!(check(&before, &after).is_err());
    }

    #[test]
    fn unordered_schedule_is_rejected_while_running() {
        let before = scheduled(ElectionState::Clean, 0);
        let mut after = scheduled(ElectionState::Created, 1);
        after.schedule.voting_close = Timestamp::new(5);
        assert!(check(&before, &after).is_err());
    }
}

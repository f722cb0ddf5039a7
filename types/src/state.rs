//! Phases of the election state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The phase an election record is in.
///
/// Normal progression is
/// `Clean → Created → NominationOpen → NominationClosed → VotingOpen → VotingConcluded → Cleanup → Clean`.
/// Cancellation jumps from `Created` or `NominationOpen` straight to `Cleanup`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectionState {
    /// The operator has not registered with the ballot service yet.
    #[default]
    Uninitialized,
    /// Ready to host a new election.
    Clean,
    /// Election scheduled, nominations not open yet.
    Created,
    /// Accepting nominations.
    NominationOpen,
    /// Ballot exists on the ballot service, voting not open yet.
    NominationClosed,
    /// Voting in progress; stake sync runs once the voting deadline passes.
    VotingOpen,
    /// Ballot closed. Held until the operator ends the election.
    VotingConcluded,
    /// Registries being reset for the next cycle.
    Cleanup,
}

impl ElectionState {
    /// Numeric phase code as published to observers.
    pub fn code(&self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Created => 1,
            Self::NominationOpen => 2,
            Self::NominationClosed => 3,
            Self::VotingOpen => 4,
            Self::VotingConcluded => 5,
            Self::Cleanup => 6,
            Self::Uninitialized => 10,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Clean => "clean",
            Self::Created => "created",
            Self::NominationOpen => "nomination_open",
            Self::NominationClosed => "nomination_closed",
            Self::VotingOpen => "voting_open",
            Self::VotingConcluded => "voting_concluded",
            Self::Cleanup => "cleanup",
        }
    }

    /// Whether nominations may be filed, accepted or declined.
    pub fn accepts_nominations(&self) -> bool {
        matches!(self, Self::Created | Self::NominationOpen)
    }

    /// Whether nominee profiles may still be edited (voting has not started).
    pub fn accepts_profiles(&self) -> bool {
        matches!(
            self,
            Self::Clean | Self::Created | Self::NominationOpen | Self::NominationClosed
        )
    }

    /// Whether the election can still be cancelled (no ballot exists yet).
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Created | Self::NominationOpen)
    }

    /// Whether a cycle is in flight (between creation and the end of cleanup).
    pub fn is_running(&self) -> bool {
        !matches!(self, Self::Uninitialized | Self::Clean)
    }

    /// Whether `next` is a legal successor of this state.
    pub fn may_transition_to(&self, next: ElectionState) -> bool {
        use ElectionState::*;
        matches!(
            (self, next),
            (Uninitialized, Clean)
                | (Clean, Created)
                | (Created, NominationOpen)
                | (NominationOpen, NominationClosed)
                | (NominationClosed, VotingOpen)
                | (VotingOpen, VotingConcluded)
                | (VotingConcluded, Cleanup)
                | (Cleanup, Clean)
                | (Created, Cleanup)
                | (NominationOpen, Cleanup)
        )
    }
}

impl fmt::Display for ElectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_published_numbering() {
        assert_eq!(ElectionState::Clean.code(), 0);
        assert_eq!(ElectionState::VotingConcluded.code(), 5);
        assert_eq!(ElectionState::Uninitialized.code(), 10);
    }

    #[test]
    fn cancellation_only_before_ballot_exists() {
        assert!(ElectionState::Created.can_cancel());
        assert!(ElectionState::NominationOpen.can_cancel());
        assert!(!ElectionState::NominationClosed.can_cancel());
        assert!(!ElectionState::Clean.can_cancel());
    }

    #[test]
    fn transition_graph_is_a_single_cycle_plus_cancel() {
        use ElectionState::*;
        assert!(Clean.may_transition_to(Created));
        assert!(NominationOpen.may_transition_to(Cleanup));
        assert!(!NominationClosed.may_transition_to(Cleanup));
        assert!(!VotingOpen.may_transition_to(Clean));
        assert!(!Clean.may_transition_to(Uninitialized));
    }
}

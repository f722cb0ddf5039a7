//! Operator lifecycle: initialize, create, cancel, end.

use oig_client::VoterRegistration;
use oig_store::{ElectionStore, Schedule, WriteBatch};
use oig_types::{AccountName, BallotId, ElectionState};

use crate::context::{ElectionContext, Transition};
use crate::error::{ElectionError, PhaseConflict};

/// What the operator provides to schedule an election.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElectionDraft {
    pub title: String,
    pub description: String,
    /// Link to further details (IPFS or URL).
    pub content: String,
    pub schedule: Schedule,
}

/// Register the operator itself with the ballot service and mark the record clean.
pub fn initialize(ctx: &ElectionContext, caller: &AccountName) -> Result<Transition, ElectionError> {
    ctx.require_operator(caller)?;
    let mut record = ctx.store.get_election()?.unwrap_or_default();
    if record.state != ElectionState::Uninitialized {
        return Err(ElectionError::AlreadyInitialized);
    }

    ctx.ballots.register_voter(&VoterRegistration {
        voter: ctx.operator.clone(),
        treasury: ctx.params.treasury.clone(),
        referrer: ctx.operator.clone(),
    })?;

    record.state = ElectionState::Clean;
    tracing::info!(operator = %ctx.operator, "operator registered with the ballot service");

    let mut writes = WriteBatch::new();
    writes.put_election(record);
    Ok(Transition::commit(writes))
}

/// Schedule a new election. Assigns the next ballot id.
pub fn create(
    ctx: &ElectionContext,
    caller: &AccountName,
    draft: ElectionDraft,
) -> Result<Transition, ElectionError> {
    ctx.require_operator(caller)?;
    let mut record = ctx.load()?;
    match record.state {
        ElectionState::Clean => {}
        ElectionState::VotingConcluded => {
            return Err(ElectionError::WrongPhase(PhaseConflict::CleanupRequired))
        }
        ElectionState::Cleanup => {
            return Err(ElectionError::WrongPhase(PhaseConflict::CleanupInProgress))
        }
        _ => return Err(ElectionError::WrongPhase(PhaseConflict::AlreadyRunning)),
    }
    validate_draft(ctx, &draft)?;

    let ballot_id = record
        .ballot_id
        .next()
        .ok_or_else(|| ElectionError::InvalidInput("ballot id counter exhausted".to_string()))?;

    record.ballot_id = ballot_id;
    record.state = ElectionState::Created;
    record.title = draft.title;
    record.description = draft.description;
    record.content = draft.content;
    record.schedule = draft.schedule;
    tracing::info!(
        ballot_id = %ballot_id,
        nomination_open = %record.schedule.nomination_open,
        voting_close = %record.schedule.voting_close,
        "election created"
    );

    let mut writes = WriteBatch::new();
    writes.put_election(record);
    Ok(Transition::commit(writes))
}

fn validate_draft(ctx: &ElectionContext, draft: &ElectionDraft) -> Result<(), ElectionError> {
    let invalid = |msg: &str| Err(ElectionError::InvalidInput(msg.to_string()));
    let s = &draft.schedule;

    if draft.title.is_empty() {
        return invalid("title required");
    }
    if draft.description.is_empty() {
        return invalid("description required");
    }
    if ctx.now > s.nomination_open {
        return invalid("dates need to be in the future");
    }
    if s.nomination_open >= s.nomination_close {
        return invalid("nomination duration needs to be positive");
    }
    if s.nomination_close >= s.voting_open {
        return invalid("voting period can't overlap with nomination period");
    }
    if s.voting_open >= s.voting_close {
        return invalid("voting duration needs to be positive");
    }
    Ok(())
}

/// Cancel an election whose ballot does not exist yet. Rolls back the ballot
/// id and hands the record to cleanup.
pub fn cancel(ctx: &ElectionContext, caller: &AccountName) -> Result<Transition, ElectionError> {
    ctx.require_operator(caller)?;
    let mut record = ctx.load()?;
    if record.state == ElectionState::Clean {
        return Err(ElectionError::WrongPhase(PhaseConflict::NoElection));
    }
    if !record.state.can_cancel() {
        return Err(ElectionError::WrongPhase(PhaseConflict::TooLateToCancel));
    }

    let cancelled = record.ballot_id;
    record.ballot_id = cancelled
        .prev()
        .ok_or_else(|| ElectionError::InvariantViolation("ballot id underflow".to_string()))?;
    record.state = ElectionState::Cleanup;
    tracing::info!(ballot_id = %cancelled, "election cancelled");

    let mut writes = WriteBatch::new();
    writes.put_election(record);
    Ok(Transition::commit(writes))
}

/// Move a concluded election into cleanup and start cleaning.
pub fn end_election(ctx: &ElectionContext, caller: &AccountName) -> Result<Transition, ElectionError> {
    ctx.require_operator(caller)?;
    let mut record = ctx.load()?;
    if record.state != ElectionState::VotingConcluded {
        return Err(ElectionError::WrongPhase(PhaseConflict::VotingNotConcluded));
    }
    record.state = ElectionState::Cleanup;
    tracing::info!(ballot_id = %record.ballot_id, "election ended");

    let mut writes = WriteBatch::new();
    writes.put_election(record);
    Ok(Transition::commit_and_advance(writes))
}

/// Maintenance: re-align the ballot counter with the ballot service.
/// Only allowed between cycles.
pub fn override_ballot_id(
    ctx: &ElectionContext,
    caller: &AccountName,
    ballot_id: BallotId,
) -> Result<Transition, ElectionError> {
    ctx.require_operator(caller)?;
    let mut record = ctx.load()?;
    if record.state != ElectionState::Clean {
        return Err(ElectionError::WrongPhase(PhaseConflict::AlreadyRunning));
    }
    tracing::warn!(from = %record.ballot_id, to = %ballot_id, "ballot id overridden");
    record.ballot_id = ballot_id;

    let mut writes = WriteBatch::new();
    writes.put_election(record);
    Ok(Transition::commit(writes))
}

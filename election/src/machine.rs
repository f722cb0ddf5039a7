//! The step function: moves the election along its schedule.
//!
//! `step` reads the record and the current time, decides which transition is
//! due, issues the external calls that transition needs and returns the
//! writes. Every transition flips `state`, so evaluating `step` again with
//! the same time does nothing new.

use oig_client::{BallotDetails, NewBallot, Transfer};
use oig_store::{ElectionRecord, ElectionStore, NominationStore, WriteBatch};
use oig_types::{AccountName, ElectionState};

use crate::cleanup;
use crate::context::ElectionContext;
use crate::error::ElectionError;
use crate::voters;

/// Result of one step evaluation.
#[derive(Debug)]
pub struct StepOutcome {
    pub from: ElectionState,
    pub to: ElectionState,
    /// Empty when nothing was due.
    pub writes: WriteBatch,
}

impl StepOutcome {
    fn idle(state: ElectionState) -> Self {
        Self {
            from: state,
            to: state,
            writes: WriteBatch::new(),
        }
    }

    pub fn transitioned(&self) -> bool {
        self.from != self.to
    }

    pub fn is_idle(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Evaluate the step function once.
pub fn step(ctx: &ElectionContext) -> Result<StepOutcome, ElectionError> {
    let mut record = match ctx.store.get_election()? {
        Some(record) if record.state != ElectionState::Uninitialized => record,
        _ => return Ok(StepOutcome::idle(ElectionState::Uninitialized)),
    };
    let from = record.state;
    let now = ctx.now;
    let mut writes = WriteBatch::new();

    let changed = match from {
        ElectionState::Uninitialized | ElectionState::Clean | ElectionState::VotingConcluded => {
            false
        }
        ElectionState::Created => {
            if record.schedule.nomination_open.has_passed(now) {
                record.state = ElectionState::NominationOpen;
                true
            } else {
                false
            }
        }
        ElectionState::NominationOpen => {
            if record.schedule.nomination_close.has_passed(now) {
                close_nominations(ctx, &mut record)?
            } else {
                false
            }
        }
        ElectionState::NominationClosed => {
            if record.schedule.voting_open.has_passed(now) {
                let ballot = record.ballot_id;
                ctx.ballots
                    .open_voting(ballot, record.schedule.voting_close)
                    .inspect_err(|e| {
                        tracing::error!(ballot_id = %ballot, error = %e, "opening the vote failed")
                    })?;
                record.state = ElectionState::VotingOpen;
                true
            } else {
                false
            }
        }
        ElectionState::VotingOpen => {
            if record.schedule.voting_close.has_passed(now) {
                conclude_voting(ctx, &mut record)?;
                true
            } else {
                false
            }
        }
        ElectionState::Cleanup => {
            let pass = cleanup::run(ctx, &mut record, &mut writes);
            if pass.finished {
                tracing::info!(ballot_id = %record.ballot_id, "cleanup finished");
            }
            true
        }
    };

    let to = record.state;
    if from != to {
        tracing::info!(ballot_id = %record.ballot_id, %from, %to, "election advanced");
    }
    if changed {
        writes.put_election(record);
    }
    Ok(StepOutcome { from, to, writes })
}

/// Pay the fee and set up the ballot with every accepted nominee as an
/// option. Returns `false` while there are too few candidates.
fn close_nominations(
    ctx: &ElectionContext,
    record: &mut ElectionRecord,
) -> Result<bool, ElectionError> {
    let candidates: Vec<AccountName> = ctx.store.accepted_nominees()?;
    if candidates.len() < ctx.params.min_candidates {
        tracing::warn!(
            ballot_id = %record.ballot_id,
            accepted = candidates.len(),
            required = ctx.params.min_candidates,
            "nomination deadline passed without enough accepted nominees; cancel or wait"
        );
        return Ok(false);
    }

    let ballot = record.ballot_id;
    ctx.transfers
        .transfer(&Transfer {
            from: ctx.operator.clone(),
            to: ctx.params.ballot_service_account.clone(),
            quantity: ctx.params.ballot_fee.clone(),
            memo: ctx.params.fee_memo.clone(),
        })
        .inspect_err(|e| {
            tracing::error!(ballot_id = %ballot, error = %e, "ballot fee transfer failed")
        })?;

    let options = candidates.len();
    ctx.ballots
        .create_ballot(&NewBallot {
            ballot,
            category: ctx.params.ballot_category.clone(),
            publisher: ctx.operator.clone(),
            treasury: ctx.params.treasury.clone(),
            method: ctx.params.voting_method.clone(),
            options: candidates,
        })
        .inspect_err(|e| {
            tracing::error!(ballot_id = %ballot, error = %e, "ballot creation failed")
        })?;
    ctx.ballots
        .set_details(&BallotDetails {
            ballot,
            title: record.title.clone(),
            description: record.description.clone(),
            content: record.content.clone(),
        })
        .inspect_err(|e| {
            tracing::error!(ballot_id = %ballot, error = %e, "setting ballot details failed")
        })?;
    ctx.ballots
        .set_vote_weighting(ballot, &ctx.params.weighting_mode)
        .inspect_err(|e| {
            tracing::error!(ballot_id = %ballot, error = %e, "setting vote weighting failed")
        })?;

    tracing::info!(ballot_id = %ballot, options, "ballot created");
    record.state = ElectionState::NominationClosed;
    Ok(true)
}

/// Synchronize one batch of voters; close the ballot once none are pending.
fn conclude_voting(ctx: &ElectionContext, record: &mut ElectionRecord) -> Result<(), ElectionError> {
    voters::sync_batch(ctx, record)?;
    if record.pending_voters.is_empty() {
        let ballot = record.ballot_id;
        ctx.ballots.close_voting(ballot, false).inspect_err(|e| {
            tracing::error!(ballot_id = %ballot, error = %e, "closing the vote failed")
        })?;
        record.state = ElectionState::VotingConcluded;
    }
    Ok(())
}

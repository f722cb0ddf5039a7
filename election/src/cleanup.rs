//! Reset the registries and voter lists after an election ends or is cancelled.

use oig_store::{ElectionRecord, WriteBatch};
use oig_types::{AccountName, ElectionState};

use crate::context::{ElectionContext, Transition};
use crate::error::{ElectionError, PhaseConflict};

/// What one cleanup pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanupPass {
    /// Late registrants moved from pending to synced in this pass.
    pub migrated: usize,
    /// The record reached `Clean`.
    pub finished: bool,
}

/// One bounded cleanup pass over `record`. Clears both registries, then
/// moves late registrants into the synced list in batches. Once pending is
/// empty, every voter is handed back to pending for the next cycle.
pub(crate) fn run(
    ctx: &ElectionContext,
    record: &mut ElectionRecord,
    writes: &mut WriteBatch,
) -> CleanupPass {
    writes.clear_nominations();
    writes.clear_profiles();
    record.nomination_count = 0;

    let mut pass = CleanupPass::default();
    if !record.synced_voters.is_empty() {
        let take = record.pending_voters.len().min(ctx.params.cleanup_batch_size);
        let split = record.pending_voters.len() - take;
        let mut moved: Vec<AccountName> = record.pending_voters.split_off(split);
        moved.reverse();
        record.synced_voters.append(&mut moved);
        pass.migrated = take;

        if record.pending_voters.is_empty() {
            record.pending_voters = std::mem::take(&mut record.synced_voters);
            pass.finished = true;
        }
    } else {
        // Nobody was synchronized this cycle (cancelled, or no voters yet);
        // pending is already the next cycle's list.
        pass.finished = true;
    }

    if pass.finished {
        record.state = ElectionState::Clean;
    }
    tracing::debug!(
        migrated = pass.migrated,
        remaining = record.pending_voters.len(),
        finished = pass.finished,
        "cleanup pass"
    );
    pass
}

/// Operator entry point for running a cleanup pass directly.
/// A clean record is left alone.
pub fn cleanup(ctx: &ElectionContext, caller: &AccountName) -> Result<Transition, ElectionError> {
    ctx.require_operator(caller)?;
    let mut record = ctx.load()?;
    match record.state {
        ElectionState::Clean => Ok(Transition::default()),
        ElectionState::Cleanup => {
            let mut writes = WriteBatch::new();
            let pass = run(ctx, &mut record, &mut writes);
            if pass.finished {
                tracing::info!(ballot_id = %record.ballot_id, "cleanup finished");
            }
            writes.put_election(record);
            Ok(Transition::commit(writes))
        }
        _ => Err(ElectionError::WrongPhase(PhaseConflict::NotInCleanup)),
    }
}

//! The nomination registry and its spam defense.
//!
//! The registry is capped because every accepted nominee becomes a ballot
//! option in a single external call when nominations close. Once the count
//! passes `nomination_cap`, the next nomination purges every unaccepted
//! entry first.

use oig_store::{NominationRecord, NominationStore, ProfileStore, WriteBatch};
use oig_types::{AccountName, ElectionState};

use crate::context::{require_signer, ElectionContext, Transition};
use crate::error::{ElectionError, PhaseConflict};

fn require_nomination_window(state: ElectionState) -> Result<(), ElectionError> {
    match state {
        s if s.accepts_nominations() => Ok(()),
        ElectionState::Clean | ElectionState::Cleanup => {
            Err(ElectionError::WrongPhase(PhaseConflict::NoElection))
        }
        _ => Err(ElectionError::WrongPhase(PhaseConflict::NominationClosed)),
    }
}

/// File a nomination of `nominee`, signed by `nominator`.
pub fn nominate(
    ctx: &ElectionContext,
    caller: &AccountName,
    nominator: &AccountName,
    nominee: &AccountName,
) -> Result<Transition, ElectionError> {
    require_signer(caller, nominator)?;
    let mut record = ctx.load()?;
    require_nomination_window(record.state)?;
    if ctx.store.get_nomination(nominee)?.is_some() {
        return Err(ElectionError::AlreadyExists(format!("nomination for {nominee}")));
    }
    ctx.require_account(nominee)?;

    let mut writes = WriteBatch::new();
    let mut count = record.nomination_count;

    if count > ctx.params.nomination_cap {
        let mut purged = 0u32;
        for stale in ctx.store.iter_nominations()?.into_iter().filter(|n| !n.accepted) {
            writes.delete_nomination(stale.nominee);
            purged += 1;
        }
        count = count.saturating_sub(purged);
        tracing::info!(purged, remaining = count, "nomination cap exceeded, unaccepted nominations purged");
    }

    let self_nomination = nominator == nominee;
    let accepted = self_nomination && count < ctx.params.auto_accept_limit;
    if self_nomination && !accepted {
        tracing::debug!(nominee = %nominee, count, "auto-accept suppressed");
    }

    writes.put_nomination(NominationRecord {
        nominee: nominee.clone(),
        accepted,
    });
    record.nomination_count = count + 1;
    tracing::info!(nominator = %nominator, nominee = %nominee, accepted, "nomination filed");

    writes.put_election(record);
    Ok(Transition::commit_and_advance(writes))
}

/// Accept or decline a nomination, signed by the nominee. Declining removes
/// the nomination and any profile the nominee published.
pub fn decide(
    ctx: &ElectionContext,
    caller: &AccountName,
    nominee: &AccountName,
    accept: bool,
) -> Result<Transition, ElectionError> {
    require_signer(caller, nominee)?;
    let mut record = ctx.load()?;
    require_nomination_window(record.state)?;
    let mut nomination = ctx
        .store
        .get_nomination(nominee)?
        .ok_or_else(|| ElectionError::NotFound(format!("nomination for {nominee}")))?;

    let mut writes = WriteBatch::new();
    if accept {
        nomination.accepted = true;
        writes.put_nomination(nomination);
        tracing::info!(nominee = %nominee, "nomination accepted");
    } else {
        writes.delete_nomination(nominee.clone());
        if ctx.store.get_profile(nominee)?.is_some() {
            writes.delete_profile(nominee.clone());
        }
        record.nomination_count = record.nomination_count.saturating_sub(1);
        tracing::info!(nominee = %nominee, "nomination declined");
        writes.put_election(record);
    }
    Ok(Transition::commit_and_advance(writes))
}

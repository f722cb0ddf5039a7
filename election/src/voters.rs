//! Voter tracking: registration with the stake ledger and the two voter lists.
//!
//! `pending_voters` still need their stake synchronized before the current
//! ballot closes, `synced_voters` already had it. The lists are disjoint.

use oig_client::VoterRegistration;
use oig_store::{ElectionRecord, VoterFlagStore, VoterRegistrationFlag, WriteBatch};
use oig_types::AccountName;

use crate::context::{require_signer, ElectionContext, Transition};
use crate::error::ElectionError;

/// Register `voter` with the ballot service under the operator's treasury.
/// A voter that already carries a registration flag is left untouched.
pub fn register(
    ctx: &ElectionContext,
    caller: &AccountName,
    voter: &AccountName,
) -> Result<Transition, ElectionError> {
    require_signer(caller, voter)?;
    ctx.require_account(voter)?;
    let mut record = ctx.load()?;

    if ctx.store.get_voter_flag(voter)?.is_some() {
        tracing::debug!(voter = %voter, "voter already registered");
        return Ok(Transition::commit_and_advance(WriteBatch::new()));
    }

    ctx.ballots.register_voter(&VoterRegistration {
        voter: voter.clone(),
        treasury: ctx.params.treasury.clone(),
        referrer: ctx.operator.clone(),
    })?;

    let mut writes = WriteBatch::new();
    writes.put_voter_flag(VoterRegistrationFlag {
        voter: voter.clone(),
        referrer: ctx.operator.clone(),
        treasury: ctx.params.treasury.clone(),
    });
    place_voter(&mut record, voter.clone());
    tracing::info!(
        voter = %voter,
        pending = record.pending_voters.len(),
        synced = record.synced_voters.len(),
        "voter registered"
    );
    writes.put_election(record);
    Ok(Transition::commit_and_advance(writes))
}

/// Append a newly registered voter to the right list.
///
/// While the sync pass is under way (or finished) and nothing is pending, the
/// voter goes to `synced_voters`; cleanup moves it back to pending for the
/// next cycle. Otherwise it joins the pending list.
pub(crate) fn place_voter(record: &mut ElectionRecord, voter: AccountName) {
    if !record.synced_voters.is_empty() && record.pending_voters.is_empty() {
        record.synced_voters.push(voter);
    } else {
        record.pending_voters.push(voter);
    }
}

/// Synchronize up to `sync_batch_size` pending voters, taken from the back of
/// the pending list. Returns how many were synchronized.
pub(crate) fn sync_batch(
    ctx: &ElectionContext,
    record: &mut ElectionRecord,
) -> Result<usize, ElectionError> {
    let mut synced = 0;
    while synced < ctx.params.sync_batch_size {
        let Some(voter) = record.pending_voters.pop() else {
            break;
        };
        ctx.ballots.sync_stake(&voter).inspect_err(|e| {
            tracing::error!(voter = %voter, error = %e, "stake sync failed")
        })?;
        ctx.ballots
            .rebalance_weight(&voter, record.ballot_id, ctx.operator)
            .inspect_err(|e| {
                tracing::error!(voter = %voter, error = %e, "weight rebalance failed")
            })?;
        record.synced_voters.push(voter);
        synced += 1;
    }
    tracing::debug!(
        ballot_id = %record.ballot_id,
        synced,
        remaining = record.pending_voters.len(),
        "voter stake synchronized"
    );
    Ok(synced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{name, Harness};
    use oig_client::ClientError;
    use oig_types::ElectionState;

    fn names(raw: &[&str]) -> Vec<AccountName> {
        raw.iter().map(|r| name(r)).collect()
    }

    #[test]
    fn register_flags_and_queues_voter() {
        let h = Harness::initialized();
        let alice = name("alice");
        let t = h.run(|ctx| register(ctx, &alice, &alice)).unwrap();
        assert_eq!(t.advance, crate::Advance::Requested);
        assert_eq!(h.record().pending_voters, vec![alice.clone()]);
        assert!(h.store.get_voter_flag(&alice).unwrap().is_some());
        assert_eq!(h.ledger.count("regvoter"), 1);
    }

    #[test]
    fn second_registration_is_a_no_op() {
        let h = Harness::initialized();
        let alice = name("alice");
        h.run(|ctx| register(ctx, &alice, &alice)).unwrap();
        let t = h.run(|ctx| register(ctx, &alice, &alice)).unwrap();
        assert!(t.writes.is_empty());
        assert_eq!(h.record().pending_voters.len(), 1);
        assert_eq!(h.ledger.count("regvoter"), 1);
    }

    #[test]
    fn unknown_voter_rejected() {
        let h = Harness::initialized();
        let ghost = name("ghost");
        let err = h.run(|ctx| register(ctx, &ghost, &ghost)).unwrap_err();
        assert!(matches!(err, ElectionError::UnknownAccount(_)));
        assert!(h.ledger.calls().is_empty());
    }

    #[test]
    fn rejected_registration_commits_nothing() {
        let h = Harness::initialized();
        h.ledger.reject("regvoter");
        let alice = name("alice");
        let err = h.run(|ctx| register(ctx, &alice, &alice)).unwrap_err();
        assert!(matches!(err, ElectionError::Service(ClientError::Rejected { .. })));
        assert!(h.store.get_voter_flag(&alice).unwrap().is_none());
        assert!(h.record().pending_voters.is_empty());
    }

    #[test]
    fn placement_rule() {
        let mut record = ElectionRecord::default();
        place_voter(&mut record, name("a"));
        assert_eq!(record.pending_voters, names(&["a"]));

        record.synced_voters = names(&["s"]);
        place_voter(&mut record, name("b"));
        assert_eq!(record.pending_voters, names(&["a", "b"]));

        record.pending_voters.clear();
        place_voter(&mut record, name("c"));
        assert_eq!(record.synced_voters, names(&["s", "c"]));
        assert!(record.pending_voters.is_empty());
    }

    #[test]
    fn sync_batch_pops_from_the_back() {
        let mut h = Harness::new();
        h.params.sync_batch_size = 2;
        let mut record = ElectionRecord {
            state: ElectionState::VotingOpen,
            pending_voters: names(&["a", "b", "c"]),
            ..ElectionRecord::default()
        };
        let synced = sync_batch(&h.ctx(), &mut record).unwrap();
        assert_eq!(synced, 2);
        assert_eq!(record.pending_voters, names(&["a"]));
        assert_eq!(record.synced_voters, names(&["c", "b"]));
        assert_eq!(h.ledger.count("sync"), 2);
        assert_eq!(h.ledger.count("rebalance"), 2);
    }
}

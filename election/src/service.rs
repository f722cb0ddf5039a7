//! The driver: runs an operation, commits it, then advances the election.

use std::sync::{Arc, Mutex, MutexGuard};

use oig_client::{AccountDirectory, BallotService, TransferService};
use oig_store::{
    ElectionRecord, ElectionStateStore, ElectionStore, NominationRecord, NominationStore,
    NomineeProfile, ProfileStore, VoterFlagStore, WriteBatch, WriteStore,
};
use oig_types::{AccountName, BallotId, Clock, ElectionParams, ElectionState, Timestamp};

use crate::context::{Advance, ElectionContext, Transition};
use crate::error::ElectionError;
use crate::lifecycle::ElectionDraft;
use crate::profile::ProfileAction;
use crate::status::ElectionStatus;
use crate::{cleanup, invariants, lifecycle, machine, nomination, profile, voters};

/// The external services an election talks to.
#[derive(Clone)]
pub struct ExternalServices {
    pub ballots: Arc<dyn BallotService>,
    pub transfers: Arc<dyn TransferService>,
    pub accounts: Arc<dyn AccountDirectory>,
}

impl ExternalServices {
    /// Use one adapter for all three services.
    pub fn shared<T>(adapter: Arc<T>) -> Self
    where
        T: BallotService + TransferService + AccountDirectory + 'static,
    {
        Self {
            ballots: adapter.clone(),
            transfers: adapter.clone(),
            accounts: adapter,
        }
    }
}

/// What an explicit advance did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceReport {
    pub from: ElectionState,
    pub to: ElectionState,
    /// Whether anything was written.
    pub changed: bool,
}

impl AdvanceReport {
    pub fn transitioned(&self) -> bool {
        self.from != self.to
    }
}

/// Election service for one operator.
///
/// Each call takes one clock snapshot, evaluates the operation against it,
/// checks the record invariants and commits the writes as one batch. When
/// the operation asks for it, the step function then runs against the same
/// snapshot and is committed separately.
///
/// Invocations are serialized: a second caller waits until the first has
/// committed, so it never acts on a record the first is about to replace.
pub struct ElectionService {
    operator: AccountName,
    params: ElectionParams,
    store: Arc<dyn ElectionStateStore>,
    services: ExternalServices,
    clock: Arc<dyn Clock>,
    invocation: Mutex<()>,
}

impl ElectionService {
    pub fn new(
        operator: AccountName,
        params: ElectionParams,
        store: Arc<dyn ElectionStateStore>,
        services: ExternalServices,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            operator,
            params,
            store,
            services,
            clock,
            invocation: Mutex::new(()),
        }
    }

    pub fn operator(&self) -> &AccountName {
        &self.operator
    }

    pub fn params(&self) -> &ElectionParams {
        &self.params
    }

    fn context(&self, now: Timestamp) -> ElectionContext<'_> {
        ElectionContext {
            operator: &self.operator,
            params: &self.params,
            store: self.store.as_ref(),
            ballots: self.services.ballots.as_ref(),
            transfers: self.services.transfers.as_ref(),
            accounts: self.services.accounts.as_ref(),
            now,
        }
    }

    fn serialize(&self) -> MutexGuard<'_, ()> {
        self.invocation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current(&self) -> Result<ElectionRecord, ElectionError> {
        Ok(self.store.get_election()?.unwrap_or_default())
    }

    fn commit(&self, before: &ElectionRecord, writes: WriteBatch) -> Result<(), ElectionError> {
        if writes.is_empty() {
            return Ok(());
        }
        if let Some(after) = writes.election() {
            invariants::check(before, after)?;
        }
        self.store.commit(writes)?;
        Ok(())
    }

    fn execute<F>(&self, op: &'static str, f: F) -> Result<ElectionState, ElectionError>
    where
        F: FnOnce(&ElectionContext) -> Result<Transition, ElectionError>,
    {
        let _guard = self.serialize();
        let now = self.clock.now();
        let before = self.current()?;
        let transition = f(&self.context(now)).inspect_err(|e| {
            tracing::debug!(op, error = %e, "operation rejected");
        })?;
        self.commit(&before, transition.writes)?;

        if transition.advance == Advance::Requested {
            if let Err(e) = self.advance_at(now) {
                tracing::warn!(
                    op,
                    error = %e,
                    "follow-up advance failed; left for the next trigger"
                );
            }
        }
        Ok(self.current()?.state)
    }

    /// Callers hold the invocation guard.
    fn advance_at(&self, now: Timestamp) -> Result<AdvanceReport, ElectionError> {
        let before = self.current()?;
        let outcome = machine::step(&self.context(now))?;
        let changed = !outcome.is_idle();
        self.commit(&before, outcome.writes)?;
        Ok(AdvanceReport {
            from: outcome.from,
            to: outcome.to,
            changed,
        })
    }

    // ── Operator ─────────────────────────────────────────────────────────

    pub fn initialize(&self, caller: &AccountName) -> Result<ElectionState, ElectionError> {
        self.execute("initialize", |ctx| lifecycle::initialize(ctx, caller))
    }

    pub fn create(
        &self,
        caller: &AccountName,
        draft: ElectionDraft,
    ) -> Result<ElectionState, ElectionError> {
        self.execute("create", |ctx| lifecycle::create(ctx, caller, draft))
    }

    pub fn cancel(&self, caller: &AccountName) -> Result<ElectionState, ElectionError> {
        self.execute("cancel", |ctx| lifecycle::cancel(ctx, caller))
    }

    pub fn end_election(&self, caller: &AccountName) -> Result<ElectionState, ElectionError> {
        self.execute("end_election", |ctx| lifecycle::end_election(ctx, caller))
    }

    pub fn cleanup(&self, caller: &AccountName) -> Result<ElectionState, ElectionError> {
        self.execute("cleanup", |ctx| cleanup::cleanup(ctx, caller))
    }

    pub fn override_ballot_id(
        &self,
        caller: &AccountName,
        ballot_id: BallotId,
    ) -> Result<ElectionState, ElectionError> {
        self.execute("override_ballot_id", |ctx| {
            lifecycle::override_ballot_id(ctx, caller, ballot_id)
        })
    }

    // ── Participants ─────────────────────────────────────────────────────

    pub fn nominate(
        &self,
        caller: &AccountName,
        nominator: &AccountName,
        nominee: &AccountName,
    ) -> Result<ElectionState, ElectionError> {
        self.execute("nominate", |ctx| {
            nomination::nominate(ctx, caller, nominator, nominee)
        })
    }

    pub fn decide(
        &self,
        caller: &AccountName,
        nominee: &AccountName,
        accept: bool,
    ) -> Result<ElectionState, ElectionError> {
        self.execute("decide", |ctx| nomination::decide(ctx, caller, nominee, accept))
    }

    pub fn submit_profile(
        &self,
        caller: &AccountName,
        nominee: &AccountName,
        action: ProfileAction,
    ) -> Result<ElectionState, ElectionError> {
        self.execute("submit_profile", |ctx| {
            profile::submit_profile(ctx, caller, nominee, action)
        })
    }

    pub fn register(
        &self,
        caller: &AccountName,
        voter: &AccountName,
    ) -> Result<ElectionState, ElectionError> {
        self.execute("register", |ctx| voters::register(ctx, caller, voter))
    }

    /// Evaluate the step function once. Open to anyone.
    pub fn request_advance(&self) -> Result<AdvanceReport, ElectionError> {
        let report = {
            let _guard = self.serialize();
            self.advance_at(self.clock.now())?
        };
        tracing::debug!(
            from = %report.from,
            to = %report.to,
            changed = report.changed,
            "advance requested"
        );
        Ok(report)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn record(&self) -> Result<Option<ElectionRecord>, ElectionError> {
        Ok(self.store.get_election()?)
    }

    pub fn status(&self) -> Result<ElectionStatus, ElectionError> {
        let record = self.current()?;
        let accepted = self.store.accepted_nominees()?.len();
        Ok(ElectionStatus::new(self.operator.clone(), &record, accepted))
    }

    pub fn nominations(&self) -> Result<Vec<NominationRecord>, ElectionError> {
        Ok(self.store.iter_nominations()?)
    }

    pub fn profile(&self, owner: &AccountName) -> Result<Option<NomineeProfile>, ElectionError> {
        Ok(self.store.get_profile(owner)?)
    }

    pub fn is_registered(&self, voter: &AccountName) -> Result<bool, ElectionError> {
        Ok(self.store.get_voter_flag(voter)?.is_some())
    }
}

//! Shared fixtures for unit tests.

use std::cell::Cell;

use oig_nullables::{NullLedger, NullStore};
use oig_store::{ElectionRecord, ElectionStore, WriteStore};
use oig_types::{AccountName, ElectionParams, ElectionState, Timestamp};

use crate::context::{ElectionContext, Transition};
use crate::error::ElectionError;

pub(crate) fn name(raw: &str) -> AccountName {
    AccountName::parse(raw).unwrap()
}

pub(crate) struct Harness {
    pub operator: AccountName,
    pub params: ElectionParams,
    pub store: NullStore,
    pub ledger: NullLedger,
    now: Cell<Timestamp>,
}

impl Harness {
    pub fn new() -> Self {
        let accounts = ["oig", "alice", "bob", "carol", "dave", "erin"].map(name);
        Self {
            operator: name("oig"),
            params: ElectionParams::default(),
            store: NullStore::new(),
            ledger: NullLedger::with_accounts(accounts),
            now: Cell::new(Timestamp::new(1000)),
        }
    }

    /// A harness whose record is already `Clean`.
    pub fn initialized() -> Self {
        let h = Self::new();
        h.seed_state(ElectionState::Clean);
        h
    }

    pub fn ctx(&self) -> ElectionContext<'_> {
        ElectionContext {
            operator: &self.operator,
            params: &self.params,
            store: &self.store,
            ballots: &self.ledger,
            transfers: &self.ledger,
            accounts: &self.ledger,
            now: self.now.get(),
        }
    }

    pub fn set_now(&self, secs: u64) {
        self.now.set(Timestamp::new(secs));
    }

    /// Evaluate an operation and commit its writes. Does not advance.
    pub fn run<F>(&self, op: F) -> Result<Transition, ElectionError>
    where
        F: FnOnce(&ElectionContext) -> Result<Transition, ElectionError>,
    {
        let transition = op(&self.ctx())?;
        self.store.commit(transition.writes.clone())?;
        Ok(transition)
    }

    pub fn record(&self) -> ElectionRecord {
        self.store.get_election().unwrap().unwrap()
    }

    pub fn seed_state(&self, state: ElectionState) {
        let mut record = self.store.get_election().unwrap().unwrap_or_default();
        record.state = state;
        self.store.seed_election(record);
    }

    pub fn seed(&self, record: ElectionRecord) {
        self.store.seed_election(record);
    }
}

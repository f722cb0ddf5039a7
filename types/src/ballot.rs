//! Ballot identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the ballot created on the ballot service for one election cycle.
///
/// Assigned from a monotonic counter: incremented when an election is created,
/// stepped back once if that election is cancelled before its ballot exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BallotId(u64);

impl BallotId {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The identifier assigned to the next election, if the counter has room.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Roll back a single assignment.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

impl fmt::Display for BallotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

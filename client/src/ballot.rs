//! The ballot-management service.

use oig_types::{AccountName, BallotId, Symbol, Timestamp};
use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Arguments for creating a ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBallot {
    pub ballot: BallotId,
    pub category: String,
    pub publisher: AccountName,
    pub treasury: Symbol,
    /// Voting method, e.g. `1token1vote`.
    pub method: String,
    /// Candidates, one option each.
    pub options: Vec<AccountName>,
}

/// Descriptive text attached to a ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotDetails {
    pub ballot: BallotId,
    pub title: String,
    pub description: String,
    pub content: String,
}

/// Registration of a voter with a treasury.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRegistration {
    pub voter: AccountName,
    pub treasury: Symbol,
    /// Account the registration is logged under; the treasury is private to it.
    pub referrer: AccountName,
}

pub trait BallotService: Send + Sync {
    fn create_ballot(&self, ballot: &NewBallot) -> Result<(), ClientError>;

    fn set_details(&self, details: &BallotDetails) -> Result<(), ClientError>;

    /// Toggle the weighting mode (e.g. `votestake` to count only staked tokens).
    fn set_vote_weighting(&self, ballot: BallotId, mode: &str) -> Result<(), ClientError>;

    fn open_voting(&self, ballot: BallotId, end_time: Timestamp) -> Result<(), ClientError>;

    fn close_voting(&self, ballot: BallotId, broadcast: bool) -> Result<(), ClientError>;

    fn register_voter(&self, registration: &VoterRegistration) -> Result<(), ClientError>;

    /// Refresh a voter's vote balance from their token stake.
    fn sync_stake(&self, voter: &AccountName) -> Result<(), ClientError>;

    /// Re-apply a voter's current weight to the votes cast on `ballot`.
    fn rebalance_weight(
        &self,
        voter: &AccountName,
        ballot: BallotId,
        worker: &AccountName,
    ) -> Result<(), ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ballot_serializes_typed_fields_as_strings() {
        let ballot = NewBallot {
            ballot: BallotId::new(7),
            category: "election".to_string(),
            publisher: AccountName::parse("oig").unwrap(),
            treasury: "8,VOTE".parse().unwrap(),
            method: "1token1vote".to_string(),
            options: vec![
                AccountName::parse("alice").unwrap(),
                AccountName::parse("bob").unwrap(),
            ],
        };
        let json = serde_json::to_value(&ballot).unwrap();
        assert_eq!(json["ballot"], 7);
        assert_eq!(json["treasury"], "8,VOTE");
        assert_eq!(json["options"][1], "bob");
    }
}

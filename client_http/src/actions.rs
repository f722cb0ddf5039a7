//! Wire payloads of the remote actions.

use oig_client::{BallotDetails, NewBallot, Transfer, VoterRegistration};
use oig_types::{AccountName, Asset, Symbol, Timestamp};
use serde::Serialize;

/// One signed action as the gateway expects it.
#[derive(Debug, Serialize)]
pub struct ActionEnvelope<'a, T: Serialize> {
    pub contract: &'a str,
    pub action: &'a str,
    pub authorization: [Authorization<'a>; 1],
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct Authorization<'a> {
    pub actor: &'a str,
    pub permission: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewBallotData<'a> {
    /// Ledger name of the ballot.
    pub ballot_name: String,
    pub category: &'a str,
    pub publisher: &'a AccountName,
    pub treasury_symbol: &'a Symbol,
    pub voting_method: &'a str,
    pub initial_options: &'a [AccountName],
}

impl<'a> NewBallotData<'a> {
    pub fn new(b: &'a NewBallot, ballot_name: String) -> Self {
        Self {
            ballot_name,
            category: &b.category,
            publisher: &b.publisher,
            treasury_symbol: &b.treasury,
            voting_method: &b.method,
            initial_options: &b.options,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditDetailsData<'a> {
    /// Ledger name of the ballot.
    pub ballot_name: String,
    pub title: &'a str,
    pub description: &'a str,
    pub content: &'a str,
}

impl<'a> EditDetailsData<'a> {
    pub fn new(d: &'a BallotDetails, ballot_name: String) -> Self {
        Self {
            ballot_name,
            title: &d.title,
            description: &d.description,
            content: &d.content,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleData<'a> {
    /// Ledger name of the ballot.
    pub ballot_name: String,
    pub setting_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct OpenVotingData {
    /// Ledger name of the ballot.
    pub ballot_name: String,
    pub end_time: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct CloseVotingData {
    /// Ledger name of the ballot.
    pub ballot_name: String,
    pub broadcast: bool,
}

#[derive(Debug, Serialize)]
pub struct RegVoterData<'a> {
    pub voter: &'a AccountName,
    pub treasury_symbol: &'a Symbol,
    pub referrer: &'a AccountName,
}

impl<'a> From<&'a VoterRegistration> for RegVoterData<'a> {
    fn from(r: &'a VoterRegistration) -> Self {
        Self {
            voter: &r.voter,
            treasury_symbol: &r.treasury,
            referrer: &r.referrer,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncData<'a> {
    pub voter: &'a AccountName,
}

#[derive(Debug, Serialize)]
pub struct RebalanceData<'a> {
    pub voter: &'a AccountName,
    /// Ledger name of the ballot.
    pub ballot_name: String,
    pub worker: &'a AccountName,
}

#[derive(Debug, Serialize)]
pub struct TransferData<'a> {
    pub from: &'a AccountName,
    pub to: &'a AccountName,
    pub quantity: &'a Asset,
    pub memo: &'a str,
}

impl<'a> From<&'a Transfer> for TransferData<'a> {
    fn from(t: &'a Transfer) -> Self {
        Self {
            from: &t.from,
            to: &t.to,
            quantity: &t.quantity,
            memo: &t.memo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oig_types::BallotId;

    fn name(raw: &str) -> AccountName {
        AccountName::parse(raw).unwrap()
    }

    #[test]
    fn envelope_shape() {
        let voter = name("alice");
        let envelope = ActionEnvelope {
            contract: "decide",
            action: "sync",
            authorization: [Authorization {
                actor: "oig",
                permission: "active",
            }],
            data: SyncData { voter: &voter },
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contract": "decide",
                "action": "sync",
                "authorization": [{"actor": "oig", "permission": "active"}],
                "data": {"voter": "alice"}
            })
        );
    }

    #[test]
    fn typed_fields_render_as_strings() {
        let transfer = Transfer {
            from: name("oig"),
            to: name("decide"),
            quantity: "30.00000000 WAX".parse().unwrap(),
            memo: "Ballot Fee Payment".to_string(),
        };
        let json = serde_json::to_value(TransferData::from(&transfer)).unwrap();
        assert_eq!(json["quantity"], "30.00000000 WAX");
        assert_eq!(json["to"], "decide");

        let ballot = NewBallot {
            ballot: BallotId::new(9),
            category: "election".to_string(),
            publisher: name("oig"),
            treasury: "8,VOTE".parse().unwrap(),
            method: "1token1vote".to_string(),
            options: vec![name("alice"), name("bob")],
        };
        let json =
            serde_json::to_value(NewBallotData::new(&ballot, "oig.........9".to_string())).unwrap();
        assert_eq!(json["ballot_name"], "oig.........9");
        assert_eq!(json["treasury_symbol"], "8,VOTE");
        assert_eq!(json["initial_options"], serde_json::json!(["alice", "bob"]));
    }
}

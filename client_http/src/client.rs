//! Blocking HTTP client for the action gateway.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use oig_client::{
    AccountDirectory, BallotDetails, BallotService, ClientError, NewBallot, Transfer,
    TransferService, VoterRegistration,
};
use oig_types::{AccountName, BallotId, Timestamp};

use crate::actions::{
    ActionEnvelope, Authorization, CloseVotingData, EditDetailsData, NewBallotData,
    OpenVotingData, RebalanceData, RegVoterData, SyncData, ToggleData, TransferData,
};
use crate::config::HttpClientConfig;
use crate::ledger_name::BallotNamer;

/// Error body returned by the gateway when an action is refused.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    error: String,
}

/// Client for the ballot, token and account endpoints, signing as `actor`.
pub struct HttpServiceClient {
    http_client: Client,
    config: HttpClientConfig,
    actor: AccountName,
    ballots: BallotNamer,
}

impl HttpServiceClient {
    pub fn new(config: HttpClientConfig, actor: AccountName) -> Result<Self, ClientError> {
        let ballots = BallotNamer::new(&config.ballot_base).ok_or_else(|| {
            ClientError::Other(format!("invalid ballot base name {:?}", config.ballot_base))
        })?;
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ClientError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            config,
            actor,
            ballots,
        })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Ledger name the ballot service knows `ballot` by.
    pub fn ballot_name(&self, ballot: BallotId) -> String {
        self.ballots.name(ballot)
    }

    fn push<T: Serialize>(&self, contract: &str, action: &str, data: T) -> Result<(), ClientError> {
        let envelope = ActionEnvelope {
            contract,
            action,
            authorization: [Authorization {
                actor: self.actor.as_str(),
                permission: &self.config.permission,
            }],
            data,
        };

        let response = self
            .http_client
            .post(self.config.actions_url())
            .json(&envelope)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(contract, action, "action accepted");
            return Ok(());
        }
        if status.is_client_error() {
            let reason = response
                .json::<RejectionBody>()
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("HTTP status {status}"));
            tracing::error!(contract, action, %reason, "action rejected");
            return Err(ClientError::Rejected {
                action: action.to_string(),
                reason,
            });
        }
        tracing::error!(contract, action, %status, "action failed");
        Err(ClientError::Unreachable(format!("HTTP status {status}")))
    }

    fn ballot_action<T: Serialize>(&self, action: &str, data: T) -> Result<(), ClientError> {
        self.push(&self.config.ballot_contract, action, data)
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Unreachable(format!("request timed out: {e}"))
    } else if e.is_connect() {
        ClientError::Unreachable(format!("connection failed: {e}"))
    } else {
        ClientError::Other(e.to_string())
    }
}

impl BallotService for HttpServiceClient {
    fn create_ballot(&self, ballot: &NewBallot) -> Result<(), ClientError> {
        let name = self.ballot_name(ballot.ballot);
        self.ballot_action("newballot", NewBallotData::new(ballot, name))
    }

    fn set_details(&self, details: &BallotDetails) -> Result<(), ClientError> {
        let name = self.ballot_name(details.ballot);
        self.ballot_action("editdetails", EditDetailsData::new(details, name))
    }

    fn set_vote_weighting(&self, ballot: BallotId, mode: &str) -> Result<(), ClientError> {
        self.ballot_action(
            "togglebal",
            ToggleData {
                ballot_name: self.ballot_name(ballot),
                setting_name: mode,
            },
        )
    }

    fn open_voting(&self, ballot: BallotId, end_time: Timestamp) -> Result<(), ClientError> {
        self.ballot_action(
            "openvoting",
            OpenVotingData {
                ballot_name: self.ballot_name(ballot),
                end_time,
            },
        )
    }

    fn close_voting(&self, ballot: BallotId, broadcast: bool) -> Result<(), ClientError> {
        self.ballot_action(
            "closevoting",
            CloseVotingData {
                ballot_name: self.ballot_name(ballot),
                broadcast,
            },
        )
    }

    fn register_voter(&self, registration: &VoterRegistration) -> Result<(), ClientError> {
        self.ballot_action("regvoter", RegVoterData::from(registration))
    }

    fn sync_stake(&self, voter: &AccountName) -> Result<(), ClientError> {
        self.ballot_action("sync", SyncData { voter })
    }

    fn rebalance_weight(
        &self,
        voter: &AccountName,
        ballot: BallotId,
        worker: &AccountName,
    ) -> Result<(), ClientError> {
        self.ballot_action(
            "rebalance",
            RebalanceData {
                voter,
                ballot_name: self.ballot_name(ballot),
                worker,
            },
        )
    }
}

impl TransferService for HttpServiceClient {
    fn transfer(&self, transfer: &Transfer) -> Result<(), ClientError> {
        self.push(
            &self.config.token_contract,
            "transfer",
            TransferData::from(transfer),
        )
    }
}

impl AccountDirectory for HttpServiceClient {
    fn account_exists(&self, account: &AccountName) -> Result<bool, ClientError> {
        let response = self
            .http_client
            .get(self.config.account_url(account.as_str()))
            .send()
            .map_err(transport_error)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            s => Err(ClientError::InvalidResponse(format!(
                "account lookup for {account} returned HTTP status {s}"
            ))),
        }
    }
}

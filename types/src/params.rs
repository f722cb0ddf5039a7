//! Election policy parameters.
//!
//! Every constant the engine consults lives here so deployments can tune
//! them from configuration. The defaults reproduce the production policy.

use serde::{Deserialize, Serialize};

use crate::{AccountName, Asset, Symbol};

/// Policy constants for the election engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionParams {
    // ── Nomination spam defense ──────────────────────────────────────────
    /// Once the nomination count exceeds this value, the next nomination
    /// purges every unaccepted nomination before it is inserted.
    #[serde(default = "default_nomination_cap")]
    pub nomination_cap: u32,

    /// Self-nominations are accepted automatically only while the nomination
    /// count is below this value.
    #[serde(default = "default_auto_accept_limit")]
    pub auto_accept_limit: u32,

    /// Accepted nominees required before the ballot can be created.
    #[serde(default = "default_min_candidates")]
    pub min_candidates: usize,

    // ── Per-invocation work bounds ───────────────────────────────────────
    /// Voters synchronized with the stake ledger per step evaluation.
    #[serde(default = "default_sync_batch_size")]
    pub sync_batch_size: usize,

    /// Voters migrated between the tracking lists per cleanup pass.
    #[serde(default = "default_cleanup_batch_size")]
    pub cleanup_batch_size: usize,

    // ── Ballot service ───────────────────────────────────────────────────
    /// Account of the ballot service; receives the ballot fee.
    #[serde(default = "default_ballot_service_account")]
    pub ballot_service_account: AccountName,

    /// Fee paid to the ballot service for every ballot created.
    #[serde(default = "default_ballot_fee")]
    pub ballot_fee: Asset,

    /// Memo attached to the ballot fee transfer.
    #[serde(default = "default_fee_memo")]
    pub fee_memo: String,

    /// Treasury whose stake weights the votes.
    #[serde(default = "default_treasury")]
    pub treasury: Symbol,

    #[serde(default = "default_ballot_category")]
    pub ballot_category: String,

    /// Voting method the ballot is created with.
    #[serde(default = "default_voting_method")]
    pub voting_method: String,

    /// Weighting toggle applied after creation so only staked tokens count.
    #[serde(default = "default_weighting_mode")]
    pub weighting_mode: String,

    #[serde(default)]
    pub profile: ProfileLimits,
}

/// Length limits for nominee profile fields, in characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLimits {
    #[serde(default = "default_name_len")]
    pub name: usize,
    #[serde(default = "default_descriptor_len")]
    pub descriptor: usize,
    #[serde(default = "default_picture_len")]
    pub picture: usize,
    #[serde(default = "default_contact_len")]
    pub contact: usize,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_nomination_cap() -> u32 {
    200
}

fn default_auto_accept_limit() -> u32 {
    150
}

fn default_min_candidates() -> usize {
    2
}

fn default_sync_batch_size() -> usize {
    100
}

fn default_cleanup_batch_size() -> usize {
    200
}

fn default_ballot_service_account() -> AccountName {
    AccountName::from_static("decide")
}

fn default_ballot_fee() -> Asset {
    Asset::new(3_000_000_000, Symbol::from_static(8, "WAX"))
}

fn default_fee_memo() -> String {
    "Ballot Fee Payment".to_string()
}

fn default_treasury() -> Symbol {
    Symbol::from_static(8, "VOTE")
}

fn default_ballot_category() -> String {
    "election".to_string()
}

fn default_voting_method() -> String {
    "1token1vote".to_string()
}

fn default_weighting_mode() -> String {
    "votestake".to_string()
}

fn default_name_len() -> usize {
    99
}

fn default_descriptor_len() -> usize {
    2000
}

fn default_picture_len() -> usize {
    256
}

fn default_contact_len() -> usize {
    99
}

impl Default for ElectionParams {
    fn default() -> Self {
        Self {
            nomination_cap: default_nomination_cap(),
            auto_accept_limit: default_auto_accept_limit(),
            min_candidates: default_min_candidates(),
            sync_batch_size: default_sync_batch_size(),
            cleanup_batch_size: default_cleanup_batch_size(),
            ballot_service_account: default_ballot_service_account(),
            ballot_fee: default_ballot_fee(),
            fee_memo: default_fee_memo(),
            treasury: default_treasury(),
            ballot_category: default_ballot_category(),
            voting_method: default_voting_method(),
            weighting_mode: default_weighting_mode(),
            profile: ProfileLimits::default(),
        }
    }
}

impl Default for ProfileLimits {
    fn default() -> Self {
        Self {
            name: default_name_len(),
            descriptor: default_descriptor_len(),
            picture: default_picture_len(),
            contact: default_contact_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_policy() {
        let params = ElectionParams::default();
        assert_eq!(params.nomination_cap, 200);
        assert_eq!(params.auto_accept_limit, 150);
        assert_eq!(params.sync_batch_size, 100);
        assert_eq!(params.cleanup_batch_size, 200);
        assert_eq!(params.ballot_fee.to_string(), "30.00000000 WAX");
        assert_eq!(params.treasury.to_string(), "8,VOTE");
        assert_eq!(params.ballot_service_account.as_str(), "decide");
    }

    #[test]
    fn static_defaults_are_valid() {
        let params = ElectionParams::default();
        assert!(AccountName::parse(params.ballot_service_account.as_str()).is_ok());
        assert!(params.treasury.to_string().parse::<Symbol>().is_ok());
        assert!(params.ballot_fee.to_string().parse::<Asset>().is_ok());
    }
}

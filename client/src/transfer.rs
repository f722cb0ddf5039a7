//! Token transfers.

use oig_types::{AccountName, Asset};
use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Arguments of a token transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: AccountName,
    pub to: AccountName,
    pub quantity: Asset,
    pub memo: String,
}

pub trait TransferService: Send + Sync {
    fn transfer(&self, transfer: &Transfer) -> Result<(), ClientError>;
}

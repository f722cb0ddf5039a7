//! Account existence lookups.

use oig_types::AccountName;

use crate::ClientError;

pub trait AccountDirectory: Send + Sync {
    fn account_exists(&self, account: &AccountName) -> Result<bool, ClientError>;
}

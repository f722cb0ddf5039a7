//! Account identities on the host ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Name of an account on the host ledger (operator, nominator, nominee, voter).
///
/// Names are 1 to 12 characters drawn from `a-z`, `1-5` and `.`, and never
/// end in a `.`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    /// Longest name the host ledger accepts.
    pub const MAX_LEN: usize = 12;

    /// Parse and validate an account name.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if s.is_empty() || s.len() > Self::MAX_LEN {
            return Err(TypesError::InvalidAccountName(s));
        }
        let valid_chars = s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || matches!(b, b'1'..=b'5') || b == b'.');
        if !valid_chars || s.ends_with('.') {
            return Err(TypesError::InvalidAccountName(s));
        }
        Ok(Self(s))
    }

    /// Build a name the caller has already validated.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        Self(raw.to_string())
    }

    /// Return the raw name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountName {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountName {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AccountName> for String {
    fn from(name: AccountName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ledger_style_names() {
        for raw in ["oig", "decide", "eosio.token", "voter1", "a"] {
            assert!(AccountName::parse(raw).is_ok(), "{raw} should parse");
        }
    }

    #[test]
    fn rejects_malformed_names() {
        for raw in [
            "", "Alice", "toolongname123", "trailing.", "with space", "dash-ed", "voter0", "n069",
        ] {
            assert!(AccountName::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn ordering_follows_name() {
        let a = AccountName::parse("alice").unwrap();
        let b = AccountName::parse("bob").unwrap();
        assert!(a < b);
    }

    #[test]
    fn deserialization_validates() {
        let bytes = bincode::serialize(&"Bad Name".to_string()).unwrap();
        assert!(bincode::deserialize::<AccountName>(&bytes).is_err());

        let bytes = bincode::serialize(&"voter1".to_string()).unwrap();
        let name: AccountName = bincode::deserialize(&bytes).unwrap();
        assert_eq!(name.as_str(), "voter1");
    }
}

//! Errors raised when constructing fundamental types from untrusted input.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid account name: {0}")]
    InvalidAccountName(String),

    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("invalid asset: {0}")]
    InvalidAsset(String),
}

//! Token symbols and quantities.
//!
//! Quantities are fixed-point integers scaled by the symbol precision, so
//! `30.00000000 WAX` is stored as `3_000_000_000` raw units at precision 8.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A token symbol with its decimal precision, written `8,VOTE`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol {
    precision: u8,
    code: String,
}

impl Symbol {
    const MAX_CODE_LEN: usize = 7;
    const MAX_PRECISION: u8 = 18;

    pub fn new(precision: u8, code: impl Into<String>) -> Result<Self, TypesError> {
        let code = code.into();
        let valid = !code.is_empty()
            && code.len() <= Self::MAX_CODE_LEN
            && code.bytes().all(|b| b.is_ascii_uppercase())
            && precision <= Self::MAX_PRECISION;
        if !valid {
            return Err(TypesError::InvalidSymbol(format!("{precision},{code}")));
        }
        Ok(Self { precision, code })
    }

    /// Build a symbol the caller has already validated.
    pub(crate) fn from_static(precision: u8, code: &'static str) -> Self {
        Self {
            precision,
            code: code.to_string(),
        }
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl FromStr for Symbol {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s
            .split_once(',')
            .ok_or_else(|| TypesError::InvalidSymbol(s.to_string()))?;
        let precision = precision
            .trim()
            .parse::<u8>()
            .map_err(|_| TypesError::InvalidSymbol(s.to_string()))?;
        Self::new(precision, code.trim())
    }
}

impl TryFrom<String> for Symbol {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.to_string()
    }
}

/// A token quantity, written `30.00000000 WAX`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    amount: u64,
    symbol: Symbol,
}

impl Asset {
    pub fn new(amount: u64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// Raw amount in the smallest unit of the symbol.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = u32::from(self.symbol.precision);
        if precision == 0 {
            return write!(f, "{} {}", self.amount, self.symbol.code);
        }
        let scale = 10u64.pow(precision);
        write!(
            f,
            "{}.{:0width$} {}",
            self.amount / scale,
            self.amount % scale,
            self.symbol.code,
            width = precision as usize
        )
    }
}

impl FromStr for Asset {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidAsset(s.to_string());
        let (quantity, code) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let (whole, fraction) = quantity.split_once('.').unwrap_or((quantity, ""));
        let precision = u8::try_from(fraction.len()).map_err(|_| invalid())?;
        let symbol = Symbol::new(precision, code.trim())?;

        let digits = format!("{whole}{fraction}");
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let amount = digits.parse::<u64>().map_err(|_| invalid())?;
        Ok(Self::new(amount, symbol))
    }
}

impl TryFrom<String> for Asset {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}

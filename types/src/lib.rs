//! Fundamental types for the OIG election orchestrator.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account names, ballot identifiers, assets, timestamps, election states and the
//! policy parameters that drive the election engine.

pub mod account;
pub mod asset;
pub mod ballot;
pub mod error;
pub mod params;
pub mod state;
pub mod time;

pub use account::AccountName;
pub use asset::{Asset, Symbol};
pub use ballot::BallotId;
pub use error::TypesError;
pub use params::{ElectionParams, ProfileLimits};
pub use state::ElectionState;
pub use time::{Clock, SystemClock, Timestamp};

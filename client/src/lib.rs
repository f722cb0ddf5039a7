//! Typed interfaces to the services the election orchestrator depends on.
//!
//! - [`BallotService`]: creates and runs ballots, tracks voter stake.
//! - [`TransferService`]: moves tokens (the ballot fee).
//! - [`AccountDirectory`]: answers whether an account exists on the host ledger.
//!
//! Calls are fire-and-forget: success means the service accepted the action.
//! Implementations live in `oig-client-http` (production) and
//! `oig-nullables` (tests).

pub mod accounts;
pub mod ballot;
pub mod error;
pub mod transfer;

pub use accounts::AccountDirectory;
pub use ballot::{BallotDetails, BallotService, NewBallot, VoterRegistration};
pub use error::ClientError;
pub use transfer::{Transfer, TransferService};

//! HTTP adapter for the external services.
//!
//! Every action is POSTed as a JSON envelope to `{endpoint}/v1/actions`:
//! `{"contract", "action", "authorization": [{"actor", "permission"}], "data"}`.
//! Account lookups are `GET {endpoint}/v1/accounts/{name}`; a 404 means the
//! account does not exist. Ballot ids go out as ledger names (see
//! [`ledger_name`]).
//!
//! The client is blocking. Async callers run it on a blocking thread.

pub mod actions;
pub mod client;
pub mod config;
pub mod ledger_name;

pub use client::HttpServiceClient;
pub use config::HttpClientConfig;
pub use ledger_name::BallotNamer;

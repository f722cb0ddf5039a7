//! Shared utilities for the OIG election tools.

pub mod logging;
pub mod time;

pub use logging::init_tracing;
pub use time::{describe_deadline, format_duration};

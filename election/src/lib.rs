//! Election orchestration for a recurring public election.
//!
//! Cycle: Created → NominationOpen → NominationClosed → VotingOpen → VotingConcluded → Cleanup → Clean.
//! Cancellation is possible until the ballot exists (Created, NominationOpen).
//!
//! Every entry point is a function of an [`ElectionContext`] that returns a
//! [`Transition`]: the writes to commit and whether the step function should
//! run afterwards. [`ElectionService`] is the driver that commits and then
//! advances, so the election moves forward on any traffic as well as on an
//! explicit [`ElectionService::request_advance`].
//!
//! Work per invocation is bounded: stake sync and cleanup migration run in
//! batches sized by [`oig_types::ElectionParams`].

pub mod cleanup;
pub mod context;
pub mod error;
pub mod invariants;
pub mod lifecycle;
pub mod machine;
pub mod nomination;
pub mod profile;
pub mod service;
pub mod status;
pub mod voters;

#[cfg(test)]
mod testkit;

pub use cleanup::CleanupPass;
pub use context::{Advance, ElectionContext, Transition};
pub use error::{ElectionError, PhaseConflict};
pub use lifecycle::ElectionDraft;
pub use machine::StepOutcome;
pub use profile::{ProfileAction, ProfileSubmission};
pub use service::{AdvanceReport, ElectionService, ExternalServices};
pub use status::ElectionStatus;

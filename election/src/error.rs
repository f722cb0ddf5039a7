use oig_client::ClientError;
use oig_store::StoreError;
use oig_types::AccountName;
use thiserror::Error;

/// Which phase rule an operation ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PhaseConflict {
    #[error("an election is already running")]
    AlreadyRunning,

    #[error("no election is currently running")]
    NoElection,

    #[error("the nomination period has closed")]
    NominationClosed,

    #[error("the ballot already exists; the election can no longer be cancelled")]
    TooLateToCancel,

    #[error("voting has concluded; end the election to start cleanup")]
    CleanupRequired,

    #[error("cleanup is in progress; advance the election to finish it")]
    CleanupInProgress,

    #[error("voting has already started")]
    VotingStarted,

    #[error("voting has not concluded yet")]
    VotingNotConcluded,

    #[error("the election is not in cleanup")]
    NotInCleanup,
}

#[derive(Debug, Error)]
pub enum ElectionError {
    #[error("election already initialized")]
    AlreadyInitialized,

    #[error("election not initialized")]
    NotInitialized,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("wrong phase: {0}")]
    WrongPhase(PhaseConflict),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("account {0} does not exist")]
    UnknownAccount(AccountName),

    #[error("missing authority of {required} (signed by {caller})")]
    Unauthorized {
        required: AccountName,
        caller: AccountName,
    },

    #[error("election record invariant violated: {0}")]
    InvariantViolation(String),

    #[error("external service error: {0}")]
    Service(#[from] ClientError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] oig_store::StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] oig_store_lmdb::LmdbError),

    #[error("service client error: {0}")]
    Client(#[from] oig_client::ClientError),

    #[error("election error: {0}")]
    Election(#[from] oig_election::ElectionError),

    #[error("{} is locked by another running instance", .0.display())]
    Locked(std::path::PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

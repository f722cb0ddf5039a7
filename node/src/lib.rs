//! Election node: the long-running side of the orchestrator.
//!
//! The node opens the LMDB store, connects the HTTP adapter for the ballot,
//! transfer and account services, and drives the election forward on a
//! fixed interval until it is told to shut down.

pub mod advancer;
pub mod config;
pub mod error;
pub mod lock;
pub mod logging;
pub mod node;
pub mod shutdown;

pub use advancer::Advancer;
pub use config::NodeConfig;
pub use error::NodeError;
pub use lock::DataDirLock;
pub use logging::{init_logging, LogFormat};
pub use node::ElectionNode;
pub use shutdown::ShutdownController;

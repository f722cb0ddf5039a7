//! The election node: one operator's election, backed by LMDB and the HTTP
//! service adapter.

use std::sync::Arc;
use std::time::Duration;

use oig_client_http::HttpServiceClient;
use oig_election::{ElectionService, ExternalServices};
use oig_store::ElectionStateStore;
use oig_store_lmdb::LmdbEnvironment;
use oig_types::{Clock, SystemClock};

use crate::{Advancer, DataDirLock, NodeConfig, NodeError, ShutdownController};

pub struct ElectionNode {
    config: NodeConfig,
    service: Arc<ElectionService>,
    lock: Option<DataDirLock>,
}

impl ElectionNode {
    /// Lock `data_dir`, open the store under it and connect to the
    /// configured endpoint. Fails with [`NodeError::Locked`] while another
    /// process owns the directory.
    pub fn open(config: NodeConfig) -> Result<Self, NodeError> {
        config.validate()?;
        let operator = config.operator()?;

        let lock = DataDirLock::acquire(&config.data_dir)?;
        let env = LmdbEnvironment::open(&config.data_dir, config.map_size)?;
        let client = HttpServiceClient::new(config.service.clone(), operator)?;
        tracing::info!(
            data_dir = %config.data_dir.display(),
            endpoint = %config.service.endpoint,
            "election node opened"
        );

        let mut node = Self::with_parts(
            config,
            Arc::new(env.election_store()),
            ExternalServices::shared(Arc::new(client)),
            Arc::new(SystemClock),
        )?;
        node.lock = Some(lock);
        Ok(node)
    }

    /// Assemble a node from already-built parts. No directory lock is taken.
    pub fn with_parts(
        config: NodeConfig,
        store: Arc<dyn ElectionStateStore>,
        services: ExternalServices,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, NodeError> {
        let service = ElectionService::new(
            config.operator()?,
            config.params.clone(),
            store,
            services,
            clock,
        );
        Ok(Self {
            config,
            service: Arc::new(service),
            lock: None,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<ElectionService> {
        &self.service
    }

    /// Whether this node holds the data directory lock.
    pub fn is_exclusive(&self) -> bool {
        self.lock.is_some()
    }

    pub fn advancer(&self) -> Advancer {
        Advancer::new(
            Arc::clone(&self.service),
            Duration::from_secs(self.config.advance_interval_secs),
        )
    }

    /// Run the advancer until SIGINT or SIGTERM.
    pub async fn run(&self) -> Result<(), NodeError> {
        let shutdown = ShutdownController::new();
        let advancer = tokio::spawn(self.advancer().run(shutdown.subscribe()));

        match self.service.record()? {
            Some(record) => tracing::info!(
                state = %record.state,
                ballot = %record.ballot_id,
                "resuming election"
            ),
            None => tracing::warn!(
                "election not initialized yet; run `init` to register the operator"
            ),
        }

        shutdown.wait_for_signal().await;
        let attempts = advancer
            .await
            .map_err(|e| NodeError::Other(format!("advancer task failed: {e}")))?;
        tracing::info!(attempts, "node stopped");
        Ok(())
    }
}

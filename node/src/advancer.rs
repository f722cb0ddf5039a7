//! Periodic advancing of the election.
//!
//! Nothing on the ledger side moves the election between phases, so the node
//! asks the engine to evaluate its step function on a fixed interval. The
//! engine is synchronous; each attempt runs on tokio's blocking pool.

use std::sync::Arc;
use std::time::Duration;

use oig_election::{AdvanceReport, ElectionService};
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use crate::NodeError;

pub struct Advancer {
    service: Arc<ElectionService>,
    interval: Duration,
}

impl Advancer {
    pub fn new(service: Arc<ElectionService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// One advance attempt.
    pub async fn tick(&self) -> Result<AdvanceReport, NodeError> {
        let service = Arc::clone(&self.service);
        let report = tokio::task::spawn_blocking(move || service.request_advance())
            .await
            .map_err(|e| NodeError::Other(format!("advance task failed: {e}")))??;
        Ok(report)
    }

    /// Advance until a shutdown notice arrives. Returns the number of attempts made.
    ///
    /// A failed attempt is logged and retried on the next tick; the engine
    /// leaves the record untouched when an attempt fails.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> u64 {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut attempts = 0u64;

        tracing::info!(interval_secs = self.interval.as_secs_f64(), "advancer started");
        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!(attempts, "advancer stopping");
                    break;
                }
                _ = interval.tick() => {
                    attempts += 1;
                    match self.tick().await {
                        Ok(report) if report.transitioned() => {
                            tracing::info!(
                                from = %report.from,
                                to = %report.to,
                                "election advanced on schedule"
                            );
                        }
                        Ok(report) => {
                            tracing::trace!(
                                state = %report.to,
                                changed = report.changed,
                                "nothing due"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "advance attempt failed; retrying next tick");
                        }
                    }
                }
            }
        }
        attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use oig_election::{ElectionDraft, ExternalServices};
    use oig_nullables::{NullClock, NullLedger, NullStore};
    use oig_store::Schedule;
    use oig_types::{AccountName, ElectionParams, ElectionState, Timestamp};

    use crate::ShutdownController;

    fn name(raw: &str) -> AccountName {
        AccountName::parse(raw).unwrap()
    }

    fn scheduled_service(clock: Arc<NullClock>, store: Arc<NullStore>) -> Arc<ElectionService> {
        let oig = name("oig");
        let ledger = Arc::new(NullLedger::with_accounts([oig.clone()]));
        let service = ElectionService::new(
            oig.clone(),
            ElectionParams::default(),
            store,
            ExternalServices::shared(ledger),
            clock,
        );
        service.initialize(&oig).unwrap();
        service
            .create(
                &oig,
                ElectionDraft {
                    title: "Council".to_string(),
                    description: "Council seats".to_string(),
                    content: "ipfs://council".to_string(),
                    schedule: Schedule {
                        nomination_open: Timestamp::new(2_000),
                        nomination_close: Timestamp::new(3_000),
                        voting_open: Timestamp::new(4_000),
                        voting_close: Timestamp::new(5_000),
                    },
                },
            )
            .unwrap();
        Arc::new(service)
    }

    #[tokio::test]
    async fn tick_opens_nominations_once_due() {
        let clock = Arc::new(NullClock::new(1_000));
        let service = scheduled_service(clock.clone(), Arc::new(NullStore::new()));
        let advancer = Advancer::new(service.clone(), Duration::from_millis(10));

        let idle = advancer.tick().await.unwrap();
        assert!(!idle.transitioned());
        assert_eq!(idle.to, ElectionState::Created);

        clock.set(2_000);
        let report = advancer.tick().await.unwrap();
        assert_eq!(report.from, ElectionState::Created);
        assert_eq!(report.to, ElectionState::NominationOpen);
    }

    #[tokio::test]
    async fn run_advances_until_shutdown() {
        let clock = Arc::new(NullClock::new(2_000));
        let service = scheduled_service(clock, Arc::new(NullStore::new()));
        let shutdown = ShutdownController::new();
        let handle = tokio::spawn(
            Advancer::new(service.clone(), Duration::from_millis(10)).run(shutdown.subscribe()),
        );

        let opened = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if service.status().unwrap().state == ElectionState::NominationOpen {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(opened.is_ok(), "advancer never opened nominations");

        shutdown.shutdown();
        let attempts = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("advancer stops after shutdown")
            .unwrap();
        assert!(attempts >= 1);
    }

    #[tokio::test]
    async fn failed_attempt_is_retried_on_the_next_tick() {
        let clock = Arc::new(NullClock::new(2_000));
        let store = Arc::new(NullStore::new());
        let service = scheduled_service(clock, store.clone());
        store.fail_next_commit();

        let advancer = Advancer::new(service.clone(), Duration::from_millis(5));
        assert!(advancer.tick().await.is_err());
        assert_eq!(service.status().unwrap().state, ElectionState::Created);

        let report = advancer.tick().await.unwrap();
        assert_eq!(report.to, ElectionState::NominationOpen);
    }
}

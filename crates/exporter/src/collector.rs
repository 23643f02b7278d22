use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::aggregator::ScoreBoard;
use crate::error::Result;
use crate::publisher::Publisher;
use crate::snapshot::SnapshotFetcher;

/// Default time between the starts of two collection cycles
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// What a successful cycle saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub teams: usize,
    pub problems: usize,
    pub answers: usize,
}

/// Runs fetch, aggregate and publish on a fixed period.
///
/// Cycles never overlap: the loop awaits a cycle before waiting for the next
/// tick, and a slow cycle pushes the following ticks back.
pub struct Collector {
    fetcher: SnapshotFetcher,
    publisher: Publisher,
    interval: Duration,
}

impl Collector {
    pub fn new(fetcher: SnapshotFetcher, publisher: Publisher, interval: Duration) -> Self {
        Self {
            fetcher,
            publisher,
            interval,
        }
    }

    /// Run one cycle. The cycle duration is recorded even when it fails.
    pub async fn collect(&self) -> Result<CycleSummary> {
        info!("starting to collect metrics");
        let start = Instant::now();

        let result = self.collect_once().await;

        let elapsed = start.elapsed();
        if let Err(e) = self.publisher.record_duration(elapsed) {
            error!(error = %e, "failed to record collection duration");
        }
        if result.is_ok() {
            info!(duration = elapsed.as_secs_f64(), "metrics collected");
        }

        result
    }

    async fn collect_once(&self) -> Result<CycleSummary> {
        let snapshot = self.fetcher.fetch().await?;
        let board = ScoreBoard::aggregate(&snapshot);
        self.publisher.publish(&snapshot, &board)?;

        Ok(CycleSummary {
            teams: snapshot.teams.len(),
            problems: snapshot.problems.len(),
            answers: snapshot.answers.len(),
        })
    }

    /// Collect once, then every `interval` until `shutdown` turns true.
    ///
    /// An error in the first cycle is returned immediately. Later errors are
    /// logged and the loop keeps going. Shutdown is only observed between
    /// cycles.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let summary = self.collect().await?;
        info!(
            teams = summary.teams,
            problems = summary.problems,
            answers = summary.answers,
            interval_secs = self.interval.as_secs_f64(),
            "first collection succeeded, starting periodic collection"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.collect().await {
                        error!(error = %e, "failed to collect metrics");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        // every sender is gone, nobody can stop us any more
                        break;
                    }
                }
            }
        }

        info!("metrics collector stopped");
        Ok(())
    }
}

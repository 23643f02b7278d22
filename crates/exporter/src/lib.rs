pub mod aggregator;
pub mod collector;
pub mod error;
pub mod publisher;
pub mod server;
pub mod sink;
pub mod snapshot;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{ScoreBoard, ScoreMode};
pub use collector::Collector;
pub use error::{CollectError, PublishError, Result};
pub use publisher::Publisher;
pub use sink::{MetricsSink, PrometheusSink};
pub use snapshot::{Denylist, Snapshot, SnapshotFetcher};
pub use store::{DataStore, PgStore};

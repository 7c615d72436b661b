//! joinbench core - measurement harness comparing join and merge
//! strategies under different key-index configurations.
//!
//! Dataset pairs are generated once, persisted to a scoped working
//! directory, and reloaded for every configuration so that all
//! measurements run against byte-identical inputs.

pub mod aggregate;
pub mod dataset;
pub mod engine;
pub mod logging;
pub mod progress;
pub mod results;
pub mod runner;
pub mod store;
pub mod sweep;

// Re-exports for convenience
pub use aggregate::{run_configuration, Strategy};
pub use dataset::{Dataset, DatasetPair, PairSpec};
pub use engine::{CombineEngine, JoinKind, MergeKeys, PolarsEngine};
pub use logging::init_logging;
pub use results::{ColumnStats, ResultsTable};
pub use runner::{time_join, time_merge};
pub use sweep::{run_sweep, Configuration, SweepConfig};

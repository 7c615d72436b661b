//! Runs one configuration across every stored pair.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use indicatif::ProgressBar;

use crate::engine::{CombineEngine, JoinKind};
use crate::runner::{time_join, time_merge};
use crate::store;

/// Which combine entry point a configuration exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Join,
    Merge,
}

/// Time one combine per stored pair under fixed index flags, returning
/// one sample per handle in handle order.
///
/// Every pair is reloaded from storage so that earlier configurations
/// (which may have re-keyed their frames) cannot contaminate this one.
/// The first failure aborts the whole batch; there are no retries.
pub fn run_configuration<E: CombineEngine>(
    engine: &E,
    handles: &[PathBuf],
    strategy: Strategy,
    index_left: bool,
    index_right: bool,
    how: JoinKind,
    bar: &ProgressBar,
) -> Result<Vec<f64>> {
    log::info!(
        "{strategy:?} over {} pairs (index_left: {index_left}, index_right: {index_right}, how: {how:?})",
        handles.len()
    );

    let mut samples = Vec::with_capacity(handles.len());
    let batch_start = Instant::now();
    for path in handles {
        let pair = store::load_pair(path)?;
        let (left, right) = pair.frames()?;
        let elapsed = match strategy {
            Strategy::Join => {
                time_join(engine, left, right, &pair.key, index_left, index_right, how)?
            }
            Strategy::Merge => {
                time_merge(engine, left, right, &pair.key, index_left, index_right, how)?
            }
        };
        samples.push(elapsed);
        bar.inc(1);
    }
    let batch_total = batch_start.elapsed().as_secs_f64();

    let mean = if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    };
    // Batch total includes load time, unlike the per-sample timings.
    log::info!(
        "{} samples, mean {:.6}s, batch total {:.3}s",
        samples.len(),
        mean,
        batch_total
    );
    Ok(samples)
}

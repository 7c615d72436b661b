//! Times a single combine invocation.
//!
//! The timed region covers re-keying (when a flag asks for it) plus the
//! combine itself: the cost of building an index is part of the strategy
//! being measured. The combined output is discarded untouched.

use std::time::Instant;

use anyhow::Result;
use polars::prelude::DataFrame;

use crate::engine::{CombineEngine, JoinKind, MergeKeys};

/// Time one index-based join. Consumes both frames.
pub fn time_join<E: CombineEngine>(
    engine: &E,
    left: DataFrame,
    right: DataFrame,
    key: &str,
    index_left: bool,
    index_right: bool,
    how: JoinKind,
) -> Result<f64> {
    let start = Instant::now();
    let left = if index_left { engine.rekey(left, key)? } else { left };
    let right = if index_right { engine.rekey(right, key)? } else { right };
    let combined = engine.join(left, right, key, how)?;
    let elapsed = start.elapsed().as_secs_f64();
    drop(combined);
    Ok(elapsed)
}

/// Time one key-based merge. The index flags translate into the explicit
/// [`MergeKeys`] parameter set handed to the engine. Consumes both frames.
pub fn time_merge<E: CombineEngine>(
    engine: &E,
    left: DataFrame,
    right: DataFrame,
    key: &str,
    index_left: bool,
    index_right: bool,
    how: JoinKind,
) -> Result<f64> {
    let start = Instant::now();
    let left = if index_left { engine.rekey(left, key)? } else { left };
    let right = if index_right { engine.rekey(right, key)? } else { right };
    let keys = MergeKeys::from_flags(key, index_left, index_right);
    let combined = engine.merge(left, right, &keys, how)?;
    let elapsed = start.elapsed().as_secs_f64();
    drop(combined);
    Ok(elapsed)
}

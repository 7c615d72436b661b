//! Full parameter sweep: 7 configurations over one materialized dataset
//! set, with scoped ownership of the temporary storage.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use crate::aggregate::{run_configuration, Strategy};
use crate::dataset::PairSpec;
use crate::engine::{CombineEngine, JoinKind};
use crate::progress;
use crate::results::ResultsTable;
use crate::store;

/// The fixed parameter space, in output-column order. Join never runs
/// with both flags clear; that variant is not part of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Configuration {
    JoinIndexLeft,
    JoinIndexRight,
    JoinIndexLeftRight,
    MergeNoIndex,
    MergeIndexLeft,
    MergeIndexRight,
    MergeIndexLeftRight,
}

impl Configuration {
    pub const ALL: [Self; 7] = [
        Self::JoinIndexLeft,
        Self::JoinIndexRight,
        Self::JoinIndexLeftRight,
        Self::MergeNoIndex,
        Self::MergeIndexLeft,
        Self::MergeIndexRight,
        Self::MergeIndexLeftRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::JoinIndexLeft => "JoinIndexLeft",
            Self::JoinIndexRight => "JoinIndexRight",
            Self::JoinIndexLeftRight => "JoinIndexLeftRight",
            Self::MergeNoIndex => "MergeNoIndex",
            Self::MergeIndexLeft => "MergeIndexLeft",
            Self::MergeIndexRight => "MergeIndexRight",
            Self::MergeIndexLeftRight => "MergeIndexLeftRight",
        }
    }

    pub fn strategy(self) -> Strategy {
        match self {
            Self::JoinIndexLeft | Self::JoinIndexRight | Self::JoinIndexLeftRight => {
                Strategy::Join
            }
            Self::MergeNoIndex
            | Self::MergeIndexLeft
            | Self::MergeIndexRight
            | Self::MergeIndexLeftRight => Strategy::Merge,
        }
    }

    /// (index_left, index_right)
    pub fn index_flags(self) -> (bool, bool) {
        match self {
            Self::JoinIndexLeft | Self::MergeIndexLeft => (true, false),
            Self::JoinIndexRight | Self::MergeIndexRight => (false, true),
            Self::JoinIndexLeftRight | Self::MergeIndexLeftRight => (true, true),
            Self::MergeNoIndex => (false, false),
        }
    }
}

/// One sweep's worth of settings, passed explicitly rather than read
/// from process-wide state.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Number of dataset pairs to materialize.
    pub pairs: usize,
    pub spec: PairSpec,
    /// Join semantics used by every configuration.
    pub how: JoinKind,
    /// RNG seed; OS entropy when unset.
    pub seed: Option<u64>,
    /// Base directory for the scoped temp dir; OS temp dir when unset.
    pub work_dir: Option<PathBuf>,
    /// Results CSV path.
    pub output: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            pairs: 5000,
            spec: PairSpec {
                rows: 10_000,
                cols: 3,
                value_min: 0,
                value_max: 100,
            },
            how: JoinKind::Left,
            seed: None,
            work_dir: None,
            output: PathBuf::from("join_merge_results.csv"),
        }
    }
}

/// Materialize the dataset set once, run all 7 configurations against
/// it, write the results CSV, and remove the temporary storage.
///
/// The temp directory is scoped to this call: it is removed on every
/// exit path, including mid-sweep failure. No partial results file is
/// written when the sweep fails.
pub fn run_sweep<E: CombineEngine>(config: &SweepConfig, engine: &E) -> Result<ResultsTable> {
    config.spec.validate()?;

    let workdir = match &config.work_dir {
        Some(base) => {
            std::fs::create_dir_all(base)
                .with_context(|| format!("failed to create {}", base.display()))?;
            TempDir::with_prefix_in("joinbench-", base)
        }
        None => TempDir::with_prefix("joinbench-"),
    }
    .context("failed to create temporary dataset directory")?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    log::info!(
        "materializing {} pairs, {} rows x {} cols each, values in [{}, {})",
        config.pairs,
        config.spec.rows,
        config.spec.cols,
        config.spec.value_min,
        config.spec.value_max
    );
    let bar = progress::count_bar(config.pairs as u64, "materialize");
    let handles = store::materialize(workdir.path(), config.pairs, &config.spec, &mut rng, &bar)?;
    bar.finish_and_clear();

    let mut table = ResultsTable::default();
    for configuration in Configuration::ALL {
        let (index_left, index_right) = configuration.index_flags();
        let bar = progress::count_bar(handles.len() as u64, configuration.name());
        let samples = run_configuration(
            engine,
            &handles,
            configuration.strategy(),
            index_left,
            index_right,
            config.how,
            &bar,
        )?;
        bar.finish_and_clear();
        table.push_column(configuration.name(), samples);
    }

    table.write_csv(&config.output)?;
    log::info!("results written to {}", config.output.display());

    Ok(table)
}

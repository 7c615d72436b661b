//! One-blob-per-pair persistence for benchmark inputs.
//!
//! Pairs are written once and reloaded for every configuration, so each
//! measurement sees byte-identical inputs. Ownership of the files
//! transfers to the caller; nothing here deletes them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rand::Rng;

use crate::dataset::{DatasetPair, PairSpec};

fn blob_config() -> bincode::config::Configuration {
    bincode::config::standard()
}

/// Generate `count` pairs and write each as one bincode blob under
/// `dir`. Returns the file handles in generation order. Any encode or
/// write failure aborts the run; a silently skipped pair would shrink
/// the sample population.
pub fn materialize(
    dir: &Path,
    count: usize,
    spec: &PairSpec,
    rng: &mut impl Rng,
    bar: &ProgressBar,
) -> Result<Vec<PathBuf>> {
    let mut handles = Vec::with_capacity(count);
    for i in 0..count {
        let pair = DatasetPair::generate(spec, rng)?;
        let blob = bincode::serde::encode_to_vec(&pair, blob_config())
            .with_context(|| format!("failed to encode dataset pair {i}"))?;
        let path = dir.join(format!("pair_{i:06}.bin"));
        fs::write(&path, &blob)
            .with_context(|| format!("failed to write {}", path.display()))?;
        handles.push(path);
        bar.inc(1);
    }
    Ok(handles)
}

/// Read one pair back from its blob.
pub fn load_pair(path: &Path) -> Result<DatasetPair> {
    let blob =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (pair, _) = bincode::serde::decode_from_slice(&blob, blob_config())
        .with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(pair)
}

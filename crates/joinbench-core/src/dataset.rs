//! Synthetic dataset pairs sharing exactly one join-key column.
//!
//! Column naming follows a letter convention: the left dataset takes the
//! first `cols` letters starting at 'A', the right dataset takes `cols`
//! letters starting at the left's last letter. The overlap is always
//! exactly one column, which is the join key (cols=3: left A,B,C and
//! right C,D,E, key "C").

use anyhow::{ensure, Result};
use polars::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Widest supported dataset: 2*cols-1 letters must fit in A..=Z.
pub const MAX_COLS: usize = 13;

fn letter(i: usize) -> String {
    char::from(b'A' + i as u8).to_string()
}

/// Column names for the left dataset.
pub fn left_column_names(cols: usize) -> Vec<String> {
    (0..cols).map(letter).collect()
}

/// Column names for the right dataset, overlapping the left in one.
pub fn right_column_names(cols: usize) -> Vec<String> {
    (cols - 1..2 * cols - 1).map(letter).collect()
}

/// The shared key column: the left's last letter, the right's first.
pub fn key_column(cols: usize) -> String {
    letter(cols - 1)
}

/// Shape and value range for one generated dataset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSpec {
    pub rows: usize,
    pub cols: usize,
    /// Inclusive lower bound for cell values.
    pub value_min: i64,
    /// Exclusive upper bound for cell values.
    pub value_max: i64,
}

impl PairSpec {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cols >= 1, "column count must be at least 1");
        ensure!(
            self.cols <= MAX_COLS,
            "column count {} needs {} distinct letters, the alphabet has 26",
            self.cols,
            2 * self.cols - 1
        );
        ensure!(
            self.value_min < self.value_max,
            "value range [{}, {}) is empty",
            self.value_min,
            self.value_max
        );
        Ok(())
    }
}

/// A rectangular grid of integers with named columns, stored
/// column-major so it round-trips through a single serde blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub names: Vec<String>,
    pub columns: Vec<Vec<i64>>,
}

impl Dataset {
    fn random(names: Vec<String>, spec: &PairSpec, rng: &mut impl Rng) -> Self {
        let columns = names
            .iter()
            .map(|_| {
                (0..spec.rows)
                    .map(|_| rng.gen_range(spec.value_min..spec.value_max))
                    .collect()
            })
            .collect();
        Self { names, columns }
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn to_frame(&self) -> Result<DataFrame> {
        let columns = self
            .names
            .iter()
            .zip(&self.columns)
            .map(|(name, values)| Column::new(name.as_str().into(), values.as_slice()))
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}

/// Two datasets plus the name of their shared key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPair {
    pub left: Dataset,
    pub right: Dataset,
    pub key: String,
}

impl DatasetPair {
    /// Generate one pair. Pure apart from the RNG: a seeded `StdRng`
    /// reproduces identical grids.
    pub fn generate(spec: &PairSpec, rng: &mut impl Rng) -> Result<Self> {
        spec.validate()?;
        let left = Dataset::random(left_column_names(spec.cols), spec, rng);
        let right = Dataset::random(right_column_names(spec.cols), spec, rng);
        Ok(Self {
            left,
            right,
            key: key_column(spec.cols),
        })
    }

    /// Materialize both sides as polars frames.
    pub fn frames(&self) -> Result<(DataFrame, DataFrame)> {
        Ok((self.left.to_frame()?, self.right.to_frame()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spec(rows: usize, cols: usize) -> PairSpec {
        PairSpec {
            rows,
            cols,
            value_min: 0,
            value_max: 10,
        }
    }

    #[test]
    fn default_naming_convention() {
        assert_eq!(left_column_names(3), ["A", "B", "C"]);
        assert_eq!(right_column_names(3), ["C", "D", "E"]);
        assert_eq!(key_column(3), "C");
    }

    #[test]
    fn names_overlap_in_exactly_the_key() {
        for cols in 1..=MAX_COLS {
            let left = left_column_names(cols);
            let right = right_column_names(cols);
            let shared: Vec<_> = left.iter().filter(|n| right.contains(n)).collect();
            assert_eq!(shared, [&key_column(cols)], "cols={cols}");
        }
    }

    #[test]
    fn generated_shape_and_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let pair = DatasetPair::generate(&spec(4, 3), &mut rng).unwrap();
        assert_eq!(pair.left.rows(), 4);
        assert_eq!(pair.right.rows(), 4);
        assert_eq!(pair.left.columns.len(), 3);
        assert_eq!(pair.right.columns.len(), 3);
        assert_eq!(pair.key, "C");
        for ds in [&pair.left, &pair.right] {
            for col in &ds.columns {
                assert!(col.iter().all(|v| (0..10).contains(v)));
            }
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let s = spec(8, 3);
        let first = DatasetPair::generate(&s, &mut a).unwrap();
        let second = DatasetPair::generate(&s, &mut b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fresh_seed_keeps_structure() {
        let s = spec(8, 4);
        let first = DatasetPair::generate(&s, &mut StdRng::seed_from_u64(1)).unwrap();
        let second = DatasetPair::generate(&s, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(first.left.names, second.left.names);
        assert_eq!(first.right.names, second.right.names);
        assert_eq!(first.key, second.key);
        assert_eq!(first.left.rows(), second.left.rows());
    }

    #[test]
    fn zero_rows_is_legal() {
        let mut rng = StdRng::seed_from_u64(1);
        let pair = DatasetPair::generate(&spec(0, 3), &mut rng).unwrap();
        assert_eq!(pair.left.rows(), 0);
        let (left, right) = pair.frames().unwrap();
        assert_eq!(left.height(), 0);
        assert_eq!(right.height(), 0);
    }

    #[test]
    fn single_column_degenerates_to_shared_key() {
        let mut rng = StdRng::seed_from_u64(1);
        let pair = DatasetPair::generate(&spec(2, 1), &mut rng).unwrap();
        assert_eq!(pair.left.names, ["A"]);
        assert_eq!(pair.right.names, ["A"]);
        assert_eq!(pair.key, "A");
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(DatasetPair::generate(&spec(1, 0), &mut rng).is_err());
        assert!(DatasetPair::generate(&spec(1, MAX_COLS + 1), &mut rng).is_err());
        let empty_range = PairSpec {
            rows: 1,
            cols: 3,
            value_min: 5,
            value_max: 5,
        };
        assert!(DatasetPair::generate(&empty_range, &mut rng).is_err());
    }

    #[test]
    fn to_frame_preserves_names_and_cells() {
        let ds = Dataset {
            names: vec!["A".into(), "B".into()],
            columns: vec![vec![1, 2, 3], vec![4, 5, 6]],
        };
        let frame = ds.to_frame().unwrap();
        assert_eq!(frame.height(), 3);
        let names: Vec<_> = frame.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        let b: Vec<i64> = frame
            .column("B")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(b, [4, 5, 6]);
    }
}

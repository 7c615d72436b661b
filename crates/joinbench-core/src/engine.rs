//! Combine engine seam: the harness times combines, polars performs them.
//!
//! The trait exists so the runner's parameter plumbing can be verified
//! against a recording fake; the shipped engine delegates everything to
//! polars lazy joins.

use anyhow::{anyhow, Result};
use polars::prelude::*;

/// Suffix appended to right-side non-key columns that collide with a
/// left-side name.
pub const RIGHT_SUFFIX: &str = "_rhs";

/// Join semantics accepted by both strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Left,
    Right,
    Inner,
    Outer,
}

impl JoinKind {
    fn to_polars(self) -> JoinType {
        match self {
            Self::Left => JoinType::Left,
            Self::Right => JoinType::Right,
            Self::Inner => JoinType::Inner,
            Self::Outer => JoinType::Full,
        }
    }
}

/// Parameter set for a merge, one variant per (index_left, index_right)
/// combination. An `Index` side means "use the already-built index";
/// a column name means "look the key up by name".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeKeys {
    Columns { left_on: String, right_on: String },
    LeftIndex { right_on: String },
    RightIndex { left_on: String },
    BothIndexes,
}

impl MergeKeys {
    pub fn from_flags(key: &str, index_left: bool, index_right: bool) -> Self {
        match (index_left, index_right) {
            (false, false) => Self::Columns {
                left_on: key.to_string(),
                right_on: key.to_string(),
            },
            (true, false) => Self::LeftIndex {
                right_on: key.to_string(),
            },
            (false, true) => Self::RightIndex {
                left_on: key.to_string(),
            },
            (true, true) => Self::BothIndexes,
        }
    }
}

/// A backend that can re-key frames and combine them.
///
/// Frames are taken by value: engines may reorder or otherwise consume
/// their inputs, and callers must reload from storage instead of reusing
/// them across configurations.
pub trait CombineEngine {
    /// Promote `key` to the frame's lookup index. The returned frame is
    /// sorted by the key with the key in the leading position; `Index`
    /// sides of a later merge resolve to that leading column.
    fn rekey(&self, df: DataFrame, key: &str) -> Result<DataFrame>;

    /// Combine two frames on their shared key column.
    fn join(&self, left: DataFrame, right: DataFrame, key: &str, how: JoinKind)
        -> Result<DataFrame>;

    /// Combine two frames under an explicit per-side parameter set.
    fn merge(
        &self,
        left: DataFrame,
        right: DataFrame,
        keys: &MergeKeys,
        how: JoinKind,
    ) -> Result<DataFrame>;
}

/// The shipped engine: polars lazy joins.
pub struct PolarsEngine;

fn leading_column(df: &DataFrame) -> Result<String> {
    df.get_column_names()
        .first()
        .map(|name| name.to_string())
        .ok_or_else(|| anyhow!("frame has no columns to use as an index"))
}

impl PolarsEngine {
    fn combine(
        &self,
        left: DataFrame,
        right: DataFrame,
        left_on: &str,
        right_on: &str,
        how: JoinKind,
    ) -> Result<DataFrame> {
        let mut args = JoinArgs::new(how.to_polars());
        args.suffix = Some(RIGHT_SUFFIX.into());
        let out = left
            .lazy()
            .join(right.lazy(), [col(left_on)], [col(right_on)], args)
            .collect()?;
        Ok(out)
    }
}

impl CombineEngine for PolarsEngine {
    fn rekey(&self, df: DataFrame, key: &str) -> Result<DataFrame> {
        // Sorting by the key is what polars records as lookup metadata;
        // the sort cost is the index-construction cost under measurement.
        let sorted = df.sort([key], SortMultipleOptions::default())?;
        let mut order = vec![key.to_string()];
        order.extend(
            sorted
                .get_column_names()
                .iter()
                .map(|name| name.to_string())
                .filter(|name| name != key),
        );
        Ok(sorted.select(order)?)
    }

    fn join(
        &self,
        left: DataFrame,
        right: DataFrame,
        key: &str,
        how: JoinKind,
    ) -> Result<DataFrame> {
        self.combine(left, right, key, key, how)
    }

    fn merge(
        &self,
        left: DataFrame,
        right: DataFrame,
        keys: &MergeKeys,
        how: JoinKind,
    ) -> Result<DataFrame> {
        let (left_on, right_on) = match keys {
            MergeKeys::Columns { left_on, right_on } => (left_on.clone(), right_on.clone()),
            MergeKeys::LeftIndex { right_on } => (leading_column(&left)?, right_on.clone()),
            MergeKeys::RightIndex { left_on } => (left_on.clone(), leading_column(&right)?),
            MergeKeys::BothIndexes => (leading_column(&left)?, leading_column(&right)?),
        };
        self.combine(left, right, &left_on, &right_on, how)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetPair, PairSpec};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|n| n.to_string()).collect()
    }

    fn key_values(df: &DataFrame, key: &str) -> Vec<i64> {
        df.column(key)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn merge_keys_decision_table() {
        assert_eq!(
            MergeKeys::from_flags("C", false, false),
            MergeKeys::Columns {
                left_on: "C".into(),
                right_on: "C".into()
            }
        );
        assert_eq!(
            MergeKeys::from_flags("C", true, false),
            MergeKeys::LeftIndex {
                right_on: "C".into()
            }
        );
        assert_eq!(
            MergeKeys::from_flags("C", false, true),
            MergeKeys::RightIndex {
                left_on: "C".into()
            }
        );
        assert_eq!(MergeKeys::from_flags("C", true, true), MergeKeys::BothIndexes);
    }

    #[test]
    fn rekey_sorts_and_promotes_the_key() {
        let df = df!(
            "A" => &[9i64, 1, 5],
            "B" => &[1i64, 2, 3],
            "C" => &[3i64, 2, 1]
        )
        .unwrap();
        let rekeyed = PolarsEngine.rekey(df, "C").unwrap();
        assert_eq!(names(&rekeyed), ["C", "A", "B"]);
        assert_eq!(key_values(&rekeyed, "C"), [1, 2, 3]);
        // Row integrity: A must travel with its original C.
        assert_eq!(key_values(&rekeyed, "A"), [5, 1, 9]);
    }

    #[test]
    fn left_join_keeps_key_unsuffixed() {
        let mut rng = StdRng::seed_from_u64(11);
        let spec = PairSpec {
            rows: 4,
            cols: 3,
            value_min: 0,
            value_max: 10,
        };
        let pair = DatasetPair::generate(&spec, &mut rng).unwrap();
        let (left, right) = pair.frames().unwrap();
        let out = PolarsEngine.join(left, right, &pair.key, JoinKind::Left).unwrap();
        assert!(out.height() >= 4);
        assert_eq!(names(&out), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn merge_matches_join_output_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        let spec = PairSpec {
            rows: 16,
            cols: 3,
            value_min: 0,
            value_max: 4,
        };
        let pair = DatasetPair::generate(&spec, &mut rng).unwrap();

        let (left, right) = pair.frames().unwrap();
        let joined = PolarsEngine.join(left, right, &pair.key, JoinKind::Left).unwrap();

        let (left, right) = pair.frames().unwrap();
        let keys = MergeKeys::from_flags(&pair.key, false, false);
        let merged = PolarsEngine.merge(left, right, &keys, JoinKind::Left).unwrap();

        assert_eq!(joined.height(), merged.height());
        assert_eq!(names(&joined), names(&merged));
    }

    #[test]
    fn merge_on_both_indexes_uses_promoted_columns() {
        let mut rng = StdRng::seed_from_u64(5);
        let spec = PairSpec {
            rows: 8,
            cols: 3,
            value_min: 0,
            value_max: 4,
        };
        let pair = DatasetPair::generate(&spec, &mut rng).unwrap();
        let (left, right) = pair.frames().unwrap();
        let left = PolarsEngine.rekey(left, &pair.key).unwrap();
        let right = PolarsEngine.rekey(right, &pair.key).unwrap();
        let out = PolarsEngine
            .merge(left, right, &MergeKeys::BothIndexes, JoinKind::Left)
            .unwrap();
        assert!(out.height() >= 8);
        let out_names = names(&out);
        assert!(out_names.contains(&"C".to_string()));
        assert!(!out_names.contains(&format!("C{RIGHT_SUFFIX}")));
    }

    #[test]
    fn colliding_non_key_columns_get_right_suffix() {
        let left = df!(
            "A" => &[1i64, 2],
            "C" => &[1i64, 2]
        )
        .unwrap();
        let right = df!(
            "C" => &[1i64, 2],
            "A" => &[7i64, 8]
        )
        .unwrap();
        let out = PolarsEngine.join(left, right, "C", JoinKind::Inner).unwrap();
        let out_names = names(&out);
        assert!(out_names.contains(&"A".to_string()));
        assert!(out_names.contains(&format!("A{RIGHT_SUFFIX}")));
    }

    #[test]
    fn all_join_kinds_are_accepted() {
        for how in [JoinKind::Left, JoinKind::Right, JoinKind::Inner, JoinKind::Outer] {
            let left = df!("A" => &[1i64, 2], "C" => &[1i64, 2]).unwrap();
            let right = df!("C" => &[2i64, 3], "E" => &[5i64, 6]).unwrap();
            let out = PolarsEngine.join(left, right, "C", how);
            assert!(out.is_ok(), "{how:?} failed: {out:?}");
        }
    }
}

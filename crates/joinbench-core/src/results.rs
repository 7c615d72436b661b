//! Results table and the CSV artifact.

use std::path::Path;

use anyhow::{Context, Result};

/// Timing samples, one named column per configuration and one row per
/// dataset pair. Filled column by column in sweep order.
#[derive(Debug, Default, Clone)]
pub struct ResultsTable {
    columns: Vec<(String, Vec<f64>)>,
}

/// Summary of one column for the post-run report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl ResultsTable {
    pub fn push_column(&mut self, name: &str, samples: Vec<f64>) {
        assert!(
            self.columns.is_empty() || samples.len() == self.rows(),
            "column {name} has {} samples, table has {} rows",
            samples.len(),
            self.rows()
        );
        self.columns.push((name.to_string(), samples));
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, samples)| samples.len())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(name, samples)| (name.as_str(), samples.as_slice()))
    }

    pub fn column_stats(&self) -> impl Iterator<Item = (&str, ColumnStats)> {
        self.columns.iter().map(|(name, samples)| {
            let count = samples.len();
            let mean = if count == 0 {
                0.0
            } else {
                samples.iter().sum::<f64>() / count as f64
            };
            let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (name.as_str(), ColumnStats { count, mean, min, max })
        })
    }

    /// Write the table as delimited text: an unnamed leading row-index
    /// column, then one column per configuration.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("failed to create {}", path.display()))?;

        let mut header = vec![String::new()];
        header.extend(self.columns.iter().map(|(name, _)| name.clone()));
        writer.write_record(&header)?;

        for row in 0..self.rows() {
            let mut record = vec![row.to_string()];
            record.extend(self.columns.iter().map(|(_, samples)| samples[row].to_string()));
            writer.write_record(&record)?;
        }

        writer
            .flush()
            .with_context(|| format!("failed to flush {}", path.display()))?;
        Ok(())
    }
}

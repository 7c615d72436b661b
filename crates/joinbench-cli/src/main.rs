//! joinbench - wall-clock comparison of index-based joins against
//! key-based merges over synthetic datasets.
//!
//! Running with no arguments executes the full fixed sweep (5000 pairs,
//! 10000 rows x 3 cols, values in [0, 100)) and writes one CSV results
//! table. Flags only override sweep parameters or verbosity.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use joinbench_core::dataset::PairSpec;
use joinbench_core::{JoinKind, PolarsEngine, ResultsTable, SweepConfig};

#[derive(Parser)]
#[command(name = "joinbench")]
#[command(about = "Benchmark join vs merge strategies under different index configurations")]
#[command(version)]
struct Cli {
    /// Number of dataset pairs to generate
    #[arg(long, default_value_t = 5000)]
    pairs: usize,

    /// Rows per dataset
    #[arg(long, default_value_t = 10000)]
    rows: usize,

    /// Columns per dataset (left and right overlap in exactly one, the key)
    #[arg(long, default_value_t = 3)]
    cols: usize,

    /// Inclusive lower bound for cell values
    #[arg(long, default_value_t = 0)]
    value_min: i64,

    /// Exclusive upper bound for cell values
    #[arg(long, default_value_t = 100)]
    value_max: i64,

    /// Join semantics used by every configuration
    #[arg(long, value_enum, default_value = "left")]
    how: How,

    /// RNG seed for reproducible datasets
    #[arg(long)]
    seed: Option<u64>,

    /// Base directory for the run's temporary dataset files (default: OS temp dir)
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Results CSV path
    #[arg(short, long, default_value = "join_merge_results.csv")]
    output: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(long, conflicts_with = "debug")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum How {
    Left,
    Right,
    Inner,
    Outer,
}

impl From<How> for JoinKind {
    fn from(how: How) -> Self {
        match how {
            How::Left => JoinKind::Left,
            How::Right => JoinKind::Right,
            How::Inner => JoinKind::Inner,
            How::Outer => JoinKind::Outer,
        }
    }
}

fn print_summary(table: &ResultsTable) {
    use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

    let mut summary = Table::new();
    summary
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Configuration").fg(Color::Cyan),
            Cell::new("Samples").fg(Color::Cyan),
            Cell::new("Mean (s)").fg(Color::Cyan),
            Cell::new("Min (s)").fg(Color::Cyan),
            Cell::new("Max (s)").fg(Color::Cyan),
        ]);

    for (name, stats) in table.column_stats() {
        summary.add_row(vec![
            name.to_string(),
            stats.count.to_string(),
            format!("{:.6}", stats.mean),
            format!("{:.6}", stats.min),
            format!("{:.6}", stats.max),
        ]);
    }

    eprintln!("\n{summary}");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    joinbench_core::init_logging(cli.quiet, cli.debug);

    let config = SweepConfig {
        pairs: cli.pairs,
        spec: PairSpec {
            rows: cli.rows,
            cols: cli.cols,
            value_min: cli.value_min,
            value_max: cli.value_max,
        },
        how: cli.how.into(),
        seed: cli.seed,
        work_dir: cli.work_dir,
        output: cli.output,
    };

    let table = joinbench_core::run_sweep(&config, &PolarsEngine)?;
    print_summary(&table);

    Ok(())
}

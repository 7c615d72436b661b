//! Progress bars, hidden when stderr is not a terminal.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix:<20.dim} {bar:30.green/dim} {pos:>7}/{len:7} {eta:>4}")
        .expect("invalid template")
        .progress_chars("--")
}

/// Count bar over `len` items. Non-TTY: hidden (no-op).
pub fn count_bar(len: u64, prefix: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    bar.set_style(bar_style());
    bar.set_prefix(prefix.to_string());
    bar
}

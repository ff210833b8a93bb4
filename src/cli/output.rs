//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Error, Result, q_learning::Stats};

/// Create a progress bar counting plies
pub fn create_training_progress(total_plies: u64) -> Result<ProgressBar> {
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} plies ({msg})")
        .map_err(|e| Error::ProgressBarTemplate {
            message: e.to_string(),
        })?
        .progress_chars("=>-");
    let pb = ProgressBar::new(total_plies);
    pb.set_style(style);
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// One line per agent, e.g. `W 12 / L 3 / D 40`
pub fn format_stats(stats: &Stats) -> String {
    format!("W {} / L {} / D {}", stats.wins, stats.losses, stats.draws)
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

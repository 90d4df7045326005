use std::time::Duration;

use colored::*;

use crate::engine::ScanOutcome;

/// Print the run summary to stderr.
///
/// With `quiet` only a single line is printed; with `verbose` every skipped
/// file is listed with its reason.
pub fn render(outcome: &ScanOutcome, elapsed: Duration, verbose: bool, quiet: bool) {
    let licenses = outcome.licenses.len();
    let skipped = outcome.skipped();

    if quiet {
        eprintln!(
            "Files: {}  Scanned: {}  Skipped: {}  Licenses: {}",
            outcome.total,
            outcome.scanned.to_string().green(),
            colored_count(skipped, Color::Red),
            licenses.to_string().cyan(),
        );
        return;
    }

    eprintln!(" ┌────────────────────────────────────────────────────┐");
    eprintln!(" │  {:<48} │", "SUMMARY".bold());
    eprintln!(" │  {:<48} │", format!("Files matched      : {:>6}", outcome.total));
    eprintln!(
        " │  {:<48} │",
        format!("{}  Scanned         : {:>6}", "✓".green(), outcome.scanned)
    );
    eprintln!(
        " │  {:<48} │",
        format!("{}  Skipped         : {:>6}", "✗".red(), skipped)
    );
    eprintln!(" │  {:<48} │", format!("Distinct licenses  : {:>6}", licenses));
    eprintln!(
        " │  {:<48} │",
        format!("Elapsed            : {:>5.2}s", elapsed.as_secs_f64())
    );
    eprintln!(" └────────────────────────────────────────────────────┘\n");

    if verbose && skipped > 0 {
        eprintln!(" {} Skipped files:\n", "[SKIP]".red().bold());
        for failure in &outcome.failures {
            eprintln!(
                "   {} {} ({})",
                "→".red(),
                failure.path.display(),
                failure.error.reason()
            );
        }
        eprintln!();
    }
}

fn colored_count(count: usize, color: Color) -> ColoredString {
    if count == 0 {
        count.to_string().normal()
    } else {
        count.to_string().color(color)
    }
}

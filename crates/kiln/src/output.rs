//! Terminal output utilities
//!
//! Status lines for the user. Diagnostics go through `tracing` on stderr
//! instead.

use console::style;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a labelled value, with labels padded to line up
pub fn kv(key: &str, value: &str) {
    println!("  {:<16} {}", style(format!("{}:", key)).dim(), value);
}

/// Print numbered commands the user can copy, under a heading
pub fn next_steps(steps: &[String]) {
    if steps.is_empty() {
        return;
    }
    println!("\n{}", style("Next steps").bold());
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {}", i + 1, style(step).cyan());
    }
}

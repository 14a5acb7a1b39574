//! Shared CLI output helpers.
//!
//! Status messages go to stderr: during `load`, stdout is an env stream
//! that the calling hook evaluates. Color follows `console`'s detection,
//! which honours NO_COLOR and non-tty output.
//!
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: hints, keys

use console::style;

/// Print a success message with checkmark.
///
/// Example: `✓ loaded 1 ssh key`
pub fn success(msg: &str) {
    eprintln!("{} {}", style("✓").green(), msg);
}

/// Print an error message.
///
/// Example: `✗ bucket "x" not found`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}

/// Print a warning message.
pub fn warn(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow(), msg);
}

/// Print a hint message.
///
/// Example: `→ pass --store-dir or build with --features aws`
pub fn hint(msg: &str) {
    eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
}

/// Print a bold section header to stdout.
pub fn header(title: &str) {
    println!("{}", style(title).bold());
}

/// Print a list item with bullet to stdout.
pub fn list_item(item: &str) {
    println!("  • {}", style(item).cyan());
}

/// `n` followed by `singular` or its plural.
pub fn count(n: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { plural })
}

//! Formatting functions for UI output.
//!
//! Machine-readable values (versions) go to stdout unstyled so they can be
//! captured by scripts; everything else is styled with `console`.

use console::style;

use crate::domain::Version;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a bare version number.
pub fn display_version(version: &Version) {
    println!("{}", version);
}

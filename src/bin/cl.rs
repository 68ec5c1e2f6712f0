//! Short alias for the `changelog` binary

use std::process::ExitCode;

fn main() -> ExitCode {
    changelog_cli::cli::run()
}

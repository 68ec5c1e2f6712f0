use std::process::ExitCode;

fn main() -> ExitCode {
    changelog_cli::cli::run()
}

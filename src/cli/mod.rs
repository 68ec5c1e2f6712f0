//! Command-line interface shared by the `changelog` and `cl` binaries

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::changelog::ChangelogFile;
use crate::config;
use crate::logging;
use crate::domain::{Category, ReleaseType};
use crate::ui::{self, TerminalPrompt};

pub mod commands;

use commands::{CommandContext, EntryOutcome, ReleaseOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "changelog",
    about = "Command line interface for managing CHANGELOG.md files"
)]
pub struct Cli {
    #[arg(short, long, help = "Print version information")]
    pub version: bool,

    #[arg(long, global = true, help = "Changelog file to operate on")]
    pub file: Option<PathBuf>,

    #[arg(long, global = true, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Show debug logging on stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create CHANGELOG.md with some basic documentation
    Init,
    /// Add a line to the NEW section
    New { message: String },
    /// Add a line to the CHANGES section
    Change { message: String },
    /// Add a line to the FIXES section
    Fix { message: String },
    /// Add a line to the BREAKS section
    #[command(alias = "break")]
    Breaks { message: String },
    /// Cut a release and update the changelog accordingly
    Release(ReleaseArgs),
    /// Print the suggested next version based on the pending changes
    Suggest,
    /// Print the current version based on the changelog
    Current,
}

#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub bump: BumpFlags,

    #[arg(long, help = "Skip the confirmation prompt")]
    pub yes: bool,
}

/// Mutually exclusive release type flags; none given means `--suggest`
#[derive(Args, Debug, Clone, PartialEq, Default)]
#[group(multiple = false)]
pub struct BumpFlags {
    #[arg(long, help = "Bump the patch version")]
    pub patch: bool,

    #[arg(long, help = "Bump the minor version")]
    pub minor: bool,

    #[arg(long, help = "Bump the major version")]
    pub major: bool,

    #[arg(long, help = "Derive the bump from the pending entries (default)")]
    pub suggest: bool,
}

impl BumpFlags {
    pub fn release_type(&self) -> ReleaseType {
        if self.patch {
            ReleaseType::Patch
        } else if self.minor {
            ReleaseType::Minor
        } else if self.major {
            ReleaseType::Major
        } else {
            ReleaseType::Suggest
        }
    }
}

impl Cli {
    /// Run the parsed command against the terminal
    pub fn execute(self) -> Result<()> {
        if self.version {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }

        let Some(command) = self.command else {
            Cli::command().print_help()?;
            return Ok(());
        };

        let config = config::load_config(self.config.as_deref())?;
        let file = ChangelogFile::new(self.file.unwrap_or_else(|| config.file.clone()));
        let mut prompt = TerminalPrompt;
        let mut ctx = CommandContext {
            file,
            config,
            prompt: &mut prompt,
            today: chrono::Local::now().date_naive(),
        };

        match command {
            Command::Init => {
                ui::display_status("Initializing Changelog");
                let outcome = commands::init(&mut ctx)?;
                ui::display_success(&outcome);
            }
            Command::New { message } => record_entry(&mut ctx, Category::New, &message)?,
            Command::Change { message } => record_entry(&mut ctx, Category::Change, &message)?,
            Command::Fix { message } => record_entry(&mut ctx, Category::Fix, &message)?,
            Command::Breaks { message } => record_entry(&mut ctx, Category::Break, &message)?,
            Command::Release(args) => {
                let release_type = args.bump.release_type();
                match commands::release(&mut ctx, release_type, args.yes)? {
                    ReleaseOutcome::Released(version) => {
                        ui::display_success(&format!("Released version {}", version))
                    }
                    ReleaseOutcome::Cancelled(_) => println!("Release cancelled."),
                    ReleaseOutcome::Initialized => ui::display_success(&format!(
                        "Created {}; add entries before releasing",
                        ctx.file.path().display()
                    )),
                    ReleaseOutcome::Declined => ui::display_status("Nothing released"),
                }
            }
            Command::Suggest => {
                if let Some(version) = commands::suggest(&ctx)? {
                    ui::display_version(&version);
                }
            }
            Command::Current => {
                if let Some(version) = commands::current(&ctx)? {
                    ui::display_version(&version);
                }
            }
        }

        Ok(())
    }
}

/// Entry point shared by both binaries
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn record_entry(ctx: &mut CommandContext<'_>, category: Category, message: &str) -> Result<()> {
    match commands::add_entry(ctx, category, message)? {
        EntryOutcome::Added => {}
        EntryOutcome::AddedToNewChangelog => ui::display_success(&format!(
            "Created {} and added the entry",
            ctx.file.path().display()
        )),
        EntryOutcome::Declined => ui::display_status("Nothing recorded"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("changelog").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_entry_commands() {
        let cli = parse(&["fix", "handle empty files"]);
        assert_eq!(
            cli.command,
            Some(Command::Fix {
                message: "handle empty files".to_string()
            })
        );

        let cli = parse(&["break", "alias works"]);
        assert_eq!(
            cli.command,
            Some(Command::Breaks {
                message: "alias works".to_string()
            })
        );
    }

    #[test]
    fn test_release_defaults_to_suggest() {
        let cli = parse(&["release"]);
        match cli.command {
            Some(Command::Release(args)) => {
                assert_eq!(args.bump.release_type(), ReleaseType::Suggest);
                assert!(!args.yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_release_flags() {
        let cli = parse(&["release", "--minor", "--yes"]);
        match cli.command {
            Some(Command::Release(args)) => {
                assert_eq!(args.bump.release_type(), ReleaseType::Minor);
                assert!(args.yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_release_flags_are_exclusive() {
        let result = Cli::try_parse_from(["changelog", "release", "--major", "--patch"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_options() {
        let cli = parse(&["current", "--file", "docs/CHANGES.md", "--verbose"]);
        assert_eq!(cli.file, Some(PathBuf::from("docs/CHANGES.md")));
        assert!(cli.verbose);
        assert_eq!(cli.command, Some(Command::Current));
    }

    #[test]
    fn test_short_version_flag() {
        assert!(parse(&["-v"]).version);
        assert!(parse(&["--version"]).version);
    }
}

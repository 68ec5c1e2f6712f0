//! Command handlers
//!
//! Each handler runs one CLI command against a [`CommandContext`] and returns
//! what happened; printing is left to the caller. A missing changelog is
//! recovered here by offering to create it.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::changelog::ChangelogFile;
use crate::config::Config;
use crate::domain::{Category, ReleaseType, Version};
use crate::error::ChangelogError;
use crate::ui::Prompt;

/// Everything a command needs to run
pub struct CommandContext<'a> {
    pub file: ChangelogFile,
    pub config: Config,
    pub prompt: &'a mut dyn Prompt,
    pub today: NaiveDate,
}

/// Result of adding an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Added,
    /// The file was missing and had to be created first
    AddedToNewChangelog,
    /// The file was missing and the user declined to create it
    Declined,
}

/// Result of the release command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Released(Version),
    /// The user did not confirm the proposed version
    Cancelled(Version),
    /// The file was missing; it was created but nothing was released
    Initialized,
    /// The file was missing and the user declined to create it
    Declined,
}

fn missing_file_question(file: &ChangelogFile) -> String {
    let name = file
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.path().display().to_string());
    format!("No {} Found, do you want to create one?", name)
}

/// Ask whether to create the missing changelog and create it if so.
///
/// Returns `true` when the file now exists.
fn offer_to_create(ctx: &mut CommandContext<'_>) -> Result<bool> {
    let create = ctx.config.behavior.auto_init
        || ctx.prompt.confirm(&missing_file_question(&ctx.file))?;
    if !create {
        debug!("user declined to create the changelog");
        return Ok(false);
    }

    ctx.file.initialize(&ctx.config.template, ctx.today)?;
    Ok(true)
}

/// `init`: create the changelog from the template
pub fn init(ctx: &mut CommandContext<'_>) -> Result<String> {
    Ok(ctx.file.initialize(&ctx.config.template, ctx.today)?)
}

/// `new` / `change` / `fix` / `breaks`: append one entry
pub fn add_entry(
    ctx: &mut CommandContext<'_>,
    category: Category,
    message: &str,
) -> Result<EntryOutcome> {
    match ctx.file.add_entry(category, message) {
        Ok(()) => Ok(EntryOutcome::Added),
        Err(e) if e.is_missing_changelog() => {
            if !offer_to_create(ctx)? {
                return Ok(EntryOutcome::Declined);
            }
            ctx.file.add_entry(category, message)?;
            Ok(EntryOutcome::AddedToNewChangelog)
        }
        Err(e) => Err(e.into()),
    }
}

/// `release`: compute the next version, confirm unless `auto_confirm`, cut it.
///
/// A missing changelog is created on request but nothing is released, since
/// a fresh file has no pending entries.
pub fn release(
    ctx: &mut CommandContext<'_>,
    release_type: ReleaseType,
    auto_confirm: bool,
) -> Result<ReleaseOutcome> {
    let version = match ctx.file.next_version(release_type) {
        Ok(version) => version,
        Err(e) if e.is_missing_changelog() => {
            return Ok(if offer_to_create(ctx)? {
                ReleaseOutcome::Initialized
            } else {
                ReleaseOutcome::Declined
            });
        }
        Err(e) => return Err(e.into()),
    };

    if !auto_confirm {
        let question = format!("Planning on releasing version {}. Proceed?", version);
        if !ctx.prompt.confirm(&question)? {
            return Ok(ReleaseOutcome::Cancelled(version));
        }
    }

    let released = ctx.file.cut_release(release_type, ctx.today)?;
    Ok(ReleaseOutcome::Released(released))
}

/// `suggest`: next version from pending entries; `None` when there is no file
pub fn suggest(ctx: &CommandContext<'_>) -> Result<Option<Version>> {
    quiet_when_missing(ctx.file.next_version(ReleaseType::Suggest))
}

/// `current`: latest released version; `None` when there is no file
pub fn current(ctx: &CommandContext<'_>) -> Result<Option<Version>> {
    quiet_when_missing(ctx.file.current_version())
}

fn quiet_when_missing(result: crate::error::Result<Version>) -> Result<Option<Version>> {
    match result {
        Ok(version) => Ok(Some(version)),
        Err(ChangelogError::DoesNotExist { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

//! File boundary: load CHANGELOG.md, apply a document transform, write it back.
//!
//! Every operation reads the whole file and rewrites it wholesale. There is
//! no locking; concurrent invocations on the same file can lose updates.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::config::TemplateConfig;
use crate::domain::{Category, ChangelogDocument, ReleaseType, Version};
use crate::error::{ChangelogError, Result};

/// A changelog file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogFile {
    path: PathBuf,
}

impl ChangelogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ChangelogFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file; `DoesNotExist` when it is missing
    pub fn load(&self) -> Result<ChangelogDocument> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ChangelogError::does_not_exist(&self.path),
            _ => ChangelogError::Io(e),
        })?;
        debug!(path = %self.path.display(), bytes = content.len(), "changelog loaded");
        Ok(ChangelogDocument::parse(&content))
    }

    /// Overwrite the file with the rendered document
    pub fn save(&self, doc: &ChangelogDocument) -> Result<()> {
        let content = doc.render();
        fs::write(&self.path, &content)?;
        debug!(path = %self.path.display(), bytes = content.len(), "changelog written");
        Ok(())
    }

    /// Create the file from the template; fails if it already exists.
    ///
    /// Returns a confirmation message for the user.
    #[instrument(skip(self, template), fields(path = %self.path.display()))]
    pub fn initialize(&self, template: &TemplateConfig, today: NaiveDate) -> Result<String> {
        let doc = ChangelogDocument::template(&template.title, template.initial_version()?, today);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => ChangelogError::already_exists(&self.path),
                _ => ChangelogError::Io(e),
            })?;
        file.write_all(doc.render().as_bytes())?;

        info!("changelog created");
        Ok(format!("Created {}", self.path.display()))
    }

    /// Append `message` under the Unreleased subsection for `category`
    #[instrument(skip(self, message), fields(path = %self.path.display()))]
    pub fn add_entry(&self, category: Category, message: &str) -> Result<()> {
        let mut doc = self.load()?;
        doc.add_entry(category, message)?;
        self.save(&doc)?;
        info!("entry recorded");
        Ok(())
    }

    /// Version the next release would get, without changing the file
    pub fn next_version(&self, release_type: ReleaseType) -> Result<Version> {
        let doc = self.load()?;
        let version = doc.next_version(release_type)?;
        debug!(%release_type, baseline = %doc.baseline(), next = %version, "next version computed");
        Ok(version)
    }

    /// Promote the Unreleased section to a release dated `today`.
    ///
    /// Returns the version that was released.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn cut_release(&self, release_type: ReleaseType, today: NaiveDate) -> Result<Version> {
        let mut doc = self.load()?;
        if !doc.has_pending_entries() {
            debug!("releasing without pending entries");
        }

        let version = doc.next_version(release_type)?;
        doc.cut_release(version, today);
        self.save(&doc)?;

        info!(%version, "release cut");
        Ok(version)
    }

    /// Most recently released version, `0.0.0` when nothing was released yet
    pub fn current_version(&self) -> Result<Version> {
        Ok(self.load()?.baseline())
    }
}

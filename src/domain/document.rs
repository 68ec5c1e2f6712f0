//! In-memory changelog document and the pure transforms applied to it.
//!
//! All file I/O lives in [`crate::changelog`]; everything here works on
//! values so it can be tested without touching the disk.

use chrono::NaiveDate;
use tracing::debug;

use crate::boundary::DocumentWarning;
use crate::domain::category::Category;
use crate::domain::parser::{self, Line, LineKind};
use crate::domain::version::{ReleaseType, Version, VersionBump};
use crate::error::{ChangelogError, Result};

const UNRELEASED_HEADING: &str = "## Unreleased";

/// What a `##` section represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Unreleased,
    Release {
        version: Version,
        date: Option<NaiveDate>,
    },
    /// Any other `##` heading, kept verbatim
    Other,
}

/// A `###` subsection and the lines under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    pub heading: Line,
    pub category: Option<Category>,
    pub lines: Vec<Line>,
}

impl Subsection {
    pub(crate) fn from_heading(heading: Line, category: Option<Category>) -> Self {
        Subsection {
            heading,
            category,
            lines: Vec::new(),
        }
    }

    /// Bullet entries, without their markers
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|line| line.kind == LineKind::Bullet)
            .map(Line::content)
    }

    fn insert_entry(&mut self, entry: Line) {
        // Continuation lines belong to the bullet above them, so append after
        // the last non-blank line rather than the last bullet.
        let position = self
            .lines
            .iter()
            .rposition(|line| line.kind != LineKind::Blank)
            .map_or(0, |i| i + 1);
        self.lines.insert(position, entry);
    }

    fn take_trailing_blanks(&mut self) -> Vec<Line> {
        take_trailing_blanks(&mut self.lines)
    }
}

/// A `##` section: heading, free text before the first subsection, subsections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: Line,
    pub kind: SectionKind,
    pub intro: Vec<Line>,
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub(crate) fn from_heading(heading: Line, kind: SectionKind) -> Self {
        Section {
            heading,
            kind,
            intro: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Bullet entries recorded under the given category
    pub fn entries(&self, category: Category) -> Vec<&str> {
        self.subsections
            .iter()
            .filter(|sub| sub.category == Some(category))
            .flat_map(|sub| sub.entries())
            .collect()
    }

    /// True when any known category holds a bullet entry
    pub fn has_entries(&self) -> bool {
        Category::ALL
            .into_iter()
            .any(|category| !self.entries(category).is_empty())
    }

    fn subsection_index(&mut self, category: Category, eol: &str) -> usize {
        if let Some(index) = self
            .subsections
            .iter()
            .position(|sub| sub.category == Some(category))
        {
            return index;
        }

        let insert_at = self
            .subsections
            .iter()
            .position(|sub| sub.category.is_some_and(|c| c.rank() > category.rank()))
            .unwrap_or(self.subsections.len());

        let heading = Line::new(format!("### {}{}", category.title(), eol));
        let mut subsection = Subsection::from_heading(heading, Some(category));

        // Blank lines closing the section stay at the end of the section
        if insert_at == self.subsections.len() {
            subsection.lines = match self.subsections.last_mut() {
                Some(last) => last.take_trailing_blanks(),
                None => take_trailing_blanks(&mut self.intro),
            };
        }

        debug!(subsection = category.title(), "adding missing subsection");
        self.subsections.insert(insert_at, subsection);
        insert_at
    }

    fn lines(&self) -> impl Iterator<Item = &Line> {
        std::iter::once(&self.heading)
            .chain(self.intro.iter())
            .chain(self.subsections.iter().flat_map(|sub| {
                std::iter::once(&sub.heading).chain(sub.lines.iter())
            }))
    }
}

fn take_trailing_blanks(lines: &mut Vec<Line>) -> Vec<Line> {
    let keep = lines
        .iter()
        .rposition(|line| line.kind != LineKind::Blank)
        .map_or(0, |i| i + 1);
    lines.split_off(keep)
}

/// Parsed CHANGELOG.md
///
/// The first section titled `Unreleased` collects pending entries; release
/// sections follow it newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    pub preamble: Vec<Line>,
    pub sections: Vec<Section>,
    pub(crate) trailing_newline: bool,
    pub(crate) crlf: bool,
    pub(crate) warnings: Vec<DocumentWarning>,
}

impl ChangelogDocument {
    pub(crate) fn empty(trailing_newline: bool) -> Self {
        ChangelogDocument {
            preamble: Vec::new(),
            sections: Vec::new(),
            trailing_newline,
            crlf: false,
            warnings: Vec::new(),
        }
    }

    /// Parse document text. See [`parser::parse`].
    pub fn parse(content: &str) -> Self {
        parser::parse(content)
    }

    /// Fresh document: title, short description, empty Unreleased section
    /// and an initial release dated `date`.
    pub fn template(title: &str, initial_version: Version, date: NaiveDate) -> Self {
        let mut text = format!(
            "# {}\n\
             \n\
             All notable changes to this project are recorded in this file.\n\
             Pending entries live under Unreleased until a release is cut; versions follow Semantic Versioning.\n\
             \n",
            title
        );
        text.push_str(&unreleased_block());
        text.push_str(&format!("{}\n", release_heading(initial_version, date)));
        for category in Category::ALL {
            text.push_str(&format!("### {}\n", category.title()));
        }
        parser::parse(&text)
    }

    /// Warnings collected while parsing
    pub fn warnings(&self) -> &[DocumentWarning] {
        &self.warnings
    }

    /// The pending section, if the document has one
    pub fn unreleased(&self) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.kind == SectionKind::Unreleased)
    }

    /// Pending entries of one category
    pub fn pending_entries(&self, category: Category) -> Vec<&str> {
        self.unreleased()
            .map(|section| section.entries(category))
            .unwrap_or_default()
    }

    /// True when the Unreleased section holds at least one entry
    pub fn has_pending_entries(&self) -> bool {
        self.unreleased().is_some_and(Section::has_entries)
    }

    /// Most recent released version: the topmost section with a parsed version
    pub fn current_version(&self) -> Option<Version> {
        self.sections.iter().find_map(|section| match section.kind {
            SectionKind::Release { version, .. } => Some(version),
            _ => None,
        })
    }

    /// Version the next release is computed from; `0.0.0` without releases
    pub fn baseline(&self) -> Version {
        self.current_version().unwrap_or_default()
    }

    /// Bump implied by the pending entries, `None` when nothing is pending
    pub fn suggested_bump(&self) -> Option<VersionBump> {
        let has = |category| !self.pending_entries(category).is_empty();

        if has(Category::Break) {
            Some(VersionBump::Major)
        } else if has(Category::Change) || has(Category::New) {
            Some(VersionBump::Minor)
        } else if has(Category::Fix) {
            Some(VersionBump::Patch)
        } else {
            None
        }
    }

    /// Version the next release would get; fails when the bump overflows
    pub fn next_version(&self, release_type: ReleaseType) -> Result<Version> {
        let bump = release_type
            .forced_bump()
            .or_else(|| self.suggested_bump());
        self.baseline().bump_opt(bump)
    }

    /// Append a bullet to the matching Unreleased subsection.
    ///
    /// Missing subsection headers (and a missing Unreleased section) are
    /// created; every other line is left untouched.
    pub fn add_entry(&mut self, category: Category, message: &str) -> Result<()> {
        let message = normalize_message(message)?;
        let section_index = self.ensure_unreleased();
        let eol = self.eol();

        let section = &mut self.sections[section_index];
        let sub_index = section.subsection_index(category, eol);
        section.subsections[sub_index].insert_entry(Line::new(format!("- {}{}", message, eol)));

        debug!(%category, "entry added to unreleased section");
        Ok(())
    }

    /// Turn the Unreleased section into release `version` dated `date` and
    /// open a fresh, empty Unreleased section above it.
    pub fn cut_release(&mut self, version: Version, date: NaiveDate) {
        let index = self.ensure_unreleased();
        let eol = self.eol();

        let section = &mut self.sections[index];
        section.heading = Line::new(format!("{}{}", release_heading(version, date), eol));
        section.kind = SectionKind::Release {
            version,
            date: Some(date),
        };

        let fresh = self.fresh_unreleased();
        self.sections.insert(index, fresh);
        debug!(%version, "release section cut");
    }

    /// Serialize back to Markdown
    pub fn render(&self) -> String {
        let mut lines = self
            .preamble
            .iter()
            .chain(self.sections.iter().flat_map(|section| section.lines()))
            .map(|line| line.raw.as_str())
            .peekable();

        let mut out = String::new();
        while let Some(raw) = lines.next() {
            out.push_str(raw);
            if lines.peek().is_some() || self.trailing_newline {
                out.push('\n');
            }
        }
        out
    }

    fn eol(&self) -> &'static str {
        if self.crlf {
            "\r"
        } else {
            ""
        }
    }

    fn fresh_unreleased(&self) -> Section {
        let eol = self.eol();
        let mut section = Section::from_heading(
            Line::new(format!("{}{}", UNRELEASED_HEADING, eol)),
            SectionKind::Unreleased,
        );
        for category in Category::ALL {
            let heading = Line::new(format!("### {}{}", category.title(), eol));
            section
                .subsections
                .push(Subsection::from_heading(heading, Some(category)));
        }
        if let Some(last) = section.subsections.last_mut() {
            last.lines.push(Line::new(eol));
        }
        section
    }

    fn ensure_unreleased(&mut self) -> usize {
        if let Some(index) = self
            .sections
            .iter()
            .position(|section| section.kind == SectionKind::Unreleased)
        {
            return index;
        }

        debug!("no unreleased section, creating one");
        let section = self.fresh_unreleased();
        self.sections.insert(0, section);
        0
    }
}

fn release_heading(version: Version, date: NaiveDate) -> String {
    format!("## v{} - {}", version, date.format("%Y-%m-%d"))
}

fn unreleased_block() -> String {
    let mut block = format!("{}\n", UNRELEASED_HEADING);
    for category in Category::ALL {
        block.push_str(&format!("### {}\n", category.title()));
    }
    block.push('\n');
    block
}

fn normalize_message(message: &str) -> Result<String> {
    let folded = message
        .lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if folded.is_empty() {
        return Err(ChangelogError::invalid_entry("message must not be empty"));
    }
    Ok(folded)
}

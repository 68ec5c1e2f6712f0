//! Line-classification parser for CHANGELOG.md
//!
//! Every line is classified once, then a small state machine
//! (preamble -> section -> subsection) folds the lines into a
//! [`ChangelogDocument`]. Raw line text is kept on every node so that
//! rendering an unedited document reproduces the input exactly.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, warn};

use crate::boundary::DocumentWarning;
use crate::domain::category::Category;
use crate::domain::document::{ChangelogDocument, Section, SectionKind, Subsection};
use crate::domain::version::Version;

/// Classification of a single Markdown line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    SectionHeader,
    SubsectionHeader,
    Bullet,
    Blank,
    Text,
}

impl LineKind {
    /// Classify a raw line; trailing whitespace (including `\r`) is ignored
    pub fn classify(raw: &str) -> Self {
        let line = raw.trim_end();
        if line.is_empty() {
            LineKind::Blank
        } else if line.starts_with("### ") || line == "###" {
            LineKind::SubsectionHeader
        } else if line.starts_with("## ") || line == "##" {
            LineKind::SectionHeader
        } else if line.starts_with("# ") || line == "#" {
            LineKind::Title
        } else if line.starts_with("- ") || line.starts_with("* ") {
            LineKind::Bullet
        } else {
            LineKind::Text
        }
    }
}

/// A raw line together with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub raw: String,
    pub kind: LineKind,
}

impl Line {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = LineKind::classify(&raw);
        Line { raw, kind }
    }

    /// Text after the heading or bullet marker, trimmed
    pub fn content(&self) -> &str {
        let line = self.raw.trim();
        let stripped = match self.kind {
            LineKind::Title => line.strip_prefix('#'),
            LineKind::SectionHeader => line.strip_prefix("##"),
            LineKind::SubsectionHeader => line.strip_prefix("###"),
            LineKind::Bullet => line.strip_prefix('-').or_else(|| line.strip_prefix('*')),
            LineKind::Blank | LineKind::Text => None,
        };
        stripped.unwrap_or(line).trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Preamble,
    Section,
    Subsection,
}

/// Parse changelog text into a document tree.
///
/// Parsing is permissive: malformed structure never fails, it is recorded as
/// [`DocumentWarning`]s on the returned document.
pub fn parse(content: &str) -> ChangelogDocument {
    let (body, trailing_newline) = match content.strip_suffix('\n') {
        Some(body) => (body, true),
        None => (content, false),
    };

    let mut doc = ChangelogDocument::empty(trailing_newline);
    // Inserted lines follow whichever line ending most lines use
    let terminated = content.matches('\n').count();
    doc.crlf = content.matches("\r\n").count() * 2 > terminated;

    if content.is_empty() {
        return doc;
    }

    let mut state = State::Preamble;
    let mut seen_unreleased = false;
    let mut last_release: Option<Version> = None;

    for (index, raw) in body.split('\n').enumerate() {
        let line_no = index + 1;
        let line = Line::new(raw);

        match (state, line.kind) {
            (_, LineKind::SectionHeader) => {
                let kind = classify_section(&line, line_no, &mut doc.warnings);
                match kind {
                    SectionKind::Unreleased => {
                        if seen_unreleased {
                            doc.warnings
                                .push(DocumentWarning::DuplicateUnreleased { line: line_no });
                        } else if last_release.is_some() {
                            doc.warnings
                                .push(DocumentWarning::UnreleasedNotFirst { line: line_no });
                        }
                        seen_unreleased = true;
                    }
                    SectionKind::Release { version, .. } => {
                        if let Some(previous) = last_release {
                            if version > previous {
                                doc.warnings.push(DocumentWarning::VersionsOutOfOrder {
                                    line: line_no,
                                    previous,
                                    found: version,
                                });
                            }
                        }
                        last_release = Some(version);
                    }
                    SectionKind::Other => {}
                }
                doc.sections.push(Section::from_heading(line, kind));
                state = State::Section;
            }
            (State::Preamble, _) => doc.preamble.push(line),
            (State::Section | State::Subsection, LineKind::SubsectionHeader) => {
                let category = Category::from_title(line.content());
                // Sections that are neither Unreleased nor a release hold free-form notes
                if let Some(section) = doc.sections.last_mut() {
                    if category.is_none() && section.kind != SectionKind::Other {
                        doc.warnings.push(DocumentWarning::UnknownSubsection {
                            line: line_no,
                            title: line.content().to_string(),
                        });
                    }
                    section
                        .subsections
                        .push(Subsection::from_heading(line, category));
                }
                state = State::Subsection;
            }
            (State::Section, _) => {
                if let Some(section) = doc.sections.last_mut() {
                    section.intro.push(line);
                }
            }
            (State::Subsection, _) => {
                if let Some(subsection) = doc
                    .sections
                    .last_mut()
                    .and_then(|section| section.subsections.last_mut())
                {
                    subsection.lines.push(line);
                }
            }
        }
    }

    for warning in &doc.warnings {
        warn!(line = warning.line(), %warning, "changelog structure warning");
    }
    debug!(
        sections = doc.sections.len(),
        warnings = doc.warnings.len(),
        "changelog parsed"
    );

    doc
}

fn release_heading_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[vV]?(\d+\.\d+\.\d+)(?:\s+-\s+(\d{4}-\d{2}-\d{2}))?$").ok()
    })
    .as_ref()
}

fn looks_like_release(title: &str) -> bool {
    let mut chars = title.chars();
    match chars.next() {
        Some('v' | 'V') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        Some(c) => c.is_ascii_digit(),
        None => false,
    }
}

fn classify_section(line: &Line, line_no: usize, warnings: &mut Vec<DocumentWarning>) -> SectionKind {
    let title = line.content();

    if title.eq_ignore_ascii_case("unreleased") {
        return SectionKind::Unreleased;
    }

    let captures = release_heading_regex().and_then(|re| re.captures(title));
    let parsed = captures.and_then(|caps| {
        let version = Version::parse(caps.get(1)?.as_str()).ok()?;
        let date = caps
            .get(2)
            .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok());
        Some(SectionKind::Release { version, date })
    });

    match parsed {
        Some(kind) => kind,
        None => {
            if looks_like_release(title) {
                warnings.push(DocumentWarning::UnparsableVersionHeading {
                    line: line_no,
                    heading: line.raw.trim_end().to_string(),
                });
            }
            SectionKind::Other
        }
    }
}

use std::fmt;

use crate::domain::Version;

/// Irregularities found while parsing a hand-edited changelog.
/// These are non-fatal: parsing keeps going and the user is told about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentWarning {
    /// More than one Unreleased section; only the first is edited
    DuplicateUnreleased { line: usize },
    /// Unreleased section appears after a released version
    UnreleasedNotFirst { line: usize },
    /// A release is newer than the release above it
    VersionsOutOfOrder {
        line: usize,
        previous: Version,
        found: Version,
    },
    /// Heading looks like a release but the version cannot be read
    UnparsableVersionHeading { line: usize, heading: String },
    /// Subsection title is not one of New, Changes, Fixes, Breaks
    UnknownSubsection { line: usize, title: String },
}

impl DocumentWarning {
    /// One-based line number the warning points at
    pub fn line(&self) -> usize {
        match self {
            DocumentWarning::DuplicateUnreleased { line }
            | DocumentWarning::UnreleasedNotFirst { line }
            | DocumentWarning::VersionsOutOfOrder { line, .. }
            | DocumentWarning::UnparsableVersionHeading { line, .. }
            | DocumentWarning::UnknownSubsection { line, .. } => *line,
        }
    }
}

impl fmt::Display for DocumentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentWarning::DuplicateUnreleased { line } => {
                write!(
                    f,
                    "line {}: duplicate Unreleased section (only the first one is used)",
                    line
                )
            }
            DocumentWarning::UnreleasedNotFirst { line } => {
                write!(
                    f,
                    "line {}: Unreleased section should come before released versions",
                    line
                )
            }
            DocumentWarning::VersionsOutOfOrder {
                line,
                previous,
                found,
            } => {
                write!(
                    f,
                    "line {}: version {} is listed below older version {}",
                    line, found, previous
                )
            }
            DocumentWarning::UnparsableVersionHeading { line, heading } => {
                write!(f, "line {}: cannot read version from '{}'", line, heading)
            }
            DocumentWarning::UnknownSubsection { line, title } => {
                write!(f, "line {}: unknown subsection '{}'", line, title)
            }
        }
    }
}

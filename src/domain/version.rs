use crate::error::{ChangelogError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Ordering compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version such as "v1.2.3" or "1.2.3"
    ///
    /// Pre-release and build metadata are rejected: changelog headings only
    /// carry plain `MAJOR.MINOR.PATCH`.
    pub fn parse(text: &str) -> Result<Self> {
        let clean = text.trim().trim_start_matches(['v', 'V']);

        let parsed = semver::Version::parse(clean).map_err(|e| {
            ChangelogError::version(format!("Invalid version '{}': {}", text.trim(), e))
        })?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(ChangelogError::version(format!(
                "Invalid version '{}' - expected X.Y.Z without suffixes",
                text.trim()
            )));
        }

        Ok(Version::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Bump version according to bump type
    ///
    /// Fails instead of wrapping when the bumped component would overflow.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let next = |component: u64, name: &str| {
            component.checked_add(1).ok_or_else(|| {
                ChangelogError::version(format!(
                    "Bumping the {} version of {} overflows",
                    name, self
                ))
            })
        };

        Ok(match bump_type {
            VersionBump::Major => Version {
                major: next(self.major, "major")?,
                minor: 0,
                patch: 0,
            },
            VersionBump::Minor => Version {
                major: self.major,
                minor: next(self.minor, "minor")?,
                patch: 0,
            },
            VersionBump::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: next(self.patch, "patch")?,
            },
        })
    }

    /// Apply an optional bump; `None` keeps the version unchanged
    pub fn bump_opt(&self, bump_type: Option<VersionBump>) -> Result<Self> {
        match bump_type {
            Some(bump) => self.bump(bump),
            None => Ok(*self),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
}

/// Release type requested by the user
///
/// `Suggest` derives the bump from the pending entries instead of forcing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseType {
    Patch,
    Minor,
    Major,
    #[default]
    Suggest,
}

impl ReleaseType {
    /// The forced bump, or `None` for `Suggest`
    pub fn forced_bump(self) -> Option<VersionBump> {
        match self {
            ReleaseType::Patch => Some(VersionBump::Patch),
            ReleaseType::Minor => Some(VersionBump::Minor),
            ReleaseType::Major => Some(VersionBump::Major),
            ReleaseType::Suggest => None,
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseType::Patch => "patch",
            ReleaseType::Minor => "minor",
            ReleaseType::Major => "major",
            ReleaseType::Suggest => "suggest",
        };
        f.write_str(name)
    }
}

//! Domain logic - the changelog document model, independent of file I/O

pub mod category;
pub mod document;
pub mod parser;
pub mod version;

pub use category::Category;
pub use document::{ChangelogDocument, Section, SectionKind, Subsection};
pub use parser::{Line, LineKind};
pub use version::{ReleaseType, Version, VersionBump};

use std::fmt;

/// Kind of pending change, one per subsection of a changelog section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    New,
    Change,
    Fix,
    Break,
}

impl Category {
    /// All categories in the order their subsections appear
    pub const ALL: [Category; 4] = [
        Category::New,
        Category::Change,
        Category::Fix,
        Category::Break,
    ];

    /// Subsection title used in the Markdown file
    pub fn title(self) -> &'static str {
        match self {
            Category::New => "New",
            Category::Change => "Changes",
            Category::Fix => "Fixes",
            Category::Break => "Breaks",
        }
    }

    /// Map a subsection title back to its category (case-insensitive)
    pub fn from_title(title: &str) -> Option<Self> {
        let title = title.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.title().eq_ignore_ascii_case(title))
    }

    /// Position in the canonical subsection order
    pub fn rank(self) -> usize {
        match self {
            Category::New => 0,
            Category::Change => 1,
            Category::Fix => 2,
            Category::Break => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::New => "new",
            Category::Change => "change",
            Category::Fix => "fix",
            Category::Break => "break",
        };
        f.write_str(name)
    }
}

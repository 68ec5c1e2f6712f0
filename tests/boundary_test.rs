use changelog_cli::boundary::DocumentWarning;
use changelog_cli::domain::{Category, ChangelogDocument, ReleaseType, Version};

fn hand_edited() -> ChangelogDocument {
    ChangelogDocument::parse(include_str!("fixtures/hand_edited.md"))
}

// ============================================================================
// Warnings collected from a hand-edited file
// ============================================================================

#[test]
fn test_hand_edited_file_reports_every_problem() {
    let doc = hand_edited();
    assert_eq!(
        doc.warnings(),
        [
            DocumentWarning::UnknownSubsection {
                line: 8,
                title: "Misc".to_string(),
            },
            DocumentWarning::DuplicateUnreleased { line: 15 },
            DocumentWarning::VersionsOutOfOrder {
                line: 19,
                previous: Version::new(1, 1, 0),
                found: Version::new(1, 2, 0),
            },
        ]
    );
}

#[test]
fn test_warning_messages_name_the_line() {
    for warning in hand_edited().warnings() {
        let message = warning.to_string();
        assert!(
            message.starts_with(&format!("line {}:", warning.line())),
            "Message should start with its line number, got: {}",
            message
        );
    }
}

// ============================================================================
// Permissive behavior: warnings never block operations
// ============================================================================

#[test]
fn test_first_unreleased_section_is_used() {
    let doc = hand_edited();
    assert_eq!(doc.pending_entries(Category::New), vec!["dark mode"]);
    assert!(doc.pending_entries(Category::Fix).is_empty());
    // Unknown subsections never count towards the bump
    assert_eq!(doc.next_version(ReleaseType::Suggest).unwrap(), Version::new(1, 2, 0));
}

#[test]
fn test_topmost_release_is_current_even_when_out_of_order() {
    assert_eq!(hand_edited().current_version(), Some(Version::new(1, 1, 0)));
}

#[test]
fn test_editing_preserves_hand_written_content() {
    let text = include_str!("fixtures/hand_edited.md");
    let mut doc = ChangelogDocument::parse(text);
    doc.add_entry(Category::New, "light mode").unwrap();

    assert_eq!(
        doc.render(),
        text.replacen("- dark mode\n", "- dark mode\n- light mode\n", 1)
    );
}

#[test]
fn test_clean_file_has_no_warnings() {
    let doc = ChangelogDocument::parse(
        "# Changelog\n## Unreleased\n### New\n\n## v2.0.0 - 2024-02-01\n### Breaks\n- x\n\n## v1.0.0 - 2024-01-01\n",
    );
    assert!(doc.warnings().is_empty());
}

//! Declaration grammar: sections, rule ordering and malformed input.

use owners::{ParseErrorKind, SectionKind, parse_declaration};

// ============================================================================
// Sections
// ============================================================================

#[test]
fn sections_keep_file_order() {
    let declaration = parse_declaration(
        "lead.go @lead\n[Backend][2]\n*.go @backend\n^[Docs]\n*.md @docs\n[Infra]\n*.tf @infra\n",
    )
    .unwrap();

    let summary: Vec<_> = declaration
        .sections()
        .iter()
        .map(|section| (section.name().to_owned(), section.kind(), section.approvals()))
        .collect();
    assert_eq!(
        summary,
        [
            ("required".to_owned(), SectionKind::Required, 1),
            ("Backend".to_owned(), SectionKind::Required, 2),
            ("Docs".to_owned(), SectionKind::Optional, 1),
            ("Infra".to_owned(), SectionKind::Required, 1),
        ]
    );
}

#[test]
fn leading_and_trailing_whitespace_is_ignored() {
    let declaration = parse_declaration("   \t[required]  \n\t  a.go    @a   @b \t\n").unwrap();
    let rule = &declaration.sections()[0].rules()[0];
    assert_eq!(rule.pattern().as_str(), "a.go");
    assert_eq!(rule.owners(), ["@a", "@b"]);
}

// ============================================================================
// Rule Ordering
// ============================================================================

#[test]
fn later_rule_in_same_section_wins() {
    let declaration = parse_declaration("*.go @general\nmain.go @main\n*.go @correction\n").unwrap();
    let (_, rule) = declaration.last_match(SectionKind::Required, "main.go").unwrap();
    assert_eq!(rule.owners(), ["@correction"]);
}

#[test]
fn earlier_rule_applies_when_later_one_does_not_match() {
    let declaration = parse_declaration("*.go @general\nmain.go @main\n").unwrap();
    let (_, rule) = declaration.last_match(SectionKind::Required, "lib.go").unwrap();
    assert_eq!(rule.owners(), ["@general"]);
}

// ============================================================================
// Malformed Input
// ============================================================================

#[test]
fn malformed_lines_report_their_line_number() {
    let cases: [(&str, usize); 4] = [
        ("[ok]\na @a\n[bad\n", 3),
        ("\n\n^nope\n", 3),
        ("a @a\n/ @root\n", 2),
        ("[x][zero]\n", 1),
    ];
    for (text, line) in cases {
        let error = parse_declaration(text).unwrap_err();
        assert_eq!(error.line(), line, "input {text:?}");
    }
}

#[test]
fn malformed_kinds_are_distinguished() {
    assert!(matches!(
        parse_declaration("[bad").unwrap_err().kind(),
        ParseErrorKind::UnrecognizedHeader(_)
    ));
    assert!(matches!(
        parse_declaration("[x][0]").unwrap_err().kind(),
        ParseErrorKind::InvalidApprovals(_)
    ));
    assert!(matches!(
        parse_declaration("./ @x").unwrap_err().kind(),
        ParseErrorKind::EmptyPattern(_)
    ));
    assert!(matches!(
        parse_declaration("a[ @x").unwrap_err().kind(),
        ParseErrorKind::InvalidPattern { .. }
    ));
}

#[test]
fn comments_and_blank_lines_never_fail() {
    let declaration = parse_declaration("# [not a header\n\n   # a[ nor a pattern\n").unwrap();
    assert!(declaration.is_empty());
}

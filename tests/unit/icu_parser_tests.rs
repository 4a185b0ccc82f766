/*!
 * Tests for the ICU message parser public API
 */

use icu_po_lint::icu::{self, is_trivial, Node};
use icu_po_lint::{ErrorKind, ParserOptions};

fn strict() -> ParserOptions {
    ParserOptions {
        ignore_tag: true,
        capture_location: true,
        requires_other_clause: true,
    }
}

/// Test that plain text and escaped braces are trivial messages
#[test]
fn test_isTrivial_withLiteralMessages_shouldBeTrue() {
    for message in ["", "Hello world", "It''s fine", "'{'literal'}'", "<b>bold</b>"] {
        let nodes = icu::parse(message, &strict()).unwrap();
        assert!(is_trivial(&nodes), "expected trivial: {:?}", message);
    }
}

/// Test that messages with arguments are not trivial
#[test]
fn test_isTrivial_withFormatting_shouldBeFalse() {
    for message in [
        "Hi {name}",
        "{n, number}",
        "{when, date, short}",
        "{n, selectordinal, one {#st} two {#nd} few {#rd} other {#th}}",
    ] {
        let nodes = icu::parse(message, &strict()).unwrap();
        assert!(!is_trivial(&nodes), "expected formatting: {:?}", message);
    }
}

/// Test a nested plural inside a select
#[test]
fn test_parse_withNestedComplexArguments_shouldBuildTree() {
    let message = "{gender, select, female {{n, plural, one {She has # cat} other {She has # cats}}} other {{n} pets}}";
    let nodes = icu::parse(message, &strict()).unwrap();

    assert_eq!(nodes.len(), 1);
    match &nodes[0] {
        Node::Select { value, options, .. } => {
            assert_eq!(value, "gender");
            assert_eq!(options.len(), 2);
            assert!(matches!(options[0].value[0], Node::Plural { .. }));
        }
        other => panic!("unexpected node: {:?}", other),
    }
}

/// Test that tags are parsed when not ignored
#[test]
fn test_parse_withTagsEnabled_shouldRejectUnclosedTag() {
    let options = ParserOptions {
        ignore_tag: false,
        ..strict()
    };
    let err = icu::parse("Click <link>here", &options).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnclosedTag);
}

/// Test that errors report a readable position
#[test]
fn test_parseError_display_shouldIncludeKindAndPosition() {
    let err = icu::parse("Hola {name", &strict()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExpectArgumentClosingBrace);
    assert!(err.to_string().starts_with("EXPECT_ARGUMENT_CLOSING_BRACE at 1:6"));
}

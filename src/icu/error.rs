/*!
 * Error kinds reported by the ICU message parser.
 *
 * The set is closed: every grammar violation the parser can detect maps to
 * exactly one `ErrorKind`, and each kind has a stable SCREAMING_SNAKE_CASE
 * identifier that users put in ignore lists.
 */

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ast::Span;

/// A category of ICU MessageFormat grammar violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Argument is not closed with `}` (e.g. `{name`)
    ExpectArgumentClosingBrace,
    /// Argument has no name (`{}`)
    EmptyArgument,
    /// Argument name is not a valid identifier (`{!}`)
    MalformedArgument,
    /// Comma after the argument name but no type (`{a,}`)
    ExpectArgumentType,
    /// Unsupported argument type (`{a, foo}`)
    InvalidArgumentType,
    /// Comma after the argument type but no style (`{a, number,}`)
    ExpectArgumentStyle,
    /// Number skeleton is empty or has empty options (`{a, number, ::}`)
    InvalidNumberSkeleton,
    /// Date or time skeleton is empty (`{a, date, ::}`)
    ExpectDateTimeSkeleton,
    /// Quote opened in an argument style is never closed
    UnclosedQuoteInArgumentStyle,
    /// Select or plural type without a comma and options
    ExpectSelectArgumentOptions,
    /// `offset:` is not followed by an integer
    ExpectPluralArgumentOffsetValue,
    /// Offset integer is out of range
    InvalidPluralArgumentOffsetValue,
    /// Select argument has no options
    ExpectSelectArgumentSelector,
    /// Plural argument has no options
    ExpectPluralArgumentSelector,
    /// Select option is missing its `{...}` body
    ExpectSelectArgumentSelectorFragment,
    /// Plural option is missing its `{...}` body
    ExpectPluralArgumentSelectorFragment,
    /// Explicit plural selector is not an integer (`=x`)
    InvalidPluralArgumentSelector,
    /// Plural selector appears twice
    DuplicatePluralArgumentSelector,
    /// Select selector appears twice
    DuplicateSelectArgumentSelector,
    /// Plural or select without the mandatory `other` option
    MissingOtherClause,
    /// Tag is malformed
    InvalidTag,
    /// Closing tag without a matching opening tag
    UnmatchedClosingTag,
    /// Opening tag is never closed
    UnclosedTag,
}

impl ErrorKind {
    /// Every error kind, in declaration order
    pub const ALL: [ErrorKind; 23] = [
        Self::ExpectArgumentClosingBrace,
        Self::EmptyArgument,
        Self::MalformedArgument,
        Self::ExpectArgumentType,
        Self::InvalidArgumentType,
        Self::ExpectArgumentStyle,
        Self::InvalidNumberSkeleton,
        Self::ExpectDateTimeSkeleton,
        Self::UnclosedQuoteInArgumentStyle,
        Self::ExpectSelectArgumentOptions,
        Self::ExpectPluralArgumentOffsetValue,
        Self::InvalidPluralArgumentOffsetValue,
        Self::ExpectSelectArgumentSelector,
        Self::ExpectPluralArgumentSelector,
        Self::ExpectSelectArgumentSelectorFragment,
        Self::ExpectPluralArgumentSelectorFragment,
        Self::InvalidPluralArgumentSelector,
        Self::DuplicatePluralArgumentSelector,
        Self::DuplicateSelectArgumentSelector,
        Self::MissingOtherClause,
        Self::InvalidTag,
        Self::UnmatchedClosingTag,
        Self::UnclosedTag,
    ];

    /// Stable identifier used in ignore lists and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpectArgumentClosingBrace => "EXPECT_ARGUMENT_CLOSING_BRACE",
            Self::EmptyArgument => "EMPTY_ARGUMENT",
            Self::MalformedArgument => "MALFORMED_ARGUMENT",
            Self::ExpectArgumentType => "EXPECT_ARGUMENT_TYPE",
            Self::InvalidArgumentType => "INVALID_ARGUMENT_TYPE",
            Self::ExpectArgumentStyle => "EXPECT_ARGUMENT_STYLE",
            Self::InvalidNumberSkeleton => "INVALID_NUMBER_SKELETON",
            Self::ExpectDateTimeSkeleton => "EXPECT_DATE_TIME_SKELETON",
            Self::UnclosedQuoteInArgumentStyle => "UNCLOSED_QUOTE_IN_ARGUMENT_STYLE",
            Self::ExpectSelectArgumentOptions => "EXPECT_SELECT_ARGUMENT_OPTIONS",
            Self::ExpectPluralArgumentOffsetValue => "EXPECT_PLURAL_ARGUMENT_OFFSET_VALUE",
            Self::InvalidPluralArgumentOffsetValue => "INVALID_PLURAL_ARGUMENT_OFFSET_VALUE",
            Self::ExpectSelectArgumentSelector => "EXPECT_SELECT_ARGUMENT_SELECTOR",
            Self::ExpectPluralArgumentSelector => "EXPECT_PLURAL_ARGUMENT_SELECTOR",
            Self::ExpectSelectArgumentSelectorFragment => "EXPECT_SELECT_ARGUMENT_SELECTOR_FRAGMENT",
            Self::ExpectPluralArgumentSelectorFragment => "EXPECT_PLURAL_ARGUMENT_SELECTOR_FRAGMENT",
            Self::InvalidPluralArgumentSelector => "INVALID_PLURAL_ARGUMENT_SELECTOR",
            Self::DuplicatePluralArgumentSelector => "DUPLICATE_PLURAL_ARGUMENT_SELECTOR",
            Self::DuplicateSelectArgumentSelector => "DUPLICATE_SELECT_ARGUMENT_SELECTOR",
            Self::MissingOtherClause => "MISSING_OTHER_CLAUSE",
            Self::InvalidTag => "INVALID_TAG",
            Self::UnmatchedClosingTag => "UNMATCHED_CLOSING_TAG",
            Self::UnclosedTag => "UNCLOSED_TAG",
        }
    }

    /// Short human readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::ExpectArgumentClosingBrace => "argument is missing its closing brace",
            Self::EmptyArgument => "argument has no name",
            Self::MalformedArgument => "argument name is malformed",
            Self::ExpectArgumentType => "expected an argument type after the comma",
            Self::InvalidArgumentType => "unknown argument type",
            Self::ExpectArgumentStyle => "expected an argument style after the comma",
            Self::InvalidNumberSkeleton => "number skeleton is invalid",
            Self::ExpectDateTimeSkeleton => "expected a date/time skeleton",
            Self::UnclosedQuoteInArgumentStyle => "quote in argument style is never closed",
            Self::ExpectSelectArgumentOptions => "expected options for select argument",
            Self::ExpectPluralArgumentOffsetValue => "expected an integer plural offset",
            Self::InvalidPluralArgumentOffsetValue => "plural offset is out of range",
            Self::ExpectSelectArgumentSelector => "select argument has no options",
            Self::ExpectPluralArgumentSelector => "plural argument has no options",
            Self::ExpectSelectArgumentSelectorFragment => "select option is missing its message",
            Self::ExpectPluralArgumentSelectorFragment => "plural option is missing its message",
            Self::InvalidPluralArgumentSelector => "explicit plural selector is not an integer",
            Self::DuplicatePluralArgumentSelector => "duplicate plural selector",
            Self::DuplicateSelectArgumentSelector => "duplicate select selector",
            Self::MissingOtherClause => "missing mandatory `other` clause",
            Self::InvalidTag => "tag is malformed",
            Self::UnmatchedClosingTag => "closing tag has no matching opening tag",
            Self::UnclosedTag => "tag is never closed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an ignore-list entry does not name a known error kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown ICU error kind: {0}")]
pub struct UnknownErrorKind(pub String);

static KINDS_BY_NAME: Lazy<HashMap<&'static str, ErrorKind>> =
    Lazy::new(|| ErrorKind::ALL.iter().map(|kind| (kind.as_str(), *kind)).collect());

impl FromStr for ErrorKind {
    type Err = UnknownErrorKind;

    // Accepts MISSING_OTHER_CLAUSE, missing_other_clause and missing-other-clause
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_uppercase();
        KINDS_BY_NAME
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| UnknownErrorKind(s.to_string()))
    }
}

/// A grammar violation found while parsing a message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {location}")]
pub struct ParseError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it went wrong
    pub location: Span,
    /// The message being parsed
    pub message: String,
}

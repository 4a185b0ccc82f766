/*!
 * ICU validation of a single (source, translation) pair.
 *
 * A source message that carries no formatting needs no checking. A source
 * message with formatting must parse, and its translation, when present,
 * must parse and must carry formatting too: a translator who replaces
 * `{count, plural, ...}` with plain text breaks pluralization at runtime.
 */

use log::trace;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::catalog::CatalogEntry;
use crate::icu::{self, ErrorKind, ParseError, ParserOptions, Span};

/// Error kinds that are never reported
pub type IgnoreSet = HashSet<ErrorKind>;

/// Reason reported when a translation drops the source's formatting
pub const MISSING_ICU_FORMATTING: &str = "missing ICU formatting";

/// Options every message is parsed with
const PARSER_OPTIONS: ParserOptions = ParserOptions {
    ignore_tag: true,
    capture_location: true,
    requires_other_clause: true,
};

/// Which half of the entry a finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Translation,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Translation => write!(f, "translation"),
        }
    }
}

/// Why a message was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The message does not parse
    Grammar(ErrorKind),
    /// The translation is plain text while the source is not
    MissingIcuFormatting,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Grammar(kind) => write!(f, "{}", kind),
            Reason::MissingIcuFormatting => f.write_str(MISSING_ICU_FORMATTING),
        }
    }
}

impl Serialize for Reason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A problem found in one side of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFinding {
    pub side: Side,
    pub reason: Reason,
    pub source_text: String,
    pub translated_text: String,
    /// Where in the offending message the grammar error was detected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Span>,
}

impl ValidationFinding {
    fn grammar(side: Side, error: &ParseError, entry: &CatalogEntry<'_>) -> Self {
        Self {
            side,
            reason: Reason::Grammar(error.kind),
            source_text: entry.source_text.to_string(),
            translated_text: entry.translated_text.to_string(),
            location: Some(error.location),
        }
    }

    fn missing_formatting(entry: &CatalogEntry<'_>) -> Self {
        Self {
            side: Side::Translation,
            reason: Reason::MissingIcuFormatting,
            source_text: entry.source_text.to_string(),
            translated_text: entry.translated_text.to_string(),
            location: None,
        }
    }
}

/// Stateless validator for catalog entries
pub struct MessageValidator;

impl MessageValidator {
    /// Validate one entry.
    ///
    /// # Returns
    /// * An empty vector when the entry is fine or not applicable
    /// * One finding per failing side otherwise
    pub fn validate(entry: &CatalogEntry<'_>, ignore: &IgnoreSet) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        match icu::parse(entry.source_text, &PARSER_OPTIONS) {
            Err(error) => {
                if !ignore.contains(&error.kind) {
                    trace!("Source rejected with {}: {:?}", error.kind, entry.source_text);
                    findings.push(ValidationFinding::grammar(Side::Source, &error, entry));
                }
                // Nothing to compare the translation against
                return findings;
            }
            Ok(nodes) if icu::is_trivial(&nodes) => return findings,
            Ok(_) => {}
        }

        if entry.translated_text.is_empty() {
            return findings;
        }

        match icu::parse(entry.translated_text, &PARSER_OPTIONS) {
            Err(error) => {
                if !ignore.contains(&error.kind) {
                    findings.push(ValidationFinding::grammar(Side::Translation, &error, entry));
                }
            }
            Ok(nodes) if icu::is_trivial(&nodes) => {
                findings.push(ValidationFinding::missing_formatting(entry));
            }
            Ok(_) => {}
        }

        findings
    }
}

/*!
 * Gettext PO catalogs.
 *
 * Parsing is done by `polib`. This module maps its messages into entries
 * that can be validated and keeps a small index of `msgid` line numbers so
 * findings can point back into the file.
 */

use log::debug;
use polib::message::MessageView;
use polib::po_file;
use std::path::Path;

use crate::errors::CatalogError;

/// Highest `msgstr[N]` index accepted; no language has more plural forms
pub const MAX_PLURAL_FORMS: usize = 32;

/// One message of a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoEntry {
    /// Disambiguating context
    pub msgctxt: Option<String>,
    pub msgid: String,
    pub msgid_plural: Option<String>,
    /// One translation for singular entries, one per plural form otherwise
    pub msgstr: Vec<String>,
    /// Flagged `#, fuzzy`
    pub fuzzy: bool,
    /// 1-based line of the `msgid` keyword, when it could be located
    pub line: Option<usize>,
}

/// A (source, translation) pair ready for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub source_text: &'a str,
    /// Empty when untranslated
    pub translated_text: &'a str,
}

impl<'a> CatalogEntry<'a> {
    pub fn new(source_text: &'a str, translated_text: &'a str) -> Self {
        Self {
            source_text,
            translated_text,
        }
    }
}

impl PoEntry {
    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }

    /// Pairs to validate, in order.
    ///
    /// A singular entry yields `(msgid, msgstr)`. A plural entry yields
    /// `(msgid, msgstr[0])` followed by `(msgid_plural, msgstr[i])` for
    /// every further plural form.
    pub fn catalog_entries(&self) -> Vec<CatalogEntry<'_>> {
        let first = self.msgstr.first().map(String::as_str).unwrap_or("");
        let mut pairs = vec![CatalogEntry::new(&self.msgid, first)];

        if let Some(plural) = &self.msgid_plural {
            pairs.extend(
                self.msgstr
                    .iter()
                    .skip(1)
                    .map(|translation| CatalogEntry::new(plural, translation)),
            );
        }

        pairs
    }

    fn from_message(message: &dyn MessageView, line: Option<usize>) -> Self {
        let msgctxt = message
            .msgctxt()
            .filter(|ctx| !ctx.is_empty())
            .map(str::to_string);

        let (msgid_plural, msgstr) = if message.is_plural() {
            (
                message.msgid_plural().ok().map(str::to_string),
                message.msgstr_plural().map(|forms| forms.to_vec()).unwrap_or_default(),
            )
        } else {
            (None, vec![message.msgstr().unwrap_or_default().to_string()])
        };

        Self {
            msgctxt,
            msgid: message.msgid().to_string(),
            msgid_plural,
            msgstr,
            fuzzy: message.is_fuzzy(),
            line,
        }
    }
}

/// A parsed PO file
///
/// The header and obsolete (`#~`) entries are not part of `entries`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Message entries, in file order
    pub entries: Vec<PoEntry>,
}

impl Catalog {
    /// Read and parse a catalog from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::parse_str(&content)?;
        debug!(
            "Parsed {:?}: {} entries",
            path.as_ref(),
            catalog.entries.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog from an in-memory string
    pub fn parse_str(content: &str) -> Result<Self, CatalogError> {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        let lines = msgid_lines(content)?;

        let parsed = po_file::parse_from_reader(content.as_bytes())
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let messages: Vec<&dyn MessageView> = parsed.messages().collect();
        if messages.len() != lines.len() {
            debug!(
                "Located {} msgid lines for {} messages, line numbers omitted",
                lines.len(),
                messages.len()
            );
        }
        let located = messages.len() == lines.len();

        let entries = messages
            .into_iter()
            .enumerate()
            .map(|(index, message)| {
                let line = if located { Some(lines[index]) } else { None };
                PoEntry::from_message(message, line)
            })
            .collect();

        Ok(Catalog { entries })
    }
}

/// Line numbers of every active `msgid` keyword, header excluded.
///
/// Also rejects out of range `msgstr[N]` indexes before the content reaches
/// the parser.
fn msgid_lines(content: &str) -> Result<Vec<usize>, CatalogError> {
    let mut result = Vec::new();
    let mut pending_empty_msgid: Option<usize> = None;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // `msgid ""` followed directly by msgstr is the header
        if let Some(empty_line) = pending_empty_msgid.take() {
            if !trimmed.starts_with("msgstr") {
                result.push(empty_line);
            }
        }

        if let Some(rest) = trimmed.strip_prefix("msgstr[") {
            let index = rest
                .split_once(']')
                .and_then(|(index, _)| index.trim().parse::<usize>().ok())
                .ok_or(CatalogError::InvalidPluralIndex { line })?;
            if index >= MAX_PLURAL_FORMS {
                return Err(CatalogError::InvalidPluralIndex { line });
            }
        } else if let Some(rest) = trimmed.strip_prefix("msgid") {
            if rest.starts_with(|c: char| c.is_whitespace() || c == '"') {
                if rest.trim() == "\"\"" {
                    pending_empty_msgid = Some(line);
                } else {
                    result.push(line);
                }
            }
        }
    }

    if let Some(empty_line) = pending_empty_msgid {
        result.push(empty_line);
    }

    Ok(result)
}

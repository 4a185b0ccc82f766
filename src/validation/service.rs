/*!
 * Validation service that runs the message validator over whole catalogs.
 *
 * This module owns the per-run settings (ignore list, fuzzy handling) and
 * turns catalog entries into located findings.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, PoEntry};
use crate::icu::ErrorKind;

use super::message::{IgnoreSet, MessageValidator, ValidationFinding};

/// Configuration for the validation service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Error kinds that are never reported
    #[serde(default)]
    pub ignore: Vec<ErrorKind>,

    /// Whether entries flagged fuzzy are skipped
    #[serde(default)]
    pub skip_fuzzy: bool,
}

/// Convert from app_config::Config to validation::ValidationConfig
impl From<&crate::app_config::Config> for ValidationConfig {
    fn from(config: &crate::app_config::Config) -> Self {
        Self {
            ignore: config.ignore.clone(),
            skip_fuzzy: config.skip_fuzzy,
        }
    }
}

/// A finding together with where the entry lives in its catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFinding {
    /// Line of the entry's `msgid`, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Message context, when the entry has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(flatten)]
    pub finding: ValidationFinding,
}

/// Validation outcome for one catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogValidation {
    /// Number of (source, translation) pairs examined
    pub entries_checked: usize,
    /// Number of entries skipped because they are fuzzy
    pub entries_skipped: usize,
    /// Findings, in catalog order
    pub findings: Vec<EntryFinding>,
}

impl CatalogValidation {
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Validation service for translation catalogs
pub struct ValidationService {
    ignore: IgnoreSet,
    skip_fuzzy: bool,
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationService {
    /// Create a new validation service with default configuration
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    /// Create a new validation service with custom configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            ignore: config.ignore.into_iter().collect(),
            skip_fuzzy: config.skip_fuzzy,
        }
    }

    /// The error kinds this service suppresses
    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Validate every pair of a single PO entry
    pub fn validate_entry(&self, entry: &PoEntry) -> Vec<EntryFinding> {
        entry
            .catalog_entries()
            .iter()
            .flat_map(|pair| MessageValidator::validate(pair, &self.ignore))
            .map(|finding| EntryFinding {
                line: entry.line,
                context: entry.msgctxt.clone(),
                finding,
            })
            .collect()
    }

    /// Validate all entries of a catalog
    pub fn validate_catalog(&self, catalog: &Catalog) -> CatalogValidation {
        let mut result = CatalogValidation::default();

        for entry in &catalog.entries {
            if self.skip_fuzzy && entry.fuzzy {
                result.entries_skipped += 1;
                continue;
            }

            result.entries_checked += entry.catalog_entries().len();
            result.findings.extend(self.validate_entry(entry));
        }

        debug!(
            "Catalog validation: checked={}, skipped={}, findings={}",
            result.entries_checked,
            result.entries_skipped,
            result.findings.len()
        );

        result
    }
}

/*!
 * Validation module for ICU message syntax in translation catalogs.
 *
 * # Architecture
 *
 * - `message`: Validates a single (source, translation) pair
 * - `service`: Runs the message validator over whole catalogs
 */

pub mod message;
pub mod service;

// Re-export main types
pub use message::{IgnoreSet, MessageValidator, Reason, Side, ValidationFinding, MISSING_ICU_FORMATTING};
pub use service::{CatalogValidation, EntryFinding, ValidationConfig, ValidationService};

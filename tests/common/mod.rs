/*!
 * Common test utilities for the icu-po-lint test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Catalog with one entry of every outcome the validator can produce
pub const MIXED_CATALOG: &str = r#"# Spanish translations for the shop
msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Language: es\n"

msgid "Welcome"
msgstr "Bienvenido"

msgid "{count, plural, one {# item} other {# items}}"
msgstr "elementos"

msgid "Hello {name}"
msgstr "Hola {name"

msgid "{gender, select, male {He} female {She}}"
msgstr "Ellos"

msgid "{total, number, integer}"
msgstr "{total, number, integer}"
"#;

/// Catalog without any problem
pub const CLEAN_CATALOG: &str = r#"msgid ""
msgstr "Language: fr\n"

msgid "Hello {name}"
msgstr "Bonjour {name}"

msgid "{count, plural, one {# file} other {# files}}"
msgstr "{count, plural, one {# fichier} other {# fichiers}}"

msgid "Untranslated {thing}"
msgstr ""
"#;

/// Route log output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a catalog with findings in the specified directory
pub fn create_test_catalog(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, MIXED_CATALOG)
}

/// Creates a catalog without findings in the specified directory
pub fn create_clean_catalog(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, CLEAN_CATALOG)
}

/*!
 * Tests for catalog discovery
 */

use anyhow::Result;
use icu_po_lint::errors::AppError;
use icu_po_lint::file_utils::{FileManager, FilePattern};
use crate::common;

/// Test that dir_exists returns true for existing directories
#[test]
fn test_dir_exists_withExistingDir_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::dir_exists(temp_dir.path()));
    Ok(())
}

/// Test that dir_exists returns false for files and missing paths
#[test]
fn test_dir_exists_withFileOrMissingPath_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "es.po", "")?;

    assert!(!FileManager::dir_exists(&file));
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
    Ok(())
}

/// Test that nested catalogs are found recursively and sorted
#[test]
fn test_findCatalogs_withNestedTree_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "fr/LC_MESSAGES/app.po", "")?;
    common::create_test_file(root, "es/LC_MESSAGES/app.po", "")?;
    common::create_test_file(root, "de.po", "")?;
    common::create_test_file(root, "templates/app.pot", "")?;
    common::create_test_file(root, "notes.txt", "")?;

    let pattern = FilePattern::new("*.po")?;
    let found = FileManager::find_catalogs(root, &pattern)?;

    assert_eq!(
        found,
        vec![
            root.join("de.po"),
            root.join("es/LC_MESSAGES/app.po"),
            root.join("fr/LC_MESSAGES/app.po"),
        ]
    );
    Ok(())
}

/// Test that path patterns only match below the named directory
#[test]
fn test_findCatalogs_withPathPattern_shouldFilterByDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "es/LC_MESSAGES/app.po", "")?;
    common::create_test_file(root, "es/drafts/app.po", "")?;

    let pattern = FilePattern::new("**/LC_MESSAGES/*.po")?;
    let found = FileManager::find_catalogs(root, &pattern)?;

    assert_eq!(found, vec![root.join("es/LC_MESSAGES/app.po")]);
    Ok(())
}

/// Test that a missing directory is an error rather than an empty result
#[test]
fn test_findCatalogs_withMissingDir_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("nope");

    let result = FileManager::find_catalogs(&missing, &FilePattern::new("*.po")?);
    assert!(matches!(result, Err(AppError::NotADirectory(path)) if path == missing));
    Ok(())
}

/// Test that an empty directory yields no catalogs
#[test]
fn test_findCatalogs_withEmptyDir_shouldReturnNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let found = FileManager::find_catalogs(temp_dir.path(), &FilePattern::new("*.po")?)?;
    assert!(found.is_empty());
    Ok(())
}

/// Test that a dangling symlink is skipped instead of aborting discovery
#[cfg(unix)]
#[test]
fn test_findCatalogs_withDanglingSymlink_shouldSkipIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "es/app.po", "")?;
    common::create_test_file(root, "fr/app.po", "")?;
    std::os::unix::fs::symlink(root.join("gone.po"), root.join("es/broken.po"))?;

    let found = FileManager::find_catalogs(root, &FilePattern::new("*.po")?)?;

    assert_eq!(found, vec![root.join("es/app.po"), root.join("fr/app.po")]);
    Ok(())
}

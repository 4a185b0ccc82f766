/*!
 * Tests for the PO catalog reader
 */

use anyhow::Result;
use icu_po_lint::{Catalog, CatalogEntry, CatalogError};
use crate::common;

/// Test that a catalog on disk is read without its header
#[test]
fn test_fromPath_withMixedCatalog_shouldReadEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_catalog(temp_dir.path(), "es.po")?;

    let catalog = Catalog::from_path(&path)?;

    assert_eq!(catalog.entries.len(), 5);
    assert_eq!(catalog.entries[0].msgid, "Welcome");
    assert_eq!(catalog.entries[0].line, Some(7));
    assert_eq!(catalog.entries[1].line, Some(10));

    Ok(())
}

/// Test that a missing file surfaces as an I/O error
#[test]
fn test_fromPath_withMissingFile_shouldFailWithIo() {
    let result = Catalog::from_path("definitely/not/here.po");
    assert!(matches!(result, Err(CatalogError::Io(_))));
}

/// Test that a file that is not UTF-8 is rejected
#[test]
fn test_fromPath_withInvalidUtf8_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("bad.po");
    std::fs::write(&path, [0xff, 0xfe, 0x00, b'm'])?;

    assert!(Catalog::from_path(&path).is_err());

    Ok(())
}

/// Test that a byte order mark written by an editor does not hide the first entry
#[test]
fn test_fromPath_withByteOrderMark_shouldReadFirstEntry() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("\u{FEFF}{}", common::CLEAN_CATALOG);
    let path = common::create_test_file(temp_dir.path(), "fr.po", &content)?;

    let catalog = Catalog::from_path(&path)?;

    assert_eq!(catalog.entries.len(), 3);
    assert_eq!(catalog.entries[0].msgid, "Hello {name}");
    assert_eq!(catalog.entries[0].line, Some(4));

    Ok(())
}

/// Test that context, fuzzy flag and plural forms are mapped
#[test]
fn test_parse_withContextAndPlural_shouldMapFields() -> Result<()> {
    let catalog = Catalog::parse_str(
        "#, fuzzy\nmsgctxt \"menu\"\nmsgid \"Open\"\nmsgstr \"Abrir\"\n\n\
         msgid \"{n} day\"\nmsgid_plural \"{n} days\"\nmsgstr[0] \"{n} dzień\"\nmsgstr[1] \"{n} dni\"\n",
    )?;

    let first = &catalog.entries[0];
    assert!(first.fuzzy);
    assert_eq!(first.msgctxt.as_deref(), Some("menu"));
    assert_eq!(first.line, Some(3));

    let plural = &catalog.entries[1];
    assert_eq!(plural.line, Some(6));
    assert_eq!(
        plural.catalog_entries(),
        vec![
            CatalogEntry::new("{n} day", "{n} dzień"),
            CatalogEntry::new("{n} days", "{n} dni"),
        ]
    );

    Ok(())
}

/// Test that an absurd msgstr index is rejected instead of allocated
#[test]
fn test_parse_withOutOfRangePluralIndex_shouldFail() {
    let err = Catalog::parse_str("msgid \"a\"\nmsgid_plural \"b\"\nmsgstr[4294967296] \"c\"\n")
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidPluralIndex { line: 3 }));
    assert_eq!(err.to_string(), "line 3: invalid msgstr index");

    let highest = format!(
        "msgid \"a\"\nmsgid_plural \"b\"\nmsgstr[{}] \"c\"\n",
        icu_po_lint::catalog::MAX_PLURAL_FORMS
    );
    assert!(Catalog::parse_str(&highest).is_err());
}

/// Test that obsolete entries are not part of the catalog
#[test]
fn test_parse_withObsoleteEntry_shouldSkipIt() -> Result<()> {
    let catalog = Catalog::parse_str(
        "msgid \"kept\"\nmsgstr \"\"\n\n#~ msgid \"{gone\"\n#~ msgstr \"x\"\n",
    )?;

    assert_eq!(catalog.entries.len(), 1);
    assert_eq!(catalog.entries[0].msgid, "kept");

    Ok(())
}

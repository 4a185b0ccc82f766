/*!
 * Tests for message and catalog validation
 */

use anyhow::Result;
use icu_po_lint::validation::{Reason, ValidationConfig, ValidationService, MISSING_ICU_FORMATTING};
use icu_po_lint::{Catalog, CatalogEntry, ErrorKind, IgnoreSet, MessageValidator, Side};
use crate::common;

fn validate(source: &str, translation: &str, ignore: &[ErrorKind]) -> Vec<Reason> {
    let ignore: IgnoreSet = ignore.iter().copied().collect();
    MessageValidator::validate(&CatalogEntry::new(source, translation), &ignore)
        .into_iter()
        .map(|finding| finding.reason)
        .collect()
}

/// Test the documented example pairs
#[test]
fn test_validate_withReferencePairs_shouldClassifyThem() {
    let plural = "{count, plural, one {# item} other {# items}}";

    assert_eq!(validate(plural, "elementos", &[]), vec![Reason::MissingIcuFormatting]);
    assert!(validate(plural, "", &[]).is_empty());
    assert!(validate("Hello", "", &[]).is_empty());
    assert!(validate("{gender, select, male {He} female {She}}", "x", &[ErrorKind::MissingOtherClause]).is_empty());
    assert_eq!(
        validate("{gender, select, male {He} female {She}}", "x", &[]),
        vec![Reason::Grammar(ErrorKind::MissingOtherClause)]
    );
}

/// Test that ignoring an unrelated kind does not hide a finding
#[test]
fn test_validate_withUnrelatedIgnore_shouldStillReport() {
    assert_eq!(
        validate("Hi {name}", "Hola {name", &[ErrorKind::InvalidTag]),
        vec![Reason::Grammar(ErrorKind::ExpectArgumentClosingBrace)]
    );
}

/// Test that a source failure never also reports the translation
#[test]
fn test_validate_withBrokenSourceAndTranslation_shouldReportSourceOnly() {
    let ignore = IgnoreSet::new();
    let findings = MessageValidator::validate(&CatalogEntry::new("{a, foo}", "{b"), &ignore);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].side, Side::Source);
    assert_eq!(findings[0].reason, Reason::Grammar(ErrorKind::InvalidArgumentType));
}

/// Test that a translation rewritten with different formatting is accepted
#[test]
fn test_validate_withRestructuredTranslation_shouldPass() {
    let source = "{count, plural, one {# item} other {# items}}";
    let translation = "{count, plural, one {# Artikel} few {# Artikel} other {# Artikel}}";

    assert!(validate(source, translation, &[]).is_empty());
    assert!(validate(source, "Artikel: {count, number}", &[]).is_empty());
}

/// Test that quoted text only translations count as missing formatting
#[test]
fn test_validate_withQuotedBracesTranslation_shouldFlagMissingFormatting() {
    let reasons = validate("Hi {name}", "Hola '{name}'", &[]);
    assert_eq!(reasons, vec![Reason::MissingIcuFormatting]);
    assert_eq!(reasons[0].to_string(), MISSING_ICU_FORMATTING);
}

/// Test catalog validation over the shared fixture
#[test]
fn test_validateCatalog_withMixedCatalog_shouldLocateFindings() -> Result<()> {
    let catalog = Catalog::parse_str(common::MIXED_CATALOG)?;
    let result = ValidationService::new().validate_catalog(&catalog);

    assert_eq!(result.entries_checked, 5);
    let lines: Vec<Option<usize>> = result.findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![Some(10), Some(13), Some(16)]);
    assert_eq!(result.findings[1].finding.side, Side::Translation);
    assert_eq!(result.findings[2].finding.side, Side::Source);

    Ok(())
}

/// Test that the service applies its ignore list
#[test]
fn test_validateCatalog_withIgnoreList_shouldDropKinds() -> Result<()> {
    let catalog = Catalog::parse_str(common::MIXED_CATALOG)?;
    let service = ValidationService::with_config(ValidationConfig {
        ignore: vec![ErrorKind::MissingOtherClause, ErrorKind::ExpectArgumentClosingBrace],
        skip_fuzzy: false,
    });

    assert!(service.ignore_set().contains(&ErrorKind::MissingOtherClause));
    let result = service.validate_catalog(&catalog);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].finding.reason, Reason::MissingIcuFormatting);

    Ok(())
}

/// Test that a clean catalog passes
#[test]
fn test_validateCatalog_withCleanCatalog_shouldPass() -> Result<()> {
    let catalog = Catalog::parse_str(common::CLEAN_CATALOG)?;
    let result = ValidationService::new().validate_catalog(&catalog);

    assert!(result.passed());
    assert_eq!(result.entries_checked, 3);

    Ok(())
}

/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use vdscript2llc::errors::ConversionError;
use vdscript2llc::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "cuts.vdscript", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.vdscript"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::generate_output_path(
        Path::new("/tmp/input/edit.vdscript"),
        Path::new("/tmp/output"),
        "llc",
    );

    assert_eq!(output_path, Path::new("/tmp/output/edit.llc"));
}

/// Test that write_new_file creates missing parent directories
#[test]
fn test_write_new_file_withMissingParent_shouldCreateFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("nested").join("out.llc");

    FileManager::write_new_file(&target, "{}")?;

    assert_eq!(fs::read_to_string(&target)?, "{}");

    Ok(())
}

/// Test that write_new_file never overwrites an existing file
#[test]
fn test_write_new_file_withExistingFile_shouldRefuseAndKeepContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = common::create_test_file(temp_dir.path(), "out.llc", "original")?;

    let result = FileManager::write_new_file(&target, "replacement");

    assert!(matches!(result, Err(ConversionError::OutputExists(ref path)) if path == &target));
    assert_eq!(fs::read_to_string(&target)?, "original");

    Ok(())
}

/// Test recursive, case-insensitive, sorted script discovery
#[test]
fn test_find_files_withNestedScripts_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("day2");
    FileManager::ensure_dir(&nested)?;

    let b = common::create_test_file(temp_dir.path(), "b.vdscript", "")?;
    let a = common::create_test_file(temp_dir.path(), "a.VDSCRIPT", "")?;
    let c = common::create_test_file(&nested, "c.vdscript", "")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "")?;

    let found = FileManager::find_files(temp_dir.path(), ".vdscript")?;

    let mut expected = vec![a, b, c];
    expected.sort();
    assert_eq!(found, expected);

    Ok(())
}

/// Test that read_to_string reports missing files
#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("missing_12345.vdscript").is_err());
}

// tests/errors.rs

mod common;

use assert_cmd::prelude::*;
use common::{create_file, srcunify_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_nonexistent_path_fails_with_io_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    srcunify_cmd()
        .arg(temp.path().join("does-not-exist"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("I/O error accessing path"))
        .stderr(predicate::str::contains("does-not-exist"));

    temp.close()?;
    Ok(())
}

#[test]
fn test_empty_directory_reports_no_files_found() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let empty = temp.path().join("empty");
    fs::create_dir(&empty)?;

    // Finding nothing is a notice, not a failure.
    srcunify_cmd()
        .arg(&empty)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains(
            "srcunify: No supported files found in the given inputs.",
        ));

    temp.close()?;
    Ok(())
}

#[test]
fn test_only_unrecognized_files_also_reports_no_files_found(
) -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let root = temp.path().join("assets");
    fs::create_dir(&root)?;
    fs::write(root.join("logo.png"), b"\x89PNG\r\n\x1a\nbinary")?;

    srcunify_cmd()
        .arg(&root)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No supported files found"));

    temp.close()?;
    Ok(())
}

#[test]
fn test_missing_paths_argument_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    srcunify_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
    Ok(())
}

#[test]
fn test_version_flag() -> Result<(), Box<dyn std::error::Error>> {
    srcunify_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("srcunify"));
    Ok(())
}

#[test]
fn test_help_describes_the_tool() -> Result<(), Box<dyn std::error::Error>> {
    srcunify_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unifies source files"))
        .stdout(predicate::str::contains("--profile"))
        .stdout(predicate::str::contains("--with-other"));
    Ok(())
}

#[test]
#[cfg(feature = "clipboard")]
fn test_paste_conflicts_with_file_destinations() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let root = temp.path().join("demo");
    create_file(&root, "Main.java", "class Main {}\n")?;

    srcunify_cmd()
        .arg(&root)
        .arg("-p")
        .arg("-o")
        .arg("out.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    temp.close()?;
    Ok(())
}

#[test]
#[cfg(not(feature = "clipboard"))]
fn test_paste_flag_absent_without_clipboard_feature() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let root = temp.path().join("demo");
    create_file(&root, "Main.java", "class Main {}\n")?;

    srcunify_cmd()
        .arg(&root)
        .arg("-p")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));

    temp.close()?;
    Ok(())
}

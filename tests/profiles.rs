// tests/profiles.rs

mod common;

use assert_cmd::prelude::*;
use common::{create_file, srcunify_cmd};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_web_profile_selects_front_end_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let root = temp.path().join("site");
    create_file(&root, "index.html", "<html><body>hi</body></html>\n")?;
    create_file(&root, "src/components/App.tsx", "export const App = 1;\n")?;
    create_file(&root, "data.json", "{\"a\": 1}\n")?;
    create_file(&root, "Main.java", "class Main {}\n")?;

    srcunify_cmd()
        .arg(&root)
        .arg("--profile")
        .arg("web")
        .assert()
        .success()
        .stdout(predicate::str::contains("// File (HTML): index.html"))
        .stdout(predicate::str::contains("// File (TSX): App.tsx"))
        // Nested files group by their containing directory.
        .stdout(predicate::str::contains("// Directory: src/components"))
        // json is recognized by the web profile but not selected by default.
        .stdout(predicate::str::contains("data.json").not())
        // Java sources are not recognized by the web profile at all.
        .stdout(predicate::str::contains("Main.java").not());

    temp.close()?;
    Ok(())
}

#[test]
fn test_web_profile_root_files_group_as_other() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let root = temp.path().join("site");
    create_file(&root, "index.html", "<p>hi</p>\n")?;

    srcunify_cmd()
        .arg(&root)
        .arg("--profile")
        .arg("web")
        .assert()
        .success()
        .stdout(predicate::str::contains("// Group: (Other Project Files)"));

    temp.close()?;
    Ok(())
}

#[test]
fn test_all_profile_spans_language_families() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let root = temp.path().join("mono");
    create_file(&root, "backend/Main.java", "package com.acme;\nclass Main {}\n")?;
    create_file(&root, "tools/gen.py", "print('hi')\n")?;
    create_file(&root, "web/app.js", "let a = 1;\n")?;

    srcunify_cmd()
        .arg(&root)
        .arg("--profile")
        .arg("all")
        .assert()
        .success()
        .stdout(predicate::str::contains("// File (JAVA): Main.java"))
        .stdout(predicate::str::contains("// File (PY): gen.py"))
        .stdout(predicate::str::contains("// File (JS): app.js"))
        // The catch-all profile groups by directory, even for Java.
        .stdout(predicate::str::contains("// Group: backend"))
        .stdout(predicate::str::contains("// Group: tools"))
        .stdout(predicate::str::contains("// Group: web"))
        .stdout(predicate::str::contains("// Package: com.acme").not());

    temp.close()?;
    Ok(())
}

#[test]
fn test_profile_name_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let root = temp.path().join("site");
    create_file(&root, "index.html", "<p>hi</p>\n")?;

    srcunify_cmd()
        .arg(&root)
        .arg("--profile")
        .arg("WEB")
        .assert()
        .success()
        .stdout(predicate::str::contains("index.html"));

    temp.close()?;
    Ok(())
}

#[test]
fn test_unknown_profile_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let root = temp.path().join("demo");
    create_file(&root, "Main.java", "class Main {}\n")?;

    srcunify_cmd()
        .arg(&root)
        .arg("--profile")
        .arg("cobol")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unknown profile 'cobol'"));

    temp.close()?;
    Ok(())
}

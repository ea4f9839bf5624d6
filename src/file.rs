use std::fs;
use std::path::Path;

use crate::errors::{ImportCaseError, ImportCaseResult};
use crate::rewrite::{lowercase_imports, EditCounts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Write,
  DryRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
  Unchanged,
  Updated { edits: EditCounts },
}

/// Read `path`, lowercase its import paths and write it back if anything
/// changed. Unchanged files are never opened for writing.
pub(crate) fn rewrite_file(path: &Path, mode: Mode) -> ImportCaseResult<FileOutcome> {
  let content = fs::read_to_string(path).map_err(|source| ImportCaseError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let rewrite = lowercase_imports(&content)?;
  if !rewrite.changed() {
    return Ok(FileOutcome::Unchanged);
  }

  if mode == Mode::Write {
    fs::write(path, rewrite.text.as_bytes()).map_err(|source| ImportCaseError::Write {
      path: path.to_path_buf(),
      source,
    })?;
  }

  tracing::debug!(
    path = %path.display(),
    from_clause = rewrite.edits.from_clause,
    side_effect = rewrite.edits.side_effect,
    dynamic = rewrite.edits.dynamic,
    dry_run = mode == Mode::DryRun,
    "imports lowercased"
  );

  Ok(FileOutcome::Updated { edits: rewrite.edits })
}

#[test]
fn updates_file_in_place() {
  let tmp = tempfile::tempdir().unwrap();
  let p = tmp.path().join("a.ts");
  fs::write(&p, "import { Foo } from \"@/Components/Foo\";\nconst Bar = 1;\n").unwrap();

  let outcome = rewrite_file(&p, Mode::Write).unwrap();

  assert!(matches!(outcome, FileOutcome::Updated { edits } if edits.from_clause == 1));
  assert_eq!(
    fs::read_to_string(&p).unwrap(),
    "import { Foo } from \"@/components/foo\";\nconst Bar = 1;\n"
  );
}

#[test]
fn unchanged_file_is_not_written() {
  let tmp = tempfile::tempdir().unwrap();
  let p = tmp.path().join("a.ts");
  fs::write(&p, "import React from \"react\";\nimport \"@/already/lowercase\";\n").unwrap();

  let before = fs::metadata(&p).unwrap().modified().unwrap();
  std::thread::sleep(std::time::Duration::from_millis(20));

  assert_eq!(rewrite_file(&p, Mode::Write).unwrap(), FileOutcome::Unchanged);
  assert_eq!(fs::metadata(&p).unwrap().modified().unwrap(), before);
}

#[test]
fn dry_run_reports_but_does_not_write() {
  let tmp = tempfile::tempdir().unwrap();
  let p = tmp.path().join("a.tsx");
  let src = "const Page = import(\"./Pages/Home\");\n";
  fs::write(&p, src).unwrap();

  let outcome = rewrite_file(&p, Mode::DryRun).unwrap();

  assert!(matches!(outcome, FileOutcome::Updated { edits } if edits.dynamic == 1));
  assert_eq!(fs::read_to_string(&p).unwrap(), src);
}

#[test]
fn invalid_utf8_is_a_read_error() {
  let tmp = tempfile::tempdir().unwrap();
  let p = tmp.path().join("bin.ts");
  fs::write(&p, [0xff, 0xfe, 0x00, 0x41]).unwrap();

  let err = rewrite_file(&p, Mode::Write).unwrap_err();
  assert!(matches!(err, ImportCaseError::Read { .. }));
}

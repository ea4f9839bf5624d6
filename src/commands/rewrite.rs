use console::style;
use std::path::{Path, PathBuf};

use crate::errors::{ImportCaseError, ImportCaseResult};
use crate::file::{rewrite_file, FileOutcome, Mode};
use crate::rewrite::EditCounts;
use crate::utils::Config;
use crate::walk::eligible_files;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Files with an eligible suffix that were read.
    pub eligible: usize,
    /// Files that were (or in dry-run would be) rewritten.
    pub updated: usize,
    /// Files that failed and were skipped; only non-zero with `keep_going`.
    pub failed: usize,
    pub edits: EditCounts,
}

/// Entry point for `importcase rewrite`.
pub fn handle(path: Option<&str>, mode: Mode, config: &Config) -> ImportCaseResult<()> {
    let root = resolve_root(path, config);
    let quiet = config.output.quiet;

    let summary = rewrite_tree(&root, config, mode, |p, _| {
        if !quiet {
            println!("{}", update_line(mode, p));
        }
    })?;

    print_summary(&summary, mode, quiet);

    if summary.failed > 0 {
        return Err(ImportCaseError::FailedFiles(summary.failed));
    }
    Ok(())
}

/// Entry point for `importcase check`.
pub fn check(path: Option<&str>, config: &Config) -> ImportCaseResult<()> {
    let root = resolve_root(path, config);
    let quiet = config.output.quiet;

    let summary = rewrite_tree(&root, config, Mode::DryRun, |p, edits| {
        if !quiet {
            println!("{}", check_line(p, edits));
        }
    })?;

    print_summary(&summary, Mode::DryRun, quiet);

    if summary.failed > 0 {
        return Err(ImportCaseError::FailedFiles(summary.failed));
    }
    if summary.updated > 0 {
        return Err(ImportCaseError::PendingRewrites(summary.updated));
    }
    Ok(())
}

/// `Updated: <path>`, or `Would update: <path>` in dry-run.
fn update_line(mode: Mode, path: &Path) -> String {
    let label = match mode {
        Mode::Write => "Updated:",
        Mode::DryRun => "Would update:",
    };
    format!("{} {}", style(label).green(), path.display())
}

fn check_line(path: &Path, edits: &EditCounts) -> String {
    format!(
        "{} {} ({} import{})",
        style("Would update:").yellow(),
        path.display(),
        edits.total(),
        if edits.total() == 1 { "" } else { "s" }
    )
}

fn resolve_root(path: Option<&str>, config: &Config) -> PathBuf {
    PathBuf::from(path.unwrap_or(&config.rewrite.default_root))
}

fn print_summary(summary: &Summary, mode: Mode, quiet: bool) {
    tracing::info!(
        eligible = summary.eligible,
        updated = summary.updated,
        failed = summary.failed,
        from_clause = summary.edits.from_clause,
        side_effect = summary.edits.side_effect,
        dynamic = summary.edits.dynamic,
        "run complete"
    );
    if quiet {
        return;
    }
    let verb = match mode {
        Mode::Write => "updated",
        Mode::DryRun => "would change",
    };
    eprintln!(
        "{} of {} file(s) {verb}{}",
        style(summary.updated).bold(),
        summary.eligible,
        if summary.failed > 0 {
            format!(", {} failed", style(summary.failed).red().bold())
        } else {
            String::new()
        }
    );
}

// --------------------------------------------------------------------------------------------
// Tree rewrite
// --------------------------------------------------------------------------------------------

/// Rewrite every eligible file under `root`, one at a time, in walk order.
///
/// `on_update` is called once per file whose content changed. Without
/// `keep_going` the first read or write failure is returned immediately and
/// files already rewritten stay rewritten.
pub fn rewrite_tree<F>(
    root: &Path,
    cfg: &Config,
    mode: Mode,
    mut on_update: F,
) -> ImportCaseResult<Summary>
where
    F: FnMut(&Path, &EditCounts),
{
    let files = eligible_files(root, cfg)?;
    let mut summary = Summary::default();

    for path in files {
        summary.eligible += 1;
        match rewrite_file(&path, mode) {
            Ok(FileOutcome::Unchanged) => {}
            Ok(FileOutcome::Updated { edits }) => {
                summary.updated += 1;
                summary.edits.from_clause += edits.from_clause;
                summary.edits.side_effect += edits.side_effect;
                summary.edits.dynamic += edits.dynamic;
                on_update(&path, &edits);
            }
            Err(e) if cfg.rewrite.keep_going => {
                tracing::warn!("{e}");
                summary.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

#[cfg(test)]
fn write(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let p = root.join(rel);
    std::fs::create_dir_all(p.parent().unwrap()).unwrap();
    std::fs::write(&p, content).unwrap();
    p
}

#[cfg(test)]
fn run(root: &Path, cfg: &Config, mode: Mode) -> (ImportCaseResult<Summary>, Vec<PathBuf>) {
    let mut reported = Vec::new();
    let res = rewrite_tree(root, cfg, mode, |p, _| reported.push(p.to_path_buf()));
    (res, reported)
}

#[test]
fn rewrites_tree_and_reports_only_changed_files() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let a = write(root, "a.ts", br#"import { Foo } from "@/Components/Foo";"#);
    let b = write(root, "styles/b.tsx", br#"import "./Styles/Bar.CSS";"#);
    let c = write(root, "c.ts", br#"const x = import("../Utils/Helper");"#);
    write(root, "d.ts", br#"import React from "react";"#);
    write(root, "e.ts", br#"import "@/already/lowercase";"#);
    let js_src = br#"import { Foo } from "@/Components/Foo";"#;
    let js = write(root, "f.js", js_src);

    let (res, reported) = run(root, &Config::default(), Mode::Write);
    let summary = res.unwrap();

    assert_eq!(reported, vec![a.clone(), c.clone(), b.clone()]);
    assert_eq!(summary.eligible, 5);
    assert_eq!(summary.updated, 3);
    assert_eq!(summary.edits.total(), 3);

    assert_eq!(
        std::fs::read_to_string(&a).unwrap(),
        r#"import { Foo } from "@/components/foo";"#
    );
    assert_eq!(
        std::fs::read_to_string(&b).unwrap(),
        r#"import "./styles/bar.css";"#
    );
    assert_eq!(
        std::fs::read_to_string(&c).unwrap(),
        r#"const x = import("../utils/helper");"#
    );
    assert_eq!(std::fs::read(&js).unwrap(), js_src);
}

#[test]
fn second_run_reports_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "a.ts", b"import A from \"./A\";\nimport \"@/B.css\";\n");

    let (first, reported) = run(root, &Config::default(), Mode::Write);
    assert_eq!(first.unwrap().updated, 1);
    assert_eq!(reported.len(), 1);

    let (second, reported) = run(root, &Config::default(), Mode::Write);
    assert_eq!(second.unwrap().updated, 0);
    assert!(reported.is_empty());
}

#[test]
fn dry_run_leaves_tree_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let src = b"export * from \"./Models\";\n";
    let p = write(root, "index.ts", src);

    let (res, reported) = run(root, &Config::default(), Mode::DryRun);

    assert_eq!(res.unwrap().updated, 1);
    assert_eq!(reported, vec![p.clone()]);
    assert_eq!(std::fs::read(&p).unwrap(), src);
}

#[test]
fn first_failure_aborts_without_rollback() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let a = write(root, "a.ts", b"import A from \"./A\";");
    write(root, "b.ts", &[0xff, 0xfe, 0xfd]);
    let c = write(root, "c.ts", b"import C from \"./C\";");

    let (res, reported) = run(root, &Config::default(), Mode::Write);

    assert!(matches!(res, Err(ImportCaseError::Read { .. })));
    assert_eq!(reported, vec![a.clone()]);
    assert_eq!(std::fs::read_to_string(&a).unwrap(), "import A from \"./a\";");
    assert_eq!(std::fs::read_to_string(&c).unwrap(), "import C from \"./C\";");
}

#[test]
fn keep_going_isolates_failures() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "a.ts", b"import A from \"./A\";");
    write(root, "b.ts", &[0xff, 0xfe, 0xfd]);
    let c = write(root, "c.ts", b"import C from \"./C\";");

    let mut cfg = Config::default();
    cfg.rewrite.keep_going = true;
    let (res, reported) = run(root, &cfg, Mode::Write);
    let summary = res.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.updated, 2);
    assert_eq!(reported.len(), 2);
    assert_eq!(std::fs::read_to_string(&c).unwrap(), "import C from \"./c\";");
}

#[test]
fn resolve_root_prefers_explicit_path() {
    let cfg = Config::default();
    assert_eq!(resolve_root(Some("app"), &cfg), PathBuf::from("app"));
    assert_eq!(resolve_root(None, &cfg), PathBuf::from("src"));
}

#[cfg(test)]
fn plain(line: String) -> String {
    console::strip_ansi_codes(&line).into_owned()
}

#[test]
fn update_line_names_the_file() {
    let p = Path::new("src/components/Foo.tsx");
    assert_eq!(plain(update_line(Mode::Write, p)), "Updated: src/components/Foo.tsx");
    assert_eq!(
        plain(update_line(Mode::DryRun, p)),
        "Would update: src/components/Foo.tsx"
    );
}

#[test]
fn check_line_counts_imports() {
    let p = Path::new("a.ts");
    let one = EditCounts { from_clause: 1, ..EditCounts::default() };
    let three = EditCounts { from_clause: 1, side_effect: 1, dynamic: 1 };
    assert_eq!(plain(check_line(p, &one)), "Would update: a.ts (1 import)");
    assert_eq!(plain(check_line(p, &three)), "Would update: a.ts (3 imports)");
}

#[test]
fn handle_rewrites_tree_from_explicit_root() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let a = write(root, "a.ts", br#"import { Foo } from "@/Components/Foo";"#);

    let mut cfg = Config::default();
    cfg.output.quiet = true;
    handle(root.to_str(), Mode::Write, &cfg).unwrap();

    assert_eq!(
        std::fs::read_to_string(&a).unwrap(),
        r#"import { Foo } from "@/components/foo";"#
    );
}

#[test]
fn handle_reports_failed_files_after_keep_going() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "a.ts", &[0xff, 0xfe, 0xfd]);
    let b = write(root, "b.ts", b"import B from \"./B\";");

    let mut cfg = Config::default();
    cfg.output.quiet = true;
    cfg.rewrite.keep_going = true;
    let err = handle(root.to_str(), Mode::Write, &cfg).unwrap_err();

    assert!(matches!(err, ImportCaseError::FailedFiles(1)));
    assert_eq!(std::fs::read_to_string(&b).unwrap(), "import B from \"./b\";");
}

#[test]
fn check_fails_with_pending_count_and_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let src = b"import \"./Styles/Bar.CSS\";";
    let a = write(root, "a.ts", src);
    write(root, "b.tsx", b"const x = import(\"../Utils/Helper\");");
    write(root, "c.ts", b"import React from \"react\";");

    let mut cfg = Config::default();
    cfg.output.quiet = true;
    let err = check(root.to_str(), &cfg).unwrap_err();

    assert!(matches!(err, ImportCaseError::PendingRewrites(2)));
    assert_eq!(std::fs::read(&a).unwrap(), src);
}

#[test]
fn check_passes_on_clean_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "a.ts", b"import \"@/already/lowercase\";\nimport React from \"react\";");
    write(root, "b.js", b"import A from \"./Upper/A\";");

    let mut cfg = Config::default();
    cfg.output.quiet = true;
    check(root.to_str(), &cfg).unwrap();
}

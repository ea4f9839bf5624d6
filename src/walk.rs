use ignore::{overrides::OverrideBuilder, WalkBuilder};
use std::path::{Path, PathBuf};

use crate::errors::{ImportCaseError, ImportCaseResult};
use crate::utils::{is_eligible, Config};

// ---------------------------------------------------------------------------
/// Walk `root` and collect every file whose name has an eligible suffix.
///
/// Nothing is opened here. Unreadable directories are logged and skipped,
/// matching a plain recursive listing.
pub fn eligible_files(root: &Path, cfg: &Config) -> ImportCaseResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ImportCaseError::InvalidRoot(root.to_path_buf()));
    }

    // ----- 1  exclusion rules ----------------------------------------------
    let mut ob = OverrideBuilder::new(root);
    for dir in &cfg.walker.excluded_directories {
        if let Err(e) = ob.add(&format!("!**/{dir}")) {
            tracing::warn!("cannot add ignore pattern ‘{dir}’: {e}");
        }
    }
    let overrides = ob.build()?;

    // ----- 2  sequential walk ----------------------------------------------
    let read_vcs = cfg.walker.read_vcsignore;
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(!cfg.walker.scan_hidden_files)
        .git_ignore(read_vcs)
        .git_exclude(read_vcs)
        .ignore(read_vcs)
        .parents(read_vcs)
        .follow_links(cfg.walker.follow_symlinks)
        .max_depth(cfg.walker.max_depth)
        .overrides(overrides)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut out = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        // symlinked files count as files; symlinked dirs are not descended
        let is_file = entry.file_type().is_some_and(|ft| {
            ft.is_file() || (ft.is_symlink() && entry.path().is_file())
        });
        if !is_file {
            continue;
        }
        if !is_eligible(entry.path()) {
            tracing::trace!("not eligible {:?}", entry.path());
            continue;
        }
        tracing::debug!("eligible {:?}", entry.path());
        out.push(entry.into_path());
    }

    Ok(out)
}

#[cfg(test)]
fn touch(root: &Path, rel: &str) {
    let p = root.join(rel);
    std::fs::create_dir_all(p.parent().unwrap()).unwrap();
    std::fs::write(p, "").unwrap();
}

#[cfg(test)]
fn rel_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn walks_recursively_and_filters_by_suffix() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    for f in ["a.ts", "b.tsx", "c.js", "d/e.ts", "d/f/g.tsx", "d/f/h.css", "i.d.ts"] {
        touch(root, f);
    }

    let files = eligible_files(root, &Config::default()).unwrap();

    assert_eq!(
        rel_names(root, &files),
        vec!["a.ts", "b.tsx", "d/e.ts", "d/f/g.tsx", "i.d.ts"]
    );
}

#[cfg(unix)]
#[test]
fn symlinked_files_are_visited_but_symlinked_dirs_are_not() {
    let outside = tempfile::tempdir().unwrap();
    touch(outside.path(), "real.ts");
    touch(outside.path(), "dir/inner.ts");

    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::os::unix::fs::symlink(outside.path().join("real.ts"), root.join("link.ts")).unwrap();
    std::os::unix::fs::symlink(outside.path().join("dir"), root.join("linked_dir")).unwrap();

    let files = eligible_files(root, &Config::default()).unwrap();

    assert_eq!(rel_names(root, &files), vec!["link.ts"]);
}

#[test]
fn hidden_and_gitignored_files_are_visited_by_default() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    touch(root, ".hidden/a.ts");
    touch(root, "ignored/b.ts");
    std::fs::write(root.join(".gitignore"), "ignored/\n").unwrap();
    std::fs::create_dir(root.join(".git")).unwrap();

    let files = eligible_files(root, &Config::default()).unwrap();

    assert_eq!(rel_names(root, &files), vec![".hidden/a.ts", "ignored/b.ts"]);
}

#[test]
fn excluded_directories_and_vcsignore_are_honoured_when_configured() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    touch(root, "keep/a.ts");
    touch(root, "node_modules/pkg/b.ts");
    touch(root, "ignored/c.ts");
    std::fs::write(root.join(".gitignore"), "ignored/\n").unwrap();
    std::fs::create_dir(root.join(".git")).unwrap();

    let mut cfg = Config::default();
    cfg.walker.excluded_directories = vec!["node_modules".into()];
    cfg.walker.read_vcsignore = true;

    let files = eligible_files(root, &cfg).unwrap();

    assert_eq!(rel_names(root, &files), vec!["keep/a.ts"]);
}

#[test]
fn missing_root_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = eligible_files(&tmp.path().join("nope"), &Config::default()).unwrap_err();
    assert!(matches!(err, ImportCaseError::InvalidRoot(_)));
}

/// File-name suffixes whose imports get rewritten.
pub const ELIGIBLE_SUFFIXES: &[&str] = &[".ts", ".tsx"];

/// Case-sensitive suffix check on the file name; non-UTF-8 names never qualify.
pub fn is_eligible(path: &std::path::Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| ELIGIBLE_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

#[test]
fn is_eligible_recognises_typescript_only() {
  let cases = [
    ("index.ts",        true),
    ("App.tsx",         true),
    ("types.d.ts",      true),
    ("src/deep/a.tsx",  true),
    ("main.js",         false),
    ("main.jsx",        false),
    ("README.md",       false),
    ("SHOUT.TS",        false),
    ("tsconfig.json",   false),
    ("ts",              false),
  ];

  for (file, expected) in cases {
    assert_eq!(is_eligible(std::path::Path::new(file)), expected, "case: {file}");
  }
}

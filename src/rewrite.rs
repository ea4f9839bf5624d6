use regex::Captures;
use std::borrow::Cow;

use crate::errors::ImportCaseResult;
use crate::patterns::{self, ImportShape};

/// Path bodies whose case changed, per import shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditCounts {
  pub from_clause: usize,
  pub side_effect: usize,
  pub dynamic: usize,
}

impl EditCounts {
  pub fn total(&self) -> usize {
    self.from_clause + self.side_effect + self.dynamic
  }

  fn bump(&mut self, shape: ImportShape) {
    match shape {
      ImportShape::FromClause => self.from_clause += 1,
      ImportShape::SideEffect => self.side_effect += 1,
      ImportShape::Dynamic => self.dynamic += 1,
    }
  }
}

#[derive(Debug)]
pub struct Rewrite<'a> {
  pub text: Cow<'a, str>,
  pub edits: EditCounts,
}

impl Rewrite<'_> {
  pub fn changed(&self) -> bool {
    matches!(self.text, Cow::Owned(_))
  }
}

/// Lowercase the path body of every relative or `@/`-aliased import.
///
/// The three passes run in order over the progressively edited text. Only
/// capture group 3 (the path body) is touched; prefix, marker and closing
/// punctuation are copied through as-is.
pub fn lowercase_imports(text: &str) -> ImportCaseResult<Rewrite<'_>> {
  let mut current: Cow<'_, str> = Cow::Borrowed(text);
  let mut edits = EditCounts::default();

  for pass in patterns::compiled()? {
    let shape = pass.meta.shape;
    let replaced = pass.regex.replace_all(&current, |caps: &Captures| {
      let body = &caps[3];
      let lowered = body.to_lowercase();
      if lowered != body {
        edits.bump(shape);
      }
      format!("{}{}{}{}", &caps[1], &caps[2], lowered, &caps[4])
    });

    // replace_all allocates whenever anything matched, even if no case
    // changed; only keep an owned copy when the text really differs.
    if let Cow::Owned(s) = replaced {
      if s != *current {
        current = Cow::Owned(s);
      }
    }
  }

  Ok(Rewrite { text: current, edits })
}

#[cfg(test)]
fn lower(text: &str) -> (String, EditCounts, bool) {
  let r = lowercase_imports(text).unwrap();
  let changed = r.changed();
  (r.text.into_owned(), r.edits, changed)
}

#[test]
fn alias_from_import_is_lowercased() {
  let (out, edits, changed) = lower(r#"import { Foo } from "@/Components/Foo";"#);
  assert_eq!(out, r#"import { Foo } from "@/components/foo";"#);
  assert_eq!(edits.from_clause, 1);
  assert!(changed);
}

#[test]
fn side_effect_import_is_lowercased() {
  let (out, edits, changed) = lower(r#"import "./Styles/Bar.CSS";"#);
  assert_eq!(out, r#"import "./styles/bar.css";"#);
  assert_eq!(edits.side_effect, 1);
  assert!(changed);
}

#[test]
fn dynamic_import_is_lowercased() {
  let (out, edits, changed) = lower(r#"const x = import("../Utils/Helper");"#);
  assert_eq!(out, r#"const x = import("../utils/helper");"#);
  assert_eq!(edits.dynamic, 1);
  assert!(changed);
}

#[test]
fn dynamic_import_with_inner_whitespace() {
  let (out, _, _) = lower("await import ( './Lazy/Page' )");
  assert_eq!(out, "await import ( './lazy/page' )");
}

#[test]
fn bare_package_is_left_alone() {
  let (out, edits, changed) = lower(r#"import React from "react";"#);
  assert_eq!(out, r#"import React from "react";"#);
  assert_eq!(edits.total(), 0);
  assert!(!changed);
}

#[test]
fn already_lowercase_is_unchanged() {
  let (_, edits, changed) = lower(r#"import "@/already/lowercase";"#);
  assert_eq!(edits.total(), 0);
  assert!(!changed);
}

#[test]
fn export_from_is_lowercased() {
  let (out, edits, _) = lower("export * from './Models/User';\nexport { A } from \"../Shared/A\";");
  assert_eq!(out, "export * from './models/user';\nexport { A } from \"../shared/a\";");
  assert_eq!(edits.from_clause, 2);
}

#[test]
fn two_imports_on_one_line_are_both_rewritten() {
  let src = r#"import a from "react"; import B from "./B/Comp"; import C from "@/C";"#;
  let (out, edits, _) = lower(src);
  assert_eq!(
    out,
    r#"import a from "react"; import B from "./b/comp"; import C from "@/c";"#
  );
  assert_eq!(edits.from_clause, 2);
}

#[test]
fn non_import_text_is_untouched() {
  let src = concat!(
    "// import Foo from \"./Foo\" is how you'd do it\n",
    "const path = \"./Some/Path\";\n",
    "const Upper = require(\"./Req/Thing\");\n",
    "important(\"./Not/An/Import\");\n",
  );
  let (out, _, _) = lower(src);
  // the comment really is an import statement textually; everything else is not
  assert_eq!(out, src.replace("\"./Foo\"", "\"./foo\""));
}

#[test]
fn marker_and_quotes_are_preserved() {
  let (out, _, _) = lower("import X from '../../Deep/X';");
  assert!(out.starts_with("import X from '../"));
  assert!(out.ends_with("';"));
  assert_eq!(out, "import X from '../../deep/x';");
}

#[test]
fn query_suffix_is_lowercased_blindly() {
  let (out, _, _) = lower(r#"import Icon from "./Icon.SVG?React";"#);
  assert_eq!(out, r#"import Icon from "./icon.svg?react";"#);
}

#[test]
fn multiline_named_import_is_not_matched() {
  // `.` does not cross newlines, so the brace list spanning lines hides `from`
  let src = "import {\n  A,\n  B,\n} from \"./Mod\";";
  let (out, _, changed) = lower(src);
  assert_eq!(out, src);
  assert!(!changed);
}

#[test]
fn lowercasing_is_idempotent() {
  let src = "import A from \"@/A/B\";\nimport \"./C.CSS\";\nconst d = import('../D');\n";
  let (once, _, _) = lower(src);
  let (twice, edits, changed) = lower(&once);
  assert_eq!(once, twice);
  assert_eq!(edits.total(), 0);
  assert!(!changed);
}

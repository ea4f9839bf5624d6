use crate::patterns::{ImportShape, Pattern};

// Capture groups for every entry: 1 = prefix up to the opening quote,
// 2 = path-root marker, 3 = path body, 4 = closing punctuation.
pub const PATTERNS: &[Pattern] = &[
  Pattern {
    id: "from_clause",
    description: "import/export ... from \"<marker><path>\"",
    shape: ImportShape::FromClause,
    regex: r#"((?:import|export)\s+.*?\s+from\s+['"])(@/|\./|\.\./)([^'"]+)(['"])"#,
  },
  Pattern {
    id: "side_effect",
    description: "import \"<marker><path>\"",
    shape: ImportShape::SideEffect,
    regex: r#"(import\s+['"])(@/|\./|\.\./)([^'"]+)(['"])"#,
  },
  Pattern {
    id: "dynamic",
    description: "import(\"<marker><path>\")",
    shape: ImportShape::Dynamic,
    regex: r#"(import\s*\(\s*['"])(@/|\./|\.\./)([^'"]+)(['"]\s*\))"#,
  },
];

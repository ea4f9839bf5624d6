pub mod typescript;

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::errors::ImportCaseResult;

/// The textual form an import reference takes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ImportShape {
    /// `import { X } from "./x"` and `export * from "./x"`.
    FromClause,
    /// `import "./x.css"`, no bindings.
    SideEffect,
    /// `import("./x")`.
    Dynamic,
}

impl fmt::Display for ImportShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImportShape::FromClause => "from-clause",
            ImportShape::SideEffect => "side-effect",
            ImportShape::Dynamic => "dynamic",
        })
    }
}

/// One import shape with its regex source.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Unique identifier (snake-case preferred).
    pub id: &'static str,
    /// Human-readable explanation.
    pub description: &'static str,
    pub shape: ImportShape,
    /// Regex with four capture groups: prefix, marker, path body, suffix.
    pub regex: &'static str,
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub meta: Pattern,
    pub regex: Regex,
}

/// Compiled once per process, in pass order.
static COMPILED: LazyLock<Result<Vec<CompiledPattern>, regex::Error>> = LazyLock::new(|| {
    let compiled = typescript::PATTERNS
        .iter()
        .map(|p| {
            tracing::trace!(id = p.id, shape = %p.shape, "compiling {}", p.description);
            Regex::new(p.regex).map(|regex| CompiledPattern {
                meta: p.clone(),
                regex,
            })
        })
        .collect::<Result<Vec<_>, _>>();

    if let Ok(v) = &compiled {
        tracing::debug!("import-pattern registry initialised ({} patterns)", v.len());
    }
    compiled
});

/// Return the compiled passes in the order they must be applied.
pub fn compiled() -> ImportCaseResult<&'static [CompiledPattern]> {
    match &*COMPILED {
        Ok(v) => Ok(v.as_slice()),
        Err(e) => Err(e.clone().into()),
    }
}

#[test]
fn compiled_keeps_pass_order() {
    let shapes: Vec<_> = compiled()
        .unwrap()
        .iter()
        .map(|p| p.meta.shape)
        .collect();
    assert_eq!(
        shapes,
        vec![ImportShape::FromClause, ImportShape::SideEffect, ImportShape::Dynamic]
    );
}

#[test]
fn every_pattern_has_four_groups() {
    for p in compiled().unwrap() {
        // group 0 is the whole match
        assert_eq!(p.regex.captures_len(), 5, "pattern {}", p.meta.id);
    }
}

#[test]
fn every_pattern_requires_a_marker() {
    for p in compiled().unwrap() {
        for marker in ["@/", "./", "../"] {
            assert!(
                p.meta.regex.contains(&regex::escape(marker)),
                "pattern {} lacks marker {marker}",
                p.meta.id
            );
        }
    }
}

#[test]
fn shapes_do_not_overlap() {
    let samples = [
        (ImportShape::FromClause, r#"import { Foo } from "@/Foo";"#),
        (ImportShape::SideEffect, r#"import "./Bar.css";"#),
        (ImportShape::Dynamic, r#"const x = import("../Baz");"#),
    ];
    for (shape, text) in samples {
        let hits: Vec<_> = compiled()
            .unwrap()
            .iter()
            .filter(|p| p.regex.is_match(text))
            .map(|p| p.meta.shape)
            .collect();
        assert_eq!(hits, vec![shape], "text: {text}");
    }
}

#[test]
fn shape_display_is_kebab_case() {
    assert_eq!(ImportShape::FromClause.to_string(), "from-clause");
    assert_eq!(ImportShape::SideEffect.to_string(), "side-effect");
    assert_eq!(ImportShape::Dynamic.to_string(), "dynamic");
}

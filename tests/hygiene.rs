//! Hygiene: source-level rules for the engine's production code.
//!
//! Every rule has a budget of zero. Test files (`*_test.rs`) are exempt, and
//! comment lines are skipped so prose never trips a rule.

use std::fs;
use std::path::Path;

struct SourceFile {
    name: String,
    content: String,
}

/// Which production files a rule applies to.
enum Scope {
    All,
    /// Every file except the named ones.
    Except(&'static [&'static str]),
    /// Only the named files.
    Only(&'static [&'static str]),
}

impl Scope {
    fn covers(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Except(names) => !names.contains(&name),
            Self::Only(names) => names.contains(&name),
        }
    }
}

struct Rule {
    patterns: &'static [&'static str],
    scope: Scope,
    reason: &'static str,
}

/// Modules doing coordinate and zoom arithmetic. Numeric casts there can
/// truncate or lose precision silently.
const MATH_MODULES: &[&str] = &["space.rs", "zoom.rs", "scroll.rs", "drag.rs", "resize.rs", "transform.rs", "pan.rs"];

const RULES: &[Rule] = &[
    Rule {
        patterns: &[".unwrap()", ".expect(", "panic!(", "unreachable!(", "todo!(", "unimplemented!("],
        scope: Scope::All,
        reason: "event handlers degrade to no action instead of panicking",
    },
    Rule {
        patterns: &["let _ =", ".ok()", "Err(_) =>", "Err(_) |"],
        scope: Scope::All,
        reason: "errors are matched by variant or propagated, never dropped",
    },
    Rule {
        patterns: &[" as f64", " as f32", " as usize", " as i64", " as i32", " as u64", " as u32", " as u8"],
        scope: Scope::Only(MATH_MODULES),
        reason: "geometry stays in f64 without casts",
    },
    Rule {
        patterns: &["env::var"],
        scope: Scope::Except(&["config.rs"]),
        reason: "environment reads go through EditorConfig",
    },
    Rule {
        patterns: &["println!(", "eprintln!(", "dbg!("],
        scope: Scope::Except(&["main.rs"]),
        reason: "library code reports through tracing",
    },
    Rule {
        patterns: &["#[allow(dead_code)]", "#[allow(unused"],
        scope: Scope::All,
        reason: "unused code is deleted, not silenced",
    },
];

fn source_files() -> Vec<SourceFile> {
    let Ok(entries) = fs::read_dir(Path::new("src")) else {
        return Vec::new();
    };
    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "rs"))
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            if name.ends_with("_test.rs") {
                return None;
            }
            let content = fs::read_to_string(&path).ok()?;
            Some(SourceFile { name, content })
        })
        .collect()
}

/// `file:line` for every non-comment line containing `pattern`.
fn violations(file: &SourceFile, pattern: &str) -> Vec<String> {
    file.content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .filter(|(_, line)| line.contains(pattern))
        .map(|(i, _)| format!("  {}:{} `{pattern}`", file.name, i + 1))
        .collect()
}

#[test]
fn production_code_follows_rules() {
    let files = source_files();
    let mut report = Vec::new();
    for rule in RULES {
        let hits: Vec<String> = files
            .iter()
            .filter(|f| rule.scope.covers(&f.name))
            .flat_map(|f| rule.patterns.iter().flat_map(move |p| violations(f, p)))
            .collect();
        if !hits.is_empty() {
            report.push(format!("{}:\n{}", rule.reason, hits.join("\n")));
        }
    }
    assert!(report.is_empty(), "hygiene violations:\n{}", report.join("\n"));
}

#[test]
fn rules_see_the_whole_crate() {
    let files = source_files();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    for expected in ["engine.rs", "config.rs", "main.rs"] {
        assert!(names.contains(&expected), "scan missed {expected}");
    }
    for module in MATH_MODULES {
        assert!(names.contains(module), "math module {module} not found");
    }
}

#[test]
fn scopes_select_files() {
    assert!(Scope::All.covers("engine.rs"));
    assert!(!Scope::Except(&["main.rs"]).covers("main.rs"));
    assert!(Scope::Except(&["main.rs"]).covers("replay.rs"));
    assert!(Scope::Only(MATH_MODULES).covers("zoom.rs"));
    assert!(!Scope::Only(MATH_MODULES).covers("config.rs"));
}

#[test]
fn hand_written_error_discard_is_caught() {
    let file = SourceFile {
        name: "sample.rs".into(),
        content: "match std::env::var(key) {\n    Ok(v) => Some(v),\n    Err(_) => None,\n}\n// Err(_) => in a comment\n"
            .into(),
    };
    assert_eq!(violations(&file, "Err(_) =>"), vec!["  sample.rs:3 `Err(_) =>`".to_string()]);
}

use anyhow::{Context, Result};
use dashmap::DashMap;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

use crate::{
    comments::strip_comments,
    normalizer::{BuiltinModules, package_name},
    types::{ImportKind, ImportMatch},
};

// `import <clause> from 'x'` (default, named, namespace, `type` forms)
static IMPORT_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\b\s*([\w$*{},\s]+?)\s*\bfrom\s*['"]([^'"\n]+)['"]"#).unwrap()
});
static SIDE_EFFECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bimport\s*['"]([^'"\n]+)['"]"#).unwrap());
static DYNAMIC_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bimport\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#).unwrap());
static REQUIRE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\brequire\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#).unwrap());
// `import [type] X = require('x')`
static IMPORT_EQUALS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s+(type\s+)?[\w$]+\s*=\s*require\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#)
        .unwrap()
});
// `export [type] * [as ns] from 'x'` and `export [type] { … } from 'x'`
static EXPORT_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\bexport\s*(type\b\s*)?(\*(?:\s*as\s+[\w$]+)?|\{[^}]*\})\s*from\s*['"]([^'"\n]+)['"]"#,
    )
    .unwrap()
});
// Brace-first named lists; never matches `import type {` / `export type {`
static BRACE_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:import|export)\s*\{([^}]*)\}\s*from\s*['"]([^'"\n]+)['"]"#).unwrap()
});

/// Classifies the package references in JS/TS source text.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    builtins: BuiltinModules,
}

/// A match tagged with its byte offset, used to restore source order.
type Tagged = (usize, ImportMatch);

impl Classifier {
    pub fn new(builtins: BuiltinModules) -> Self {
        Self { builtins }
    }

    /// Returns every package reference in `content`, in source order.
    pub fn classify(&self, content: &str) -> Vec<ImportMatch> {
        let text = strip_comments(content);
        let lines = LineIndex::new(&text);

        let mut tagged = self.generic_pass(&text, &lines);
        tagged.extend(self.type_only_pass(&text, &lines));
        tagged.extend(self.mixed_pass(&text, &lines));

        tagged.sort_by_key(|(offset, _)| *offset);
        tagged.dedup();
        tagged.into_iter().map(|(_, m)| m).collect()
    }

    /// Value imports, side-effect imports, `require`, `import()` and re-exports.
    fn generic_pass(&self, text: &str, lines: &LineIndex) -> Vec<Tagged> {
        let mut out = Vec::new();

        for caps in IMPORT_FROM_RE.captures_iter(text) {
            let clause = caps[1].trim();
            if is_type_only_clause(clause) || (clause.starts_with('{') && has_inline_type(clause)) {
                continue;
            }
            self.emit(&mut out, lines, &caps, &caps[2], ImportKind::Runtime);
        }
        for caps in EXPORT_FROM_RE.captures_iter(text) {
            let list = &caps[2];
            if caps.get(1).is_some() || (list.starts_with('{') && has_inline_type(list)) {
                continue;
            }
            self.emit(&mut out, lines, &caps, &caps[3], ImportKind::Runtime);
        }
        let type_requires: Vec<Range<usize>> = IMPORT_EQUALS_RE
            .captures_iter(text)
            .filter(|caps| caps.get(1).is_some())
            .filter_map(|caps| caps.get(0).map(|m| m.range()))
            .collect();
        for caps in REQUIRE_RE.captures_iter(text) {
            let start = caps.get(0).map_or(0, |m| m.start());
            if type_requires.iter().any(|r| r.contains(&start)) {
                continue;
            }
            self.emit(&mut out, lines, &caps, &caps[1], ImportKind::Runtime);
        }
        for re in [&*SIDE_EFFECT_RE, &*DYNAMIC_IMPORT_RE] {
            for caps in re.captures_iter(text) {
                self.emit(&mut out, lines, &caps, &caps[1], ImportKind::Runtime);
            }
        }

        out
    }

    /// `import type …`, `export type …` and `import type X = require(…)`.
    fn type_only_pass(&self, text: &str, lines: &LineIndex) -> Vec<Tagged> {
        let mut out = Vec::new();

        for caps in IMPORT_FROM_RE.captures_iter(text) {
            if is_type_only_clause(caps[1].trim()) {
                self.emit(&mut out, lines, &caps, &caps[2], ImportKind::TypeOnly);
            }
        }
        for caps in EXPORT_FROM_RE.captures_iter(text) {
            if caps.get(1).is_some() {
                self.emit(&mut out, lines, &caps, &caps[3], ImportKind::TypeOnly);
            }
        }
        for caps in IMPORT_EQUALS_RE.captures_iter(text) {
            if caps.get(1).is_some() {
                self.emit(&mut out, lines, &caps, &caps[2], ImportKind::TypeOnly);
            }
        }

        out
    }

    /// Named lists mixing `type` bindings with value bindings.
    fn mixed_pass(&self, text: &str, lines: &LineIndex) -> Vec<Tagged> {
        let mut out = Vec::new();

        for caps in BRACE_LIST_RE.captures_iter(text) {
            let list = &caps[1];
            if !has_inline_type(list) {
                continue;
            }
            let kind = if bindings(list).all(is_type_binding) {
                ImportKind::TypeOnly
            } else {
                ImportKind::Runtime
            };
            self.emit(&mut out, lines, &caps, &caps[2], kind);
        }

        out
    }

    fn emit(
        &self,
        out: &mut Vec<Tagged>,
        lines: &LineIndex,
        caps: &Captures<'_>,
        specifier: &str,
        kind: ImportKind,
    ) {
        let Some(name) = package_name(specifier) else {
            trace!("Skipping non-package specifier: '{}'", specifier);
            return;
        };
        if self.builtins.is_builtin(name) {
            trace!("Skipping builtin module: '{}'", specifier);
            return;
        }

        let Some(whole) = caps.get(0) else {
            return;
        };
        let statement = whole.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
        out.push((
            whole.start(),
            ImportMatch {
                package: name.to_string(),
                kind,
                line: lines.line_of(whole.start()),
                statement,
            },
        ));
    }
}

/// `type X`, `type { X }`, `type * as X`; a bare `type` is a default binding.
fn is_type_only_clause(clause: &str) -> bool {
    clause.strip_prefix("type").is_some_and(|rest| {
        rest.starts_with(|c: char| c.is_whitespace() || c == '{' || c == '*')
            && !rest.trim().is_empty()
    })
}

fn bindings(list: &str) -> impl Iterator<Item = &str> {
    list.trim_matches(|c| c == '{' || c == '}')
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

fn has_inline_type(list: &str) -> bool {
    bindings(list).any(is_type_binding)
}

fn is_type_binding(binding: &str) -> bool {
    let Some(rest) = binding.strip_prefix("type") else {
        return false;
    };
    if !rest.starts_with(char::is_whitespace) {
        return false;
    }
    // `type as alias` renames a value export called `type`
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    !(tokens.len() == 2 && tokens[0] == "as")
}

struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        Self { newlines: text.match_indices('\n').map(|(i, _)| i).collect() }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }
}

/// Reads and classifies `file`, memoizing the result per path.
pub fn imports_for(
    file: &Path,
    classifier: &Classifier,
    cache: &DashMap<PathBuf, Vec<ImportMatch>>,
) -> Result<Vec<ImportMatch>> {
    let file_buf = file.to_path_buf();
    if let Some(v) = cache.get(&file_buf) {
        trace!("Cache hit for imports: {}", file.display());
        return Ok(v.clone());
    }
    trace!("Scanning file for imports: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let matches = classifier.classify(&src);

    debug!("Found {} package references in {}", matches.len(), file.display());
    cache.insert(file_buf, matches.clone());
    Ok(matches)
}

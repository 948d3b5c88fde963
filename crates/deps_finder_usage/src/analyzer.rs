use deps_finder_core::{DeclaredDependency, DependencyTier, ImportFinding, ImportLocation};
use log::{debug, trace};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::PathBuf,
};

use crate::types::{
    AnalysisResult, AnalyzerOptions, DependencyUsage, IgnoredPackages, UsedPackage,
};

/// How one package is referenced across all analyzed files
#[derive(Debug, Default)]
struct PackageUsage<'a> {
    runtime: usize,
    type_only: bool,
    /// Runtime locations outside production config files
    shipped: Vec<&'a ImportLocation>,
}

/// Reconciles declared dependencies with the imports found in source.
///
/// Never fails: absent tiers or an empty finding set just produce empty lists.
pub fn analyze(
    declared: &[DeclaredDependency],
    findings: &[ImportFinding],
    options: &AnalyzerOptions,
) -> AnalysisResult {
    debug!(
        "Analyzing {} declared dependencies against {} findings (check_all: {})",
        declared.len(),
        findings.len(),
        options.check_all
    );

    let mut usage: HashMap<&str, PackageUsage> = HashMap::new();
    for finding in findings {
        let entry = usage.entry(finding.package.as_str()).or_default();
        if finding.kind.is_runtime() {
            entry.runtime += 1;
            if !finding.production_config {
                entry.shipped.push(&finding.location);
            }
        } else {
            entry.type_only = true;
        }
    }
    debug!("{} distinct packages referenced", usage.len());

    let ignored_by_option =
        |name: &str| options.ignored_packages.iter().any(|p| matches_pattern(p, name));
    let ignored_by_default =
        |name: &str| options.default_ignored.iter().any(|p| matches_pattern(p, name));

    let checked: BTreeSet<&str> = declared
        .iter()
        .filter(|d| options.check_all || d.tier != DependencyTier::DevDependencies)
        .map(|d| d.name.as_str())
        .collect();
    let all_declared: BTreeSet<&str> = declared.iter().map(|d| d.name.as_str()).collect();
    trace!("Checking {} of {} declared names", checked.len(), all_declared.len());

    let reportable = |name: &str| !ignored_by_option(name) && !ignored_by_default(name);

    let unused: Vec<String> = checked
        .iter()
        .copied()
        .filter(|&name| !usage.contains_key(name) && reportable(name))
        .map(str::to_string)
        .collect();

    let type_only: Vec<String> = checked
        .iter()
        .copied()
        .filter(|&name| usage.get(name).is_some_and(|u| u.type_only && u.runtime == 0))
        .filter(|&name| reportable(name))
        .map(str::to_string)
        .collect();

    let misplaced = if options.check_all {
        Vec::new()
    } else {
        find_misplaced(declared, &usage, &ignored_by_option)
    };

    let mut used: Vec<UsedPackage> = all_declared
        .iter()
        .copied()
        .filter_map(|name| {
            let count = usage.get(name).map_or(0, |u| u.runtime);
            (count > 0).then(|| UsedPackage { name: name.to_string(), count })
        })
        .collect();
    used.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    let ignored = IgnoredPackages {
        type_only: type_only.clone(),
        by_default: all_declared
            .iter()
            .copied()
            .filter(|&name| ignored_by_default(name) && !ignored_by_option(name))
            .map(str::to_string)
            .collect(),
        by_option: all_declared
            .iter()
            .copied()
            .filter(|&name| ignored_by_option(name))
            .map(str::to_string)
            .collect(),
    };

    let total_issues = unused.len() + misplaced.len();
    debug!(
        "Analysis complete: {} unused, {} misplaced, {} type-only",
        unused.len(),
        misplaced.len(),
        type_only.len()
    );

    AnalysisResult { used, unused, misplaced, type_only, ignored, total_issues }
}

/// Dev-declared packages imported at runtime by code that ships.
fn find_misplaced(
    declared: &[DeclaredDependency],
    usage: &HashMap<&str, PackageUsage<'_>>,
    ignored_by_option: &impl Fn(&str) -> bool,
) -> Vec<DependencyUsage> {
    let dev: BTreeSet<&str> = declared
        .iter()
        .filter(|d| d.tier == DependencyTier::DevDependencies)
        .map(|d| d.name.as_str())
        .collect();

    dev.into_iter()
        .filter(|&name| !ignored_by_option(name))
        .filter_map(|name| {
            let package_usage = usage.get(name)?;
            if package_usage.shipped.is_empty() {
                return None;
            }
            trace!("{} is dev-declared but used at runtime", name);
            Some(DependencyUsage {
                package_name: name.to_string(),
                locations: dedup_locations(&package_usage.shipped),
            })
        })
        .collect()
}

/// Drops repeated `(file, line)` pairs, keeping the first, sorted by position.
fn dedup_locations(locations: &[&ImportLocation]) -> Vec<ImportLocation> {
    let mut unique: BTreeMap<(PathBuf, usize), ImportLocation> = BTreeMap::new();
    for location in locations {
        unique
            .entry((location.file.clone(), location.line))
            .or_insert_with(|| (*location).clone());
    }
    unique.into_values().collect()
}

/// Exact name, or a prefix match when the pattern ends in `*` (`@types/*`).
fn matches_pattern(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => pattern == name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deps_finder_core::{Classifier, ImportKind, Manifest};
    use std::path::Path;

    fn finding(package: &str, kind: ImportKind, file: &str, line: usize) -> ImportFinding {
        ImportFinding {
            package: package.to_string(),
            kind,
            location: ImportLocation {
                file: PathBuf::from(file),
                line,
                import_statement: format!("import '{}'", package),
            },
            production_config: false,
        }
    }

    fn config_finding(package: &str, file: &str) -> ImportFinding {
        ImportFinding { production_config: true, ..finding(package, ImportKind::Runtime, file, 1) }
    }

    fn declared(manifest: &str) -> Vec<DeclaredDependency> {
        Manifest::parse(manifest).unwrap().declared_dependencies()
    }

    /// Classifies `source` as if it lived in `file`.
    fn findings_in(file: &str, source: &str) -> Vec<ImportFinding> {
        let production_config = deps_finder_core::is_production_config(Path::new(file));
        Classifier::default()
            .classify(source)
            .into_iter()
            .map(|m| m.into_finding(PathBuf::from(file), production_config))
            .collect()
    }

    fn misplaced_names(result: &AnalysisResult) -> Vec<&str> {
        result.misplaced.iter().map(|d| d.package_name.as_str()).collect()
    }

    #[test]
    fn test_scoped_package_is_used() {
        let declared =
            declared(r#"{ "dependencies": { "@mobily/ts-belt": "*" }, "devDependencies": {} }"#);
        let findings = findings_in("src/index.ts", "import { pipe } from '@mobily/ts-belt';");
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        assert!(result.unused.is_empty());
        assert!(result.misplaced.is_empty());
        assert_eq!(result.total_issues, 0);
    }

    #[test]
    fn test_dev_dependency_used_in_source_is_misplaced() {
        let declared =
            declared(r#"{ "devDependencies": { "express": "*", "typescript": "*" } }"#);
        let findings = findings_in("src/server.ts", "import express from 'express';");
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        assert_eq!(misplaced_names(&result), vec!["express"]);
        assert_eq!(result.misplaced[0].locations.len(), 1);
        assert_eq!(result.misplaced[0].locations[0].line, 1);
        assert_eq!(result.total_issues, 1);
    }

    #[test]
    fn test_type_only_dependency_is_not_unused() {
        let declared = declared(r#"{ "dependencies": { "type-only-lib": "*" } }"#);
        let findings = findings_in("src/types.ts", "import type { X } from 'type-only-lib';");
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        assert_eq!(result.type_only, vec!["type-only-lib"]);
        assert!(result.unused.is_empty());
        assert_eq!(result.ignored.type_only, vec!["type-only-lib"]);
        assert_eq!(result.total_issues, 0);
    }

    #[test]
    fn test_deep_import_marks_root_package_used() {
        let declared = declared(r#"{ "dependencies": { "lodash": "*" } }"#);
        let findings = findings_in("src/index.ts", "import map from 'lodash/map';");
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        assert!(result.unused.is_empty());
        assert_eq!(result.used, vec![UsedPackage { name: "lodash".to_string(), count: 1 }]);
    }

    #[test]
    fn test_runtime_use_dominates_type_only_use() {
        let declared = declared(r#"{ "dependencies": { "zod": "*" } }"#);
        let findings = vec![
            finding("zod", ImportKind::TypeOnly, "src/a.ts", 1),
            finding("zod", ImportKind::Runtime, "src/b.ts", 3),
        ];
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        assert!(result.unused.is_empty());
        assert!(result.type_only.is_empty());
    }

    #[test]
    fn test_production_config_use_is_not_misplaced() {
        let declared = declared(r#"{ "devDependencies": { "compression": "*" } }"#);
        let findings =
            findings_in("next.config.js", "const compression = require('compression');");
        assert!(findings[0].production_config);

        let result = analyze(&declared, &findings, &AnalyzerOptions::default());
        assert!(result.misplaced.is_empty());
    }

    #[test]
    fn test_misplaced_locations_exclude_config_files() {
        let declared = declared(r#"{ "devDependencies": { "sharp": "*" } }"#);
        let findings = vec![
            config_finding("sharp", "next.config.js"),
            finding("sharp", ImportKind::Runtime, "src/image.ts", 2),
        ];
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        assert_eq!(misplaced_names(&result), vec!["sharp"]);
        let files: Vec<_> = result.misplaced[0].locations.iter().map(|l| l.file.clone()).collect();
        assert_eq!(files, vec![PathBuf::from("src/image.ts")]);
    }

    #[test]
    fn test_misplaced_locations_are_deduplicated_and_sorted() {
        let declared = declared(r#"{ "devDependencies": { "chalk": "*" } }"#);
        let findings = vec![
            finding("chalk", ImportKind::Runtime, "src/z.ts", 4),
            finding("chalk", ImportKind::Runtime, "src/a.ts", 9),
            finding("chalk", ImportKind::Runtime, "src/z.ts", 4),
            finding("chalk", ImportKind::Runtime, "src/a.ts", 2),
        ];
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        let positions: Vec<_> = result.misplaced[0]
            .locations
            .iter()
            .map(|l| (l.file.to_string_lossy().to_string(), l.line))
            .collect();
        assert_eq!(positions, vec![
            ("src/a.ts".to_string(), 2),
            ("src/a.ts".to_string(), 9),
            ("src/z.ts".to_string(), 4)
        ]);
        assert_eq!(result.used[0].count, 4);
    }

    #[test]
    fn test_type_only_dev_dependency_is_not_misplaced() {
        let declared = declared(r#"{ "devDependencies": { "type-fest": "*" } }"#);
        let findings =
            findings_in("src/Button.tsx", "import type { JsonObject } from 'type-fest';");
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        assert!(result.misplaced.is_empty());
        assert!(result.type_only.is_empty());
    }

    #[test]
    fn test_dev_dependencies_unchecked_for_unused_by_default() {
        let declared = declared(r#"{ "devDependencies": { "jest": "*" } }"#);
        let result = analyze(&declared, &[], &AnalyzerOptions::default());
        assert!(result.unused.is_empty());

        let all = AnalyzerOptions { check_all: true, ..AnalyzerOptions::default() };
        let result = analyze(&declared, &[], &all);
        assert_eq!(result.unused, vec!["jest"]);
    }

    #[test]
    fn test_check_all_disables_misplaced() {
        let declared = declared(r#"{ "devDependencies": { "express": "*" } }"#);
        let findings = findings_in("src/server.ts", "import express from 'express';");
        let all = AnalyzerOptions { check_all: true, ..AnalyzerOptions::default() };
        let result = analyze(&declared, &findings, &all);

        assert!(result.misplaced.is_empty());
        assert!(result.unused.is_empty());
    }

    #[test]
    fn test_ignored_packages_removed_from_every_list() {
        let declared = declared(
            r#"{
                "dependencies": { "left-pad": "*", "types-lib": "*" },
                "devDependencies": { "debug": "*" }
            }"#,
        );
        let findings = vec![
            finding("types-lib", ImportKind::TypeOnly, "src/a.ts", 1),
            finding("debug", ImportKind::Runtime, "src/a.ts", 2),
        ];
        let options = AnalyzerOptions {
            ignored_packages: vec!["left-pad".into(), "types-lib".into(), "debug".into()],
            ..AnalyzerOptions::default()
        };
        let result = analyze(&declared, &findings, &options);

        assert!(result.unused.is_empty());
        assert!(result.type_only.is_empty());
        assert!(result.misplaced.is_empty());
        assert_eq!(result.ignored.by_option, vec!["debug", "left-pad", "types-lib"]);
        assert_eq!(result.total_issues, 0);
    }

    #[test]
    fn test_ignore_patterns() {
        let declared =
            declared(r#"{ "dependencies": { "@storybook/react": "*", "@storybook/addon": "*" } }"#);
        let options = AnalyzerOptions {
            ignored_packages: vec!["@storybook/*".into()],
            ..AnalyzerOptions::default()
        };
        let result = analyze(&declared, &[], &options);
        assert!(result.unused.is_empty());
        assert_eq!(result.ignored.by_option.len(), 2);
    }

    #[test]
    fn test_default_ignored_type_packages() {
        let declared = declared(
            r#"{ "dependencies": { "typescript": "*", "@types/node": "*", "react": "*" } }"#,
        );
        let result = analyze(&declared, &[], &AnalyzerOptions::default());

        assert_eq!(result.unused, vec!["react"]);
        assert_eq!(result.ignored.by_default, vec!["@types/node", "typescript"]);
    }

    #[test]
    fn test_ignored_lists_cover_every_tier() {
        let declared = declared(
            r#"{
                "dependencies": { "react": "*" },
                "devDependencies": { "@types/react": "*", "eslint": "*" }
            }"#,
        );
        let options =
            AnalyzerOptions { ignored_packages: vec!["eslint".into()], ..AnalyzerOptions::default() };
        let result = analyze(&declared, &[], &options);

        assert_eq!(result.ignored.by_default, vec!["@types/react"]);
        assert_eq!(result.ignored.by_option, vec!["eslint"]);
        assert_eq!(result.unused, vec!["react"]);
    }

    #[test]
    fn test_runtime_typescript_import_is_still_misplaced() {
        let declared = declared(r#"{ "devDependencies": { "typescript": "*" } }"#);
        let findings = findings_in("src/utils/oops.ts", "import { something } from 'typescript';");
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        assert_eq!(misplaced_names(&result), vec!["typescript"]);
        assert_eq!(result.misplaced[0].locations[0].file, PathBuf::from("src/utils/oops.ts"));
    }

    #[test]
    fn test_used_sorted_by_count_then_name() {
        let declared = declared(r#"{ "dependencies": { "a": "*", "b": "*", "c": "*" } }"#);
        let findings = vec![
            finding("c", ImportKind::Runtime, "src/x.ts", 1),
            finding("b", ImportKind::Runtime, "src/x.ts", 2),
            finding("b", ImportKind::Runtime, "src/y.ts", 1),
            finding("a", ImportKind::Runtime, "src/y.ts", 2),
            finding("undeclared", ImportKind::Runtime, "src/y.ts", 3),
        ];
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());
        let names: Vec<_> = result.used.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_issue_lists_are_disjoint() {
        let declared = declared(
            r#"{
                "dependencies": { "unused-dep": "*", "types-dep": "*", "react": "*" },
                "devDependencies": { "express": "*" }
            }"#,
        );
        let findings = vec![
            finding("types-dep", ImportKind::TypeOnly, "src/a.ts", 1),
            finding("react", ImportKind::Runtime, "src/a.ts", 2),
            finding("express", ImportKind::Runtime, "src/a.ts", 3),
        ];
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());

        assert_eq!(result.unused, vec!["unused-dep"]);
        assert_eq!(result.type_only, vec!["types-dep"]);
        assert_eq!(misplaced_names(&result), vec!["express"]);
        assert_eq!(result.total_issues, 2);
    }

    #[test]
    fn test_empty_inputs() {
        let result = analyze(&[], &[], &AnalyzerOptions::default());
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_json_field_names() {
        let declared = declared(r#"{ "devDependencies": { "express": "*" } }"#);
        let findings = findings_in("src/server.ts", "import express from 'express';");
        let result = analyze(&declared, &findings, &AnalyzerOptions::default());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["totalIssues"], 1);
        assert_eq!(json["misplaced"][0]["packageName"], "express");
        let location = &json["misplaced"][0]["locations"][0];
        assert_eq!(location["importStatement"], "import express from 'express'");
        assert!(json["ignored"]["byDefault"].is_array());
        assert!(json["typeOnly"].is_array());
    }

    #[test]
    fn test_matches_pattern() {
        assert!(matches_pattern("@types/*", "@types/node"));
        assert!(!matches_pattern("@types/*", "types"));
        assert!(matches_pattern("react", "react"));
        assert!(!matches_pattern("react", "react-dom"));
    }
}

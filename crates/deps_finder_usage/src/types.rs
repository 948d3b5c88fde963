use deps_finder_core::{DEFAULT_IGNORED_PACKAGES, ImportLocation, PackageName};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Check `devDependencies` for unused packages too (disables misplaced checks)
    pub check_all: bool,
    /// Names or `prefix*` patterns never reported
    pub ignored_packages: Vec<String>,
    /// Names or `prefix*` patterns skipped in the unused and type-only lists
    pub default_ignored: Vec<String>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            check_all: false,
            ignored_packages: Vec::new(),
            default_ignored: DEFAULT_IGNORED_PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// A package together with where it is imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyUsage {
    pub package_name: PackageName,
    pub locations: Vec<ImportLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsedPackage {
    pub name: PackageName,
    /// Number of runtime imports
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredPackages {
    pub type_only: Vec<PackageName>,
    pub by_default: Vec<PackageName>,
    pub by_option: Vec<PackageName>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub used: Vec<UsedPackage>,
    pub unused: Vec<PackageName>,
    pub misplaced: Vec<DependencyUsage>,
    pub type_only: Vec<PackageName>,
    pub ignored: IgnoredPackages,
    pub total_issues: usize,
}

impl AnalysisResult {
    pub fn has_issues(&self) -> bool {
        self.total_issues > 0
    }
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub analysis: AnalysisResult,
    pub files_analyzed: usize,
    /// Project root that finding locations are relative to
    pub root: PathBuf,
}

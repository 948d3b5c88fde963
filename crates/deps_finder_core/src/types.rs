use serde::Serialize;
use std::{fmt, path::PathBuf};

/// Canonical, installable package identifier (`react`, `@scope/name`)
pub type PackageName = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    Runtime,
    TypeOnly,
}

impl ImportKind {
    pub fn is_runtime(self) -> bool {
        matches!(self, ImportKind::Runtime)
    }
}

/// One package reference found in a file's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMatch {
    pub package: PackageName,
    pub kind: ImportKind,
    /// 1-based line of the statement start
    pub line: usize,
    pub statement: String,
}

impl ImportMatch {
    pub fn into_finding(self, file: PathBuf, production_config: bool) -> ImportFinding {
        ImportFinding {
            package: self.package,
            kind: self.kind,
            location: ImportLocation { file, line: self.line, import_statement: self.statement },
            production_config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportLocation {
    pub file: PathBuf,
    pub line: usize,
    pub import_statement: String,
}

/// A classified import tagged with its file and that file's role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFinding {
    pub package: PackageName,
    pub kind: ImportKind,
    pub location: ImportLocation,
    /// Whether the file is a production configuration file
    pub production_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyTier {
    Dependencies,
    DevDependencies,
    PeerDependencies,
}

impl DependencyTier {
    pub const ALL: [DependencyTier; 3] = [
        DependencyTier::Dependencies,
        DependencyTier::DevDependencies,
        DependencyTier::PeerDependencies,
    ];

    /// Key of this tier in `package.json`
    pub fn key(self) -> &'static str {
        match self {
            DependencyTier::Dependencies => "dependencies",
            DependencyTier::DevDependencies => "devDependencies",
            DependencyTier::PeerDependencies => "peerDependencies",
        }
    }
}

impl fmt::Display for DependencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredDependency {
    pub name: PackageName,
    pub tier: DependencyTier,
}

impl DeclaredDependency {
    pub fn new(name: impl Into<PackageName>, tier: DependencyTier) -> Self {
        Self { name: name.into(), tier }
    }
}

//! Core utilities for deps-finder.
//!
//! This crate provides the building blocks for checking a JavaScript/TypeScript
//! project's declared dependencies against its source code, including:
//! - Normalizing import specifiers to installable package names
//! - Classifying import statements as runtime or type-only
//! - Deciding which files are scanned and which are production configs
//! - Detecting build output directories and collecting source files
//! - Reading the dependency tiers of `package.json`

mod collector;
mod comments;
mod config;
mod constants;
mod error;
mod file_roles;
mod manifest;
mod normalizer;
mod parser;
mod types;

// Re-export public API
pub use collector::collect_source_files;
pub use comments::strip_comments;
pub use config::{detect_build_directories, detect_by_heuristic, read_tsconfig_out_dir};
pub use constants::{DEFAULT_IGNORED_PACKAGES, JS_TS_EXTENSIONS};
pub use error::ManifestError;
pub use file_roles::{FileRoles, is_development_config, is_production_config};
pub use manifest::Manifest;
pub use normalizer::{BuiltinModules, package_name};
pub use parser::{Classifier, imports_for};
pub use types::{
    DeclaredDependency, DependencyTier, ImportFinding, ImportKind, ImportLocation, ImportMatch,
    PackageName,
};

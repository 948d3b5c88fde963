//! Decides which files are scanned and which count as production configs.
//!
//! Paths are expected relative to the project root: directory rules look at
//! every parent component, so an absolute path would pick up directories that
//! sit above the project.

use log::trace;
use once_cell::sync::Lazy;
use path_clean::PathClean;
use regex::{Regex, RegexSet};
use std::path::{Component, Path, PathBuf};

use crate::constants::{
    DECLARATION_SUFFIXES, DEV_CONFIG_PREFIXES, EXCLUDED_DIRECTORIES, EXCLUDED_FILENAME_PATTERNS,
    JS_TS_EXTENSIONS, PRODUCTION_CONFIG_PATTERNS,
};

static PRODUCTION_CONFIG_RE: Lazy<RegexSet> =
    Lazy::new(|| RegexSet::new(PRODUCTION_CONFIG_PATTERNS).unwrap());
static ANY_CONFIG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.config\.[A-Za-z]+$").unwrap());

#[derive(Debug, Clone, Default)]
pub struct FileRoles {
    /// Extra root-relative directories to skip, e.g. detected build output
    excluded_dirs: Vec<PathBuf>,
}

impl FileRoles {
    pub fn with_excluded_dirs(dirs: Vec<PathBuf>) -> Self {
        let excluded_dirs = dirs.into_iter().map(|d| d.clean()).collect();
        Self { excluded_dirs }
    }

    pub fn excluded_dirs(&self) -> &[PathBuf] {
        &self.excluded_dirs
    }

    /// Whether `path` should be scanned for imports at all.
    pub fn should_analyze(&self, path: &Path) -> bool {
        let Some(file_name) = file_name(path) else {
            return false;
        };
        let is_source = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| JS_TS_EXTENSIONS.contains(&ext));
        if !is_source || DECLARATION_SUFFIXES.iter().any(|s| file_name.ends_with(s)) {
            return false;
        }

        // Production configs ship with the app wherever they live
        if is_production_config(path) {
            return true;
        }
        if is_development_config(path) {
            trace!("Skipping development config: {}", path.display());
            return false;
        }
        if EXCLUDED_FILENAME_PATTERNS.iter().any(|p| file_name.contains(p)) {
            trace!("Skipping test or story file: {}", path.display());
            return false;
        }

        if in_excluded_directory(path) {
            trace!("Skipping file in excluded directory: {}", path.display());
            return false;
        }

        let cleaned = path.clean();
        if self.excluded_dirs.iter().any(|d| cleaned.starts_with(d)) {
            trace!("Skipping file in build output: {}", path.display());
            return false;
        }

        true
    }
}

/// Bundler/framework configuration whose imports are runtime dependencies.
pub fn is_production_config(path: &Path) -> bool {
    file_name(path).is_some_and(|name| PRODUCTION_CONFIG_RE.is_match(name))
}

/// Test-runner, linter and other tooling configuration.
pub fn is_development_config(path: &Path) -> bool {
    file_name(path).is_some_and(|name| {
        !PRODUCTION_CONFIG_RE.is_match(name)
            && (DEV_CONFIG_PREFIXES.iter().any(|p| name.starts_with(p))
                || ANY_CONFIG_RE.is_match(name))
    })
}

fn in_excluded_directory(path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };
    parent.components().any(|c| match c {
        Component::Normal(name) => {
            name.to_str().is_some_and(|n| EXCLUDED_DIRECTORIES.contains(&n))
        }
        _ => false,
    })
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

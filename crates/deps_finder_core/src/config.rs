use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{comments::strip_comments, constants::BUILD_DIR_SUFFIXES};

static OUT_DIR_FLAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"--outDir[=\s]+['"]?([^\s'"&;|]+)"#).unwrap());

/// Root-relative directories that hold build output and must not be scanned.
///
/// Combines `compilerOptions.outDir` from `tsconfig.json`, `--outDir` flags in
/// `package.json` scripts and top-level directories named like build output.
/// Missing or unparsable files contribute nothing.
pub fn detect_build_directories(root: &Path) -> Vec<PathBuf> {
    debug!("Detecting build directories under {}", root.display());
    let mut dirs = BTreeSet::new();

    if let Some(out_dir) = read_tsconfig_out_dir(root) {
        trace!("tsconfig outDir: {:?}", out_dir);
        dirs.insert(out_dir);
    }
    let scripts = read_json(&root.join("package.json")).and_then(|v| v.get("scripts").cloned());
    if let Some(scripts) = scripts {
        dirs.extend(out_dirs_from_scripts(&scripts));
    }
    dirs.extend(detect_by_heuristic(root));

    debug!("Detected {} build directories", dirs.len());
    dirs.into_iter().collect()
}

pub fn read_tsconfig_out_dir(root: &Path) -> Option<PathBuf> {
    let tsconfig = read_json(&root.join("tsconfig.json"))?;
    tsconfig
        .get("compilerOptions")
        .and_then(|c| c.get("outDir"))
        .and_then(|d| d.as_str())
        .map(|d| PathBuf::from(d.trim_start_matches("./")))
}

fn out_dirs_from_scripts(scripts: &Value) -> Vec<PathBuf> {
    let Some(scripts) = scripts.as_object() else {
        return Vec::new();
    };
    scripts
        .values()
        .filter_map(|s| s.as_str())
        .flat_map(|s| OUT_DIR_FLAG_RE.captures_iter(s))
        .map(|caps| PathBuf::from(caps[1].trim_start_matches("./")))
        .inspect(|d| trace!("Found --outDir in scripts: {:?}", d))
        .collect()
}

/// Top-level directories whose names end like build output (`storybook-static`).
pub fn detect_by_heuristic(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter(|name| BUILD_DIR_SUFFIXES.iter().any(|s| name.ends_with(s)))
        .map(PathBuf::from)
        .collect();
    dirs.sort();
    dirs
}

fn read_json(path: &Path) -> Option<Value> {
    let content = fs::read_to_string(path).ok()?;
    // tsconfig files routinely carry comments
    match serde_json::from_str(&strip_comments(&content)) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!("Ignoring unparsable {}: {}", path.display(), e);
            None
        }
    }
}

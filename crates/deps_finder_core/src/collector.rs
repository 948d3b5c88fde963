use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace, warn};
use std::path::{Path, PathBuf};

use crate::file_roles::FileRoles;

/// Directories never descended into, whatever the role rules say
const PRUNED_DIRECTORIES: &[&str] = &["node_modules", ".git"];

/// Walks `root` and returns the files `roles` selects for analysis.
pub fn collect_source_files(root: &Path, roles: &FileRoles) -> Result<Vec<PathBuf>> {
    debug!("Collecting source files");
    let mut files: Vec<PathBuf> = Vec::new();
    debug!("Walking directory tree from root: {}", root.display());
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(true)
        .git_ignore(true)
        .filter_entry(|e| {
            e.file_name().to_str().is_none_or(|name| !PRUNED_DIRECTORIES.contains(&name))
        })
        .build();

    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        let rel_path = p.strip_prefix(root).unwrap_or(p);
        if roles.should_analyze(rel_path) {
            trace!("Found source file: {}", rel_path.display());
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    debug!("Collected {} source files", files.len());
    Ok(files)
}

use anyhow::{Context, Result};
use dashmap::DashMap;
use deps_finder_core::{
    Classifier, FileRoles, ImportFinding, ImportMatch, Manifest, collect_source_files,
    detect_build_directories, imports_for, is_production_config,
};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{path::PathBuf, thread};

use crate::{analyzer::analyze, config::Config, types::CheckResult};

pub fn run_usage_check(cfg: &Config) -> Result<CheckResult> {
    info!("Starting dependency usage check");

    let root = cfg
        .root
        .canonicalize()
        .with_context(|| format!("Project root not found: {}", cfg.root.display()))?;
    info!("Using root directory: {}", root.display());

    let manifest = Manifest::read(&cfg.package_json_path())?;
    let declared = manifest.declared_dependencies();
    debug!(
        "Manifest {} declares {} dependencies",
        manifest.name.as_deref().unwrap_or("<unnamed>"),
        declared.len()
    );

    let build_dirs = detect_build_directories(&root);
    debug!("Skipping build directories: {:?}", build_dirs);
    let roles = FileRoles::with_excluded_dirs(build_dirs);

    let files = collect_source_files(&root, &roles)?;
    if files.is_empty() {
        warn!("No source files found under {}", root.display());
    }
    info!("Processing {} source files in parallel", files.len());

    let classifier = Classifier::default();
    let import_cache: DashMap<PathBuf, Vec<ImportMatch>> = DashMap::new();

    let findings: Vec<ImportFinding> = files
        .par_iter()
        .flat_map(|file| {
            trace!("Thread {:?} processing: {}", thread::current().id(), file.display());
            let matches = match imports_for(file, &classifier, &import_cache) {
                Ok(matches) => matches,
                Err(e) => {
                    warn!("Skipping {}: {:#}", file.display(), e);
                    return vec![];
                }
            };

            let rel = file.strip_prefix(&root).unwrap_or(file).to_path_buf();
            let production_config = is_production_config(&rel);
            if production_config {
                trace!("Production config: {}", rel.display());
            }
            matches.into_iter().map(|m| m.into_finding(rel.clone(), production_config)).collect()
        })
        .collect();
    debug!("Collected {} findings from {} files", findings.len(), import_cache.len());

    let analysis = analyze(&declared, &findings, &cfg.analyzer_options());
    info!("Dependency usage check complete. Found {} issues", analysis.total_issues);

    Ok(CheckResult { analysis, files_analyzed: import_cache.len(), root })
}

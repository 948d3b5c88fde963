//! Dependency usage analysis for JavaScript/TypeScript projects.
//!
//! This crate checks the dependencies declared in `package.json` against the
//! imports found in a project's source files and reports packages that are
//! unused, declared in `devDependencies` but shipped at runtime, or only used
//! for type information.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use clap::Parser;
//! use deps_finder_usage::{Config, run_usage_check};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::parse_from(["deps-finder", "--root", "/path/to/project"]);
//!
//! let result = run_usage_check(&cfg)?;
//!
//! // Use buffered output for better performance
//! let mut stdout = BufWriter::new(std::io::stdout());
//! deps_finder_usage::print_report(&mut stdout, &result, cfg.format())?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod checker;
mod config;
mod reporter;
mod types;

// Re-export public API
pub use analyzer::analyze;
pub use checker::run_usage_check;
pub use config::Config;
pub use reporter::{print_json, print_report, print_text};
pub use types::{
    AnalysisResult, AnalyzerOptions, CheckResult, DependencyUsage, IgnoredPackages, OutputFormat,
    UsedPackage,
};

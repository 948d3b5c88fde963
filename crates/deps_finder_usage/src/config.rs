use clap::Parser;
use std::path::PathBuf;

use crate::types::{AnalyzerOptions, OutputFormat};

#[derive(Debug, Clone, Parser)]
#[command(name = "deps-finder")]
#[command(about = "Find unused and misplaced dependencies in JavaScript/TypeScript projects")]
pub struct Config {
    /// Root directory of the project
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Path to package.json (defaults to <root>/package.json)
    #[arg(long)]
    pub package_json: Option<PathBuf>,

    /// Output as text (default)
    #[arg(short, long, conflicts_with = "json")]
    pub text: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Check all dependencies including devDependencies
    #[arg(short, long)]
    pub all: bool,

    /// Ignore specific packages (comma-separated, `@scope/*` patterns allowed)
    #[arg(short, long, value_delimiter = ',')]
    pub ignore: Vec<String>,
}

impl Config {
    pub fn format(&self) -> OutputFormat {
        if self.json { OutputFormat::Json } else { OutputFormat::Text }
    }

    pub fn package_json_path(&self) -> PathBuf {
        self.package_json.clone().unwrap_or_else(|| self.root.join("package.json"))
    }

    pub fn ignored_packages(&self) -> Vec<String> {
        self.ignore.iter().map(|p| p.trim()).filter(|p| !p.is_empty()).map(str::to_string).collect()
    }

    pub fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            check_all: self.all,
            ignored_packages: self.ignored_packages(),
            ..AnalyzerOptions::default()
        }
    }
}

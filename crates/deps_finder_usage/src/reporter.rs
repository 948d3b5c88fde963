use std::{
    collections::BTreeSet,
    env,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use colored::Colorize;
use log::{debug, trace};

use deps_finder_core::ImportLocation;

use crate::types::{AnalysisResult, CheckResult, DependencyUsage, OutputFormat, UsedPackage};

const REPORT_TITLE: &str = "Dependency Analysis Report";
const SEPARATOR_WIDTH: usize = 60;

/// `file:line` of a location, relative to the working directory when possible.
fn display_location(root: &Path, location: &ImportLocation) -> String {
    let absolute = root.join(&location.file);
    let shown = env::current_dir()
        .ok()
        .and_then(|cwd| relative_path(&absolute, &cwd))
        .unwrap_or_else(|| location.file.clone());
    trace!("Displaying {:?} as {:?}", location.file, shown);
    format!("{}:{}", shown.display(), location.line)
}

/// Path leading from `base` to `target`; `None` when they share no root.
fn relative_path(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component<'_>> = target.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();
    if target.first() != base.first() {
        return None;
    }

    let common = target.iter().zip(&base).take_while(|(t, b)| t == b).count();
    let mut rel: PathBuf = base[common..].iter().map(|_| Component::ParentDir).collect();
    rel.extend(
        target[common..]
            .iter()
            .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir)),
    );

    if rel.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(rel) }
}

pub fn print_report<W: Write>(
    writer: &mut W,
    result: &CheckResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => print_json(writer, &result.analysis),
        OutputFormat::Text => print_text(writer, result),
    }
}

pub fn print_json<W: Write>(writer: &mut W, analysis: &AnalysisResult) -> io::Result<()> {
    debug!("Printing JSON report");
    serde_json::to_writer_pretty(&mut *writer, analysis)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn print_text<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    let analysis = &result.analysis;
    debug!(
        "Printing text report: {} unused, {} misplaced, {} type-only",
        analysis.unused.len(),
        analysis.misplaced.len(),
        analysis.type_only.len()
    );

    writeln!(writer)?;
    print_separator(writer)?;
    writeln!(writer, "  {}", REPORT_TITLE.cyan())?;
    print_separator(writer)?;
    print_ignored(writer, analysis)?;

    print_used(writer, &analysis.used)?;

    if !analysis.has_issues() && analysis.type_only.is_empty() {
        print_no_issues_message(writer)?;
        writer.flush()?;
        return Ok(());
    }

    print_unused(writer, &analysis.unused)?;
    print_misplaced(writer, &analysis.misplaced, &result.root)?;
    print_type_only(writer, &analysis.type_only)?;

    writeln!(writer)?;
    print_separator(writer)?;
    writeln!(writer, "  Total Issues: {}", analysis.total_issues.to_string().yellow().bold())?;
    print_separator(writer)?;

    writer.flush()?;
    Ok(())
}

fn print_separator<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", "━".repeat(SEPARATOR_WIDTH).dimmed())
}

fn print_ignored<W: Write>(writer: &mut W, analysis: &AnalysisResult) -> io::Result<()> {
    let ignored = &analysis.ignored;
    if ignored.by_option.is_empty() && ignored.by_default.is_empty() {
        return Ok(());
    }
    let names: BTreeSet<&str> =
        ignored.by_option.iter().chain(&ignored.by_default).map(String::as_str).collect();
    let list = names.into_iter().collect::<Vec<_>>().join(", ");

    writeln!(writer)?;
    writeln!(writer, "{}  Ignored packages: {}", "ℹ".blue(), list.cyan())
}

fn print_section_header<W: Write>(writer: &mut W, title: &str, subtitle: &str) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}  {}", "⚠".yellow().bold(), title.yellow())?;
    writeln!(writer, "  {}", subtitle.dimmed())?;
    writeln!(writer)
}

fn print_unused<W: Write>(writer: &mut W, unused: &[String]) -> io::Result<()> {
    if unused.is_empty() {
        return Ok(());
    }
    print_section_header(
        writer,
        "Unused Dependencies:",
        "(declared but not imported in source code)",
    )?;
    for name in unused {
        writeln!(writer, "  {} {}", "•".yellow(), name)?;
    }
    Ok(())
}

fn print_misplaced<W: Write>(
    writer: &mut W,
    misplaced: &[DependencyUsage],
    root: &Path,
) -> io::Result<()> {
    if misplaced.is_empty() {
        return Ok(());
    }
    print_section_header(
        writer,
        "Misplaced Dependencies:",
        "(in devDependencies but used in source code)",
    )?;

    for usage in misplaced {
        let files: BTreeSet<&Path> = usage.locations.iter().map(|l| l.file.as_path()).collect();
        let usage_text = match files.len() {
            1 => "used in 1 file".to_string(),
            n => format!("used in {} files", n),
        };
        writeln!(
            writer,
            "  {} {} {}",
            "•".yellow(),
            usage.package_name,
            format!("({})", usage_text).dimmed()
        )?;

        for (idx, location) in usage.locations.iter().enumerate() {
            let is_last = idx == usage.locations.len() - 1;
            let prefix = if is_last { "└──" } else { "├──" };
            let shown = display_location(root, location);
            trace!("Misplaced {} at {}", usage.package_name, shown);

            writeln!(writer, "    {} {}", prefix.dimmed(), shown.blue())?;
            writeln!(writer, "        {}", location.import_statement.dimmed())?;
        }
    }
    Ok(())
}

fn print_used<W: Write>(writer: &mut W, used: &[UsedPackage]) -> io::Result<()> {
    if used.is_empty() {
        return Ok(());
    }
    writeln!(writer)?;
    writeln!(writer, "{}  {}", "✓".green(), "Used Dependencies:".green())?;
    writeln!(writer)?;
    for package in used {
        let imports = match package.count {
            1 => "1 import".to_string(),
            n => format!("{} imports", n),
        };
        writeln!(
            writer,
            "  {} {} {}",
            "•".green(),
            package.name,
            format!("({})", imports).dimmed()
        )?;
    }
    Ok(())
}

fn print_type_only<W: Write>(writer: &mut W, type_only: &[String]) -> io::Result<()> {
    if type_only.is_empty() {
        return Ok(());
    }
    writeln!(writer)?;
    writeln!(writer, "{}  {}", "ℹ".blue(), "Type-Only Imports:".blue())?;
    writeln!(writer, "  {}", "(used only for type definitions)".dimmed())?;
    writeln!(writer)?;
    for name in type_only {
        writeln!(writer, "  {} {}", "○".blue(), name)?;
    }
    Ok(())
}

fn print_no_issues_message<W: Write>(writer: &mut W) -> io::Result<()> {
    debug!("No dependency issues found");
    writeln!(writer)?;
    writeln!(
        writer,
        "  {} {}",
        "✓".green().bold(),
        "No issues found! All dependencies are properly used.".green()
    )?;
    writeln!(writer)?;
    print_separator(writer)
}
